//! Celestial body rendering and spawning.
//!
//! Handles the visual representation of the Sun, planets, and their
//! attachments (rings, Earth's cloud layer). Every planet is registered with
//! the orbital core as it is spawned.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::orbital::SceneTransform;
use crate::planets::PlanetData;
use crate::render::sync::{OrbitChild, OrbitalBody, spin, tilt_of};
use crate::simulation::{OrbitalSettings, Orrery, PlanetCatalog};

/// Earth's diameter in km, the reference for body sizes.
const EARTH_DIAMETER_KM: f64 = 12_756.0;

/// Scene radius of an Earth-sized planet.
const EARTH_RENDER_RADIUS: f32 = 0.6;

/// Sun radius in scene units. Stays inside the minimum orbital radius.
const SUN_RENDER_RADIUS: f32 = 2.5;

/// Marker for the Sun entity.
#[derive(Component)]
pub struct Sun;

/// Plugin providing celestial body spawning functionality.
pub struct CelestialBodyPlugin;

impl Plugin for CelestialBodyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_solar_system);
    }
}

/// Display colour for a record, grey when missing or malformed.
fn body_color(data: &PlanetData) -> Color {
    data.color_hex
        .as_deref()
        .and_then(|hex| Srgba::hex(hex).ok())
        .map(Color::from)
        .unwrap_or(Color::srgb(0.6, 0.6, 0.6))
}

/// Compressed visual radius. Real ratios would make the inner planets invisible.
pub fn render_radius(data: &PlanetData) -> f32 {
    if !data.diameter.is_finite() || data.diameter <= 0.0 {
        return EARTH_RENDER_RADIUS;
    }
    let relative = (data.diameter / EARTH_DIAMETER_KM).powf(0.4) as f32;
    (relative * EARTH_RENDER_RADIUS).clamp(0.2, 2.0)
}

/// Spawn the Sun and every planet in the catalog.
fn spawn_solar_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut orrery: ResMut<Orrery>,
    catalog: Res<PlanetCatalog>,
    settings: Res<OrbitalSettings>,
) {
    let mut spawned = 0;

    for data in catalog.iter() {
        if data.is_sun() {
            spawn_sun(&mut commands, &mut meshes, &mut materials, data);
            continue;
        }

        let key = data.key();
        let children: Vec<String> = settings
            .animation
            .synced_children
            .get(&key)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|name| attachment_applies(data, name))
            .collect();

        let transform = children
            .iter()
            .fold(SceneTransform::default(), |t, name| t.with_child(name.clone()));

        if orrery.add_orbiting_body(transform, data).is_err() {
            continue;
        }
        let Some(body) = orrery.get_planet(&key) else {
            continue;
        };

        let radius = render_radius(data);
        let color = body_color(data);
        let tilt = tilt_of(data.axial_tilt);
        let translation = body.transform.translation.as_vec3();

        commands.spawn((
            Mesh3d(meshes.add(Sphere::new(radius))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                perceptual_roughness: 0.9,
                ..default()
            })),
            Transform::from_translation(translation)
                .with_rotation(spin(tilt, body.transform.rotation_y)),
            OrbitalBody {
                key: key.clone(),
                axial_tilt: tilt,
            },
            Name::new(data.name.clone()),
        ));

        for name in &children {
            let (mesh, material, base_rotation) = match name.as_str() {
                "rings" => (
                    meshes.add(Annulus::new(radius * 1.3, radius * 2.2)),
                    materials.add(StandardMaterial {
                        base_color: color.with_alpha(0.6),
                        alpha_mode: AlphaMode::Blend,
                        double_sided: true,
                        cull_mode: None,
                        unlit: true,
                        ..default()
                    }),
                    Quat::from_rotation_x(-FRAC_PI_2),
                ),
                _ => (
                    meshes.add(Sphere::new(radius * 1.03)),
                    materials.add(StandardMaterial {
                        base_color: Color::srgba(1.0, 1.0, 1.0, 0.35),
                        alpha_mode: AlphaMode::Blend,
                        ..default()
                    }),
                    Quat::IDENTITY,
                ),
            };

            commands.spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(translation).with_rotation(base_rotation),
                OrbitChild {
                    body: key.clone(),
                    name: name.clone(),
                    base_rotation,
                },
                Name::new(format!("{} {}", data.name, name)),
            ));
        }

        spawned += 1;
    }

    info!("Spawned {} orbiting bodies", spawned);
}

/// Rings only for ringed bodies; other attachments always.
fn attachment_applies(data: &PlanetData, name: &str) -> bool {
    name != "rings" || data.has_rings
}

fn spawn_sun(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    data: &PlanetData,
) {
    let color = body_color(data);
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SUN_RENDER_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: color,
            emissive: color.to_linear() * 4.0,
            ..default()
        })),
        Transform::IDENTITY,
        Sun,
        Name::new(data.name.clone()),
    ));

    commands.spawn((
        PointLight {
            intensity: 2.0e7,
            range: 500.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::IDENTITY,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planets::solar_system;

    #[test]
    fn test_render_radius_ordering() {
        let planets = solar_system();
        let radius = |name: &str| {
            render_radius(planets.iter().find(|p| p.name == name).unwrap())
        };
        assert!(radius("Jupiter") > radius("Earth"));
        assert!(radius("Earth") > radius("Mercury"));
        assert!(radius("Jupiter") < SUN_RENDER_RADIUS);
    }

    #[test]
    fn test_render_radius_defaults_without_diameter() {
        let rock = PlanetData::new("Rock", 2.0, 500.0, 10.0);
        assert_eq!(render_radius(&rock), EARTH_RENDER_RADIUS);
    }

    #[test]
    fn test_catalog_colours_parse() {
        for planet in solar_system() {
            let hex = planet.color_hex.as_deref().unwrap();
            assert!(Srgba::hex(hex).is_ok(), "{hex}");
        }
    }

    #[test]
    fn test_rings_only_on_ringed_bodies() {
        let mut earth = PlanetData::new("Earth", 1.0, 365.25, 24.0);
        assert!(!attachment_applies(&earth, "rings"));
        assert!(attachment_applies(&earth, "clouds"));
        earth.has_rings = true;
        assert!(attachment_applies(&earth, "rings"));
    }
}
