//! Background rendering for the solar system visualization.
//!
//! Provides the starfield shell and fill lighting. The Sun's own point light
//! is spawned with the Sun.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of background stars.
const STAR_COUNT: usize = 1500;

/// Radius of the star shell, well outside the outermost orbit.
const STAR_SHELL_RADIUS: f32 = 900.0;

const STAR_SEED: u64 = 0x57A2_F1E1;

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.01, 0.01, 0.03)))
            .add_systems(Startup, (spawn_starfield, spawn_lighting));
    }
}

/// Uniformly distributed point on a sphere of the given radius.
fn star_position(rng: &mut impl Rng, radius: f32) -> Vec3 {
    let y: f32 = rng.random_range(-1.0..=1.0);
    let theta: f32 = rng.random_range(0.0..TAU);
    let ring = (1.0 - y * y).max(0.0).sqrt();
    Vec3::new(ring * theta.cos(), y, ring * theta.sin()) * radius
}

/// Spawn a starfield shell around the solar system.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::WHITE * 0.5,
        unlit: true,
        ..default()
    });
    let star_mesh = meshes.add(Sphere::new(0.8));

    let mut rng = ChaCha8Rng::seed_from_u64(STAR_SEED);
    for _ in 0..STAR_COUNT {
        let position = star_position(&mut rng, STAR_SHELL_RADIUS);
        let scale = rng.random_range(0.5..1.5);

        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_material.clone()),
            Transform::from_translation(position).with_scale(Vec3::splat(scale)),
        ));
    }

    info!("Spawned {} background stars", STAR_COUNT);
}

/// Dim fill light so night sides are not pitch black.
fn spawn_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 300.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 100.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
    ));
}
