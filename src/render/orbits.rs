//! Orbit path rendering.
//!
//! The orbital core bakes each body's ring geometry; this module turns it into
//! flat semi-transparent meshes. Meshes are respawned whenever the core's path
//! revision moves (a body added or removed, a performance-mode switch).
//! Visibility and opacity are applied every frame without a rebuild.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::orbital::RingGeometry;
use crate::simulation::{OrbitalSet, Orrery, PlanetCatalog};

/// Plugin providing orbit path visualization.
pub struct OrbitPathPlugin;

impl Plugin for OrbitPathPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitPathMeshes>().add_systems(
            Update,
            (rebuild_orbit_path_meshes, apply_orbit_path_style)
                .chain()
                .after(OrbitalSet::Sync),
        );
    }
}

/// Ring mesh for one body's orbit.
#[derive(Component, Debug, Clone)]
pub struct OrbitPathMesh {
    pub key: String,
}

/// Path revision the current ring meshes were built from.
#[derive(Resource, Default)]
pub struct OrbitPathMeshes {
    revision: Option<u64>,
}

/// Dim path colour for a body, taken from its display colour.
fn path_color(catalog: &PlanetCatalog, key: &str, alpha: f32) -> Color {
    catalog
        .iter()
        .find(|planet| planet.key() == key)
        .and_then(|planet| planet.color_hex.as_deref())
        .and_then(|hex| Srgba::hex(hex).ok())
        .map(|srgba| Color::from(srgba.with_alpha(alpha)))
        .unwrap_or(Color::srgba(0.6, 0.6, 0.7, alpha))
}

/// Triangle-list mesh for a baked ring, facing +Y.
pub fn ring_mesh(geometry: &RingGeometry) -> Mesh {
    let normals = vec![[0.0_f32, 1.0, 0.0]; geometry.positions.len()];
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, geometry.positions.clone())
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_indices(Indices::U32(geometry.indices.clone()))
}

fn path_visibility(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// Replace every ring mesh when the core's path geometry changed.
fn rebuild_orbit_path_meshes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut built: ResMut<OrbitPathMeshes>,
    orrery: Res<Orrery>,
    catalog: Res<PlanetCatalog>,
    existing: Query<Entity, With<OrbitPathMesh>>,
) {
    let paths = orrery.paths();
    if built.revision == Some(paths.revision()) {
        return;
    }

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    let alpha = paths.opacity() as f32;
    for path in paths.iter() {
        commands.spawn((
            Mesh3d(meshes.add(ring_mesh(&path.geometry))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: path_color(&catalog, &path.key, alpha),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                double_sided: true,
                cull_mode: None,
                ..default()
            })),
            Transform::IDENTITY,
            path_visibility(paths.visible()),
            OrbitPathMesh {
                key: path.key.clone(),
            },
            Name::new(format!("{} orbit", path.key)),
        ));
    }

    debug!(
        "Built {} orbit path meshes ({} segments)",
        paths.len(),
        paths.segments()
    );
    built.revision = Some(paths.revision());
}

/// Follow the core's path visibility and opacity.
fn apply_orbit_path_style(
    orrery: Res<Orrery>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rings: Query<(&MeshMaterial3d<StandardMaterial>, &mut Visibility), With<OrbitPathMesh>>,
) {
    let paths = orrery.paths();
    let visibility = path_visibility(paths.visible());
    let alpha = paths.opacity() as f32;

    for (material, mut current) in rings.iter_mut() {
        if *current != visibility {
            *current = visibility;
        }
        let stale = materials
            .get(&material.0)
            .is_some_and(|m| (m.base_color.alpha() - alpha).abs() > f32::EPSILON);
        if stale {
            if let Some(mut m) = materials.get_mut(&material.0) {
                m.base_color.set_alpha(alpha);
            }
        }
    }
}
