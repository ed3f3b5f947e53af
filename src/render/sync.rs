//! Position synchronization between the orbital core and rendering.
//!
//! The core writes into `SceneTransform` staging values; these systems copy
//! them onto the entities that draw each body and its attachments.

use bevy::prelude::*;

use crate::simulation::Orrery;

/// Entity drawn at an orbiting body's position.
#[derive(Component, Debug, Clone)]
pub struct OrbitalBody {
    /// Registry key (lowercase name).
    pub key: String,
    /// Axial tilt in radians, applied before the spin.
    pub axial_tilt: f32,
}

/// Attachment (rings, cloud layer) that follows a body and shares its spin.
///
/// Attachments are separate entities rather than hierarchy children so that
/// the spin written by the core is applied once, not composed with the parent's.
#[derive(Component, Debug, Clone)]
pub struct OrbitChild {
    pub body: String,
    pub name: String,
    /// Fixed orientation applied after the spin (e.g. laying a ring flat).
    pub base_rotation: Quat,
}

/// Copy body positions and spins from the core onto entities.
pub fn sync_orbit_transforms(
    orrery: Res<Orrery>,
    mut bodies: Query<(&OrbitalBody, &mut Transform), Without<OrbitChild>>,
    mut children: Query<(&OrbitChild, &mut Transform), Without<OrbitalBody>>,
) {
    for (body, mut transform) in bodies.iter_mut() {
        let Some(orbiting) = orrery.get_planet(&body.key) else {
            continue;
        };
        let scene = &orbiting.transform;
        transform.translation = scene.translation.as_vec3();
        transform.rotation = spin(body.axial_tilt, scene.rotation_y);
    }

    for (child, mut transform) in children.iter_mut() {
        let Some(orbiting) = orrery.get_planet(&child.body) else {
            continue;
        };
        let Some(scene) = orbiting.transform.child(&child.name) else {
            continue;
        };
        let tilt = tilt_of(orbiting.data.axial_tilt);
        transform.translation = orbiting.transform.translation.as_vec3();
        transform.rotation = spin(tilt, scene.rotation_y) * child.base_rotation;
    }
}

/// Tilt about Z, then spin about the tilted Y axis.
pub fn spin(axial_tilt: f32, rotation_y: f64) -> Quat {
    Quat::from_rotation_z(axial_tilt) * Quat::from_rotation_y(rotation_y as f32)
}

/// Axial tilt in degrees → radians as used by [`spin`].
pub fn tilt_of(degrees: f64) -> f32 {
    if degrees.is_finite() {
        degrees.to_radians() as f32
    } else {
        0.0
    }
}
