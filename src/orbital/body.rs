//! Per-body orbital parameters and live animation state.

use bevy::math::DVec3;
use serde::Serialize;

use crate::planets::PlanetData;

use super::transform::OrbitTransform;

/// Scene-space orbit derived from a [`PlanetData`] record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OrbitalParameters {
    /// Orbital radius in scene units (never below the configured minimum).
    pub radius: f64,
    /// Orbital period in days, as given by the record.
    pub period: f64,
    /// Orbital angular velocity in radians/day, clamped for visibility.
    pub angular_velocity: f64,
    /// Spin angular velocity in radians/day. Negative when retrograde.
    pub rotation_velocity: f64,
    /// Carried for elliptical orbits; positions are circular.
    pub eccentricity: f64,
    pub is_retrograde: bool,
}

/// A registered body: its record, parameters, animation state and transform.
#[derive(Clone, Debug)]
pub struct OrbitingBody<T> {
    pub key: String,
    pub data: PlanetData,
    pub params: OrbitalParameters,
    /// Orbital phase in `[0, 2π)`.
    pub current_angle: f64,
    /// Spin phase in `[0, 2π)`.
    pub rotation_angle: f64,
    /// Last position written by the smoothing path (origin = not yet seeded).
    pub previous_position: DVec3,
    /// Exact orbital position computed on the last update.
    pub target_position: DVec3,
    pub transform: T,
}

impl<T: OrbitTransform> OrbitingBody<T> {
    /// Exact position on the circular orbit at the current angle.
    pub fn orbital_position(&self) -> DVec3 {
        let r = self.params.radius;
        DVec3::new(self.current_angle.cos() * r, 0.0, self.current_angle.sin() * r)
    }

    /// Position currently held by the transform.
    pub fn position(&self) -> DVec3 {
        self.transform.position()
    }

    /// Read-only summary for stats panels and collaborators.
    pub fn snapshot(&self) -> OrbitalSnapshot {
        OrbitalSnapshot {
            key: self.key.clone(),
            name: self.data.name.clone(),
            params: self.params,
            current_angle: self.current_angle,
            rotation_angle: self.rotation_angle,
            position: self.transform.position().to_array(),
        }
    }
}

/// Serializable view of one body's orbital state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrbitalSnapshot {
    pub key: String,
    pub name: String,
    #[serde(flatten)]
    pub params: OrbitalParameters,
    pub current_angle: f64,
    pub rotation_angle: f64,
    pub position: [f64; 3],
}
