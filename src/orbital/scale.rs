//! Real-world planet data → scene-space orbit.
//!
//! Pure functions, no state. Every output is finite for every input: bad
//! distances collapse to the minimum radius, bad periods to the fastest
//! allowed speed, bad rotation periods to no spin.

use std::f64::consts::TAU;

use crate::config::OrbitalConfig;
use crate::planets::PlanetData;
use crate::types::{HOURS_PER_DAY, finite_or};

use super::body::OrbitalParameters;

/// Largest eccentricity carried through. Elliptical motion is not animated.
const MAX_ECCENTRICITY: f64 = 0.99;

/// Compute the scene-space orbit for a planet record.
pub fn compute_orbital_parameters(data: &PlanetData, config: &OrbitalConfig) -> OrbitalParameters {
    let anim = &config.animation;
    let rotation_velocity = rotation_velocity(data.rotation_period, anim.rotation_damping);

    OrbitalParameters {
        radius: orbital_radius(data, config),
        period: finite_or(data.orbital_period, 0.0),
        angular_velocity: angular_velocity(
            data.orbital_period,
            anim.min_animation_speed,
            anim.max_animation_speed,
        ),
        rotation_velocity,
        eccentricity: finite_or(data.orbital_eccentricity, 0.0).clamp(0.0, MAX_ECCENTRICITY),
        is_retrograde: rotation_velocity < 0.0
            || (data.rotation_period.is_finite() && data.rotation_period < 0.0),
    }
}

/// Scaled orbital radius, never below `scale.min_radius`.
pub fn orbital_radius(data: &PlanetData, config: &OrbitalConfig) -> f64 {
    let scale = &config.scale;
    let distance = finite_or(data.distance_from_sun, 0.0);
    let radius = distance * scale.distance_scale * scale.multiplier_for(&data.key());

    if radius.is_finite() {
        radius.max(scale.min_radius)
    } else {
        scale.min_radius
    }
}

/// `2π / period`, clamped to `[min, max]`.
///
/// Zero, negative, or non-finite periods map to `max`.
pub fn angular_velocity(period_days: f64, min: f64, max: f64) -> f64 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    if !period_days.is_finite() || period_days <= 0.0 {
        return max;
    }
    let omega = TAU / period_days;
    if omega.is_finite() { omega.clamp(min, max) } else { max }
}

/// Spin rate in radians/day; the sign of `rotation_period_hours` is kept.
pub fn rotation_velocity(rotation_period_hours: f64, damping: f64) -> f64 {
    if !rotation_period_hours.is_finite() || rotation_period_hours == 0.0 {
        return 0.0;
    }
    let period_days = rotation_period_hours.abs() / HOURS_PER_DAY;
    let omega = rotation_period_hours.signum() * (TAU / period_days) * finite_or(damping, 0.0);
    finite_or(omega, 0.0)
}
