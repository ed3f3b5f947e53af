//! Asteroid belt placement.
//!
//! The belt is positioned relative to two moving reference bodies (Mars and
//! Jupiter by default). Each frame, after the orbital core has committed new
//! positions, [`calculate_belt_positions`] derives the band and
//! [`AsteroidBelt::recalculate`] decides whether the scattered asteroid field
//! has drifted far enough to be rebuilt.

use std::collections::HashMap;
use std::f64::consts::TAU;

use bevy::math::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::config::BeltSettings;
use crate::types::body_key;

/// Last-resort inner edge when even the default reference distances give nothing usable.
const FALLBACK_INNER_RADIUS: f64 = 1.0;

/// Asteroid radius range in scene units.
const ASTEROID_SIZE: (f32, f32) = (0.05, 0.15);

/// Radial extent of the belt plus the reference distances it was derived from.
///
/// Always finite, with `0 < inner_radius < outer_radius`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BeltBounds {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub inner_reference_distance: f64,
    pub outer_reference_distance: f64,
}

impl BeltBounds {
    pub fn width(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.inner_radius + self.outer_radius)
    }

    pub fn contains(&self, radius: f64) -> bool {
        radius >= self.inner_radius && radius <= self.outer_radius
    }

    /// Largest movement of either edge relative to `other`.
    pub fn shift_from(&self, other: &BeltBounds) -> f64 {
        (self.inner_radius - other.inner_radius)
            .abs()
            .max((self.outer_radius - other.outer_radius).abs())
    }
}

/// Derive the belt band from the current body positions.
///
/// Missing, non-finite or non-positive reference distances fall back to the
/// configured defaults. The band is widened symmetrically when it would be
/// narrower than `min_width`.
pub fn calculate_belt_positions(
    positions: &HashMap<String, DVec3>,
    settings: &BeltSettings,
) -> BeltBounds {
    let inner_ref = reference_distance(
        positions,
        &settings.inner_reference,
        settings.default_inner_reference_distance,
    );
    let outer_ref = reference_distance(
        positions,
        &settings.outer_reference,
        settings.default_outer_reference_distance,
    );

    let min_width = if settings.min_width.is_finite() && settings.min_width > 0.0 {
        settings.min_width
    } else {
        BeltSettings::default().min_width
    };

    if let Some((inner, outer)) = band(inner_ref, outer_ref, settings, min_width) {
        return BeltBounds {
            inner_radius: inner,
            outer_radius: outer,
            inner_reference_distance: inner_ref,
            outer_reference_distance: outer_ref,
        };
    }

    let defaults = BeltSettings::default();
    let inner_ref = usable_distance(settings.default_inner_reference_distance)
        .unwrap_or(defaults.default_inner_reference_distance);
    let outer_ref = usable_distance(settings.default_outer_reference_distance)
        .unwrap_or(defaults.default_outer_reference_distance);
    let (inner, outer) = band(inner_ref, outer_ref, settings, min_width).unwrap_or((
        FALLBACK_INNER_RADIUS,
        widen_to(FALLBACK_INNER_RADIUS, FALLBACK_INNER_RADIUS + min_width, min_width),
    ));

    BeltBounds {
        inner_radius: inner,
        outer_radius: outer,
        inner_reference_distance: inner_ref,
        outer_reference_distance: outer_ref,
    }
}

/// Planar distance of a named body from the origin, or `fallback`.
fn reference_distance(positions: &HashMap<String, DVec3>, name: &str, fallback: f64) -> f64 {
    positions
        .get(&body_key(name))
        .and_then(|p| usable_distance(p.x.hypot(p.z)))
        .or_else(|| usable_distance(fallback))
        .unwrap_or(FALLBACK_INNER_RADIUS)
}

fn usable_distance(distance: f64) -> Option<f64> {
    (distance.is_finite() && distance > 0.0).then_some(distance)
}

fn band(inner_ref: f64, outer_ref: f64, settings: &BeltSettings, min_width: f64) -> Option<(f64, f64)> {
    let mut inner = (outer_ref - settings.inner_offset).max(inner_ref + settings.reference_clearance);
    let mut outer = outer_ref - settings.outer_offset;

    let width = outer - inner;
    if width.is_nan() || width < min_width {
        let mid = 0.5 * (inner + outer);
        inner = mid - 0.5 * min_width;
        outer = widen_to(inner, inner + min_width, min_width);
    }

    let valid = inner.is_finite() && outer.is_finite() && inner > 0.0 && outer - inner >= min_width;
    valid.then_some((inner, outer))
}

/// Push `outer` up one ULP at a time until the band is at least `min_width` wide.
///
/// `inner + min_width` can round below the target far from the origin.
fn widen_to(inner: f64, mut outer: f64, min_width: f64) -> f64 {
    while outer.is_finite() && outer - inner < min_width {
        outer = outer.next_up();
    }
    outer
}

/// One scattered asteroid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Asteroid {
    pub position: DVec3,
    pub radius: f32,
}

/// Belt band plus a deterministic asteroid scatter inside it.
#[derive(Clone, Debug)]
pub struct AsteroidBelt {
    settings: BeltSettings,
    bounds: Option<BeltBounds>,
    built_bounds: Option<BeltBounds>,
    asteroids: Vec<Asteroid>,
    revision: u64,
}

impl AsteroidBelt {
    pub fn new(settings: BeltSettings) -> Self {
        Self {
            settings,
            bounds: None,
            built_bounds: None,
            asteroids: Vec::new(),
            revision: 0,
        }
    }

    /// Most recently calculated band.
    pub fn bounds(&self) -> Option<&BeltBounds> {
        self.bounds.as_ref()
    }

    /// Band the current asteroid field was scattered into.
    pub fn built_bounds(&self) -> Option<&BeltBounds> {
        self.built_bounds.as_ref()
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    /// Bumped on every rebuild of the asteroid field.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn settings(&self) -> &BeltSettings {
        &self.settings
    }

    /// Recompute the band and rebuild the field if it moved past the threshold.
    ///
    /// Returns `true` when the field was rebuilt.
    pub fn recalculate(&mut self, positions: &HashMap<String, DVec3>) -> bool {
        let bounds = calculate_belt_positions(positions, &self.settings);
        self.bounds = Some(bounds);

        let stale = match &self.built_bounds {
            Some(built) => bounds.shift_from(built) > self.settings.rebuild_threshold,
            None => true,
        };
        if stale {
            self.rebuild(bounds);
        }
        stale
    }

    /// Drop the field; the next `recalculate` rebuilds it.
    pub fn clear(&mut self) {
        self.bounds = None;
        self.built_bounds = None;
        self.asteroids.clear();
        self.revision += 1;
    }

    fn rebuild(&mut self, bounds: BeltBounds) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.settings.seed);
        let half_thickness = if self.settings.thickness.is_finite() {
            0.5 * self.settings.thickness.abs()
        } else {
            0.0
        };

        self.asteroids = (0..self.settings.asteroid_count)
            .map(|_| {
                let radius = rng.random_range(bounds.inner_radius..=bounds.outer_radius);
                let angle = rng.random_range(0.0..TAU);
                let y = rng.random_range(-half_thickness..=half_thickness);
                Asteroid {
                    position: DVec3::new(angle.cos() * radius, y, angle.sin() * radius),
                    radius: rng.random_range(ASTEROID_SIZE.0..=ASTEROID_SIZE.1),
                }
            })
            .collect();
        self.built_bounds = Some(bounds);
        self.revision += 1;
    }
}
