//! Presentation tuning for the orbital animation.
//!
//! None of these numbers are physics. They are the scale factors, speed clamps
//! and smoothing constants that make a compressed solar system readable on
//! screen. Defaults match the built-in planet catalog; a JSON file can
//! override any subset of them.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid orbital config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Complete configuration for the orbital core.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitalConfig {
    pub scale: ScaleSettings,
    pub animation: AnimationSettings,
    pub paths: PathSettings,
    pub belt: BeltSettings,
}

impl OrbitalConfig {
    /// Parse a (possibly partial) JSON config. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: OrbitalConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Repair values that would make clamping panic or produce non-finite output.
    pub fn sanitized(mut self) -> Self {
        let defaults = OrbitalConfig::default();

        let scale = &mut self.scale;
        scale.distance_scale = positive_or(scale.distance_scale, defaults.scale.distance_scale);
        scale.min_radius = positive_or(scale.min_radius, defaults.scale.min_radius);
        scale
            .distance_multipliers
            .retain(|_, m| m.is_finite() && *m > 0.0);

        let anim = &mut self.animation;
        anim.base_time_scale = positive_or(anim.base_time_scale, defaults.animation.base_time_scale);
        anim.initial_speed = if anim.initial_speed.is_finite() {
            anim.initial_speed.max(0.0)
        } else {
            defaults.animation.initial_speed
        };
        anim.min_animation_speed =
            positive_or(anim.min_animation_speed, defaults.animation.min_animation_speed);
        anim.max_animation_speed =
            positive_or(anim.max_animation_speed, defaults.animation.max_animation_speed);
        if anim.min_animation_speed > anim.max_animation_speed {
            std::mem::swap(&mut anim.min_animation_speed, &mut anim.max_animation_speed);
        }
        anim.rotation_damping = if anim.rotation_damping.is_finite() {
            anim.rotation_damping.max(0.0)
        } else {
            defaults.animation.rotation_damping
        };
        anim.distant_period_threshold = positive_or(
            anim.distant_period_threshold,
            defaults.animation.distant_period_threshold,
        );
        anim.smoothing_factor = if anim.smoothing_factor.is_finite() {
            anim.smoothing_factor.clamp(0.001, 1.0)
        } else {
            defaults.animation.smoothing_factor
        };

        let paths = &mut self.paths;
        paths.half_width = positive_or(paths.half_width, defaults.paths.half_width);
        paths.segments = paths.segments.max(3);
        paths.performance_segments = paths.performance_segments.max(3);
        paths.opacity = unit_or(paths.opacity, defaults.paths.opacity);
        paths.performance_opacity = unit_or(paths.performance_opacity, defaults.paths.performance_opacity);

        let belt = &mut self.belt;
        belt.default_inner_reference_distance = positive_or(
            belt.default_inner_reference_distance,
            defaults.belt.default_inner_reference_distance,
        );
        belt.default_outer_reference_distance = positive_or(
            belt.default_outer_reference_distance,
            defaults.belt.default_outer_reference_distance,
        );
        belt.inner_offset = finite_non_negative(belt.inner_offset, defaults.belt.inner_offset);
        belt.outer_offset = finite_non_negative(belt.outer_offset, defaults.belt.outer_offset);
        belt.reference_clearance =
            finite_non_negative(belt.reference_clearance, defaults.belt.reference_clearance);
        belt.min_width = positive_or(belt.min_width, defaults.belt.min_width);
        belt.rebuild_threshold =
            finite_non_negative(belt.rebuild_threshold, defaults.belt.rebuild_threshold);
        belt.thickness = finite_non_negative(belt.thickness, defaults.belt.thickness);

        self
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { fallback }
}

fn finite_non_negative(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 { value } else { fallback }
}

fn unit_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value.clamp(0.0, 1.0) } else { fallback }
}

/// AU → scene-unit conversion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleSettings {
    /// Scene units per astronomical unit.
    pub distance_scale: f64,
    /// Smallest orbital radius any body may have (keeps it clear of the sun).
    pub min_radius: f64,
    /// Per-planet spacing multipliers, keyed by lowercase name.
    ///
    /// Linear AU scaling crowds the inner planets together and spreads the
    /// outer ones across the whole scene; these pull the layout back into shape.
    pub distance_multipliers: BTreeMap<String, f64>,
}

impl Default for ScaleSettings {
    fn default() -> Self {
        let distance_multipliers = [
            ("mercury", 1.6),
            ("venus", 1.4),
            ("earth", 1.3),
            ("mars", 1.25),
            ("jupiter", 1.0),
            ("saturn", 0.9),
            ("uranus", 0.7),
            ("neptune", 0.6),
            ("pluto", 0.55),
        ]
        .into_iter()
        .map(|(name, m)| (name.to_string(), m))
        .collect();

        Self {
            distance_scale: 10.0,
            min_radius: 5.0,
            distance_multipliers,
        }
    }
}

impl ScaleSettings {
    /// Multiplier for a body key, 1.0 when the body is not in the table.
    pub fn multiplier_for(&self, key: &str) -> f64 {
        self.distance_multipliers.get(key).copied().unwrap_or(1.0)
    }
}

/// Time scaling, speed clamps, and smoothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Simulated days per wall-clock second at speed 1.0.
    pub base_time_scale: f64,
    /// Speed multiplier the clock starts with.
    pub initial_speed: f64,
    /// Slowest orbital angular velocity on screen (radians/day).
    pub min_animation_speed: f64,
    /// Fastest orbital angular velocity on screen (radians/day).
    pub max_animation_speed: f64,
    /// Scales planetary spin down so day/night rotation stays watchable.
    pub rotation_damping: f64,
    /// Orbital period (days) above which a body's position is smoothed.
    pub distant_period_threshold: f64,
    /// Fraction of the remaining distance covered per frame by smoothed bodies.
    pub smoothing_factor: f64,
    /// Named child objects that share their parent's spin, keyed by body.
    pub synced_children: BTreeMap<String, Vec<String>>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        let synced_children = [
            ("saturn", vec!["rings"]),
            ("uranus", vec!["rings"]),
            ("earth", vec!["clouds"]),
        ]
        .into_iter()
        .map(|(body, children)| {
            (
                body.to_string(),
                children.into_iter().map(str::to_string).collect(),
            )
        })
        .collect();

        Self {
            base_time_scale: 20.0,
            initial_speed: 1.0,
            min_animation_speed: 0.002,
            max_animation_speed: 0.1,
            rotation_damping: 0.01,
            distant_period_threshold: 1000.0,
            smoothing_factor: 0.1,
            synced_children,
        }
    }
}

/// Orbit path (ring) appearance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Build a path for each registered body.
    pub enabled: bool,
    /// Initial visibility.
    pub visible: bool,
    /// Half of the ring's radial width.
    pub half_width: f64,
    pub segments: u32,
    pub opacity: f64,
    pub performance_segments: u32,
    pub performance_opacity: f64,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            visible: true,
            half_width: 0.05,
            segments: 128,
            opacity: 0.3,
            performance_segments: 48,
            performance_opacity: 0.15,
        }
    }
}

/// Asteroid belt placement relative to two reference bodies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeltSettings {
    /// Body the belt must stay outside of.
    pub inner_reference: String,
    /// Body the belt band is measured back from.
    pub outer_reference: String,
    pub default_inner_reference_distance: f64,
    pub default_outer_reference_distance: f64,
    /// Inner edge = outer reference distance - `inner_offset`.
    pub inner_offset: f64,
    /// Outer edge = outer reference distance - `outer_offset`.
    pub outer_offset: f64,
    /// Minimum gap between the inner reference orbit and the inner edge.
    pub reference_clearance: f64,
    pub min_width: f64,
    /// Band shift (scene units) that triggers regeneration of the asteroid field.
    pub rebuild_threshold: f64,
    pub asteroid_count: u32,
    /// Vertical spread of the asteroid field.
    pub thickness: f64,
    pub seed: u64,
}

impl Default for BeltSettings {
    fn default() -> Self {
        Self {
            inner_reference: "mars".to_string(),
            outer_reference: "jupiter".to_string(),
            // Mars and Jupiter radii under the default scale settings.
            default_inner_reference_distance: 19.05,
            default_outer_reference_distance: 52.04,
            inner_offset: 30.0,
            outer_offset: 8.0,
            reference_clearance: 2.0,
            min_width: 6.0,
            rebuild_threshold: 0.5,
            asteroid_count: 600,
            thickness: 1.0,
            seed: 0x00B3_17A5,
        }
    }
}
