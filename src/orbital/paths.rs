//! Orbit path rings.
//!
//! Each registered body gets a thin flat annulus in the orbital plane. The
//! segment count is baked into the geometry when it is built, so switching
//! performance mode throws every ring away and builds new ones. Renderers watch
//! [`OrbitPaths::revision`] to know when their cached meshes are stale.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use crate::config::PathSettings;

/// Triangle-list annulus in the XZ plane.
#[derive(Clone, Debug, PartialEq)]
pub struct RingGeometry {
    /// Interleaved `[outer_i, inner_i]` vertex pairs, `segments + 1` of each.
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub segments: u32,
}

impl RingGeometry {
    pub fn annulus(inner_radius: f64, outer_radius: f64, segments: u32) -> Self {
        let segments = segments.max(3);
        let mut positions = Vec::with_capacity(2 * (segments as usize + 1));
        let mut indices = Vec::with_capacity(6 * segments as usize);

        for i in 0..=segments {
            let theta = TAU * i as f64 / segments as f64;
            let (sin, cos) = theta.sin_cos();
            positions.push([(cos * outer_radius) as f32, 0.0, (sin * outer_radius) as f32]);
            positions.push([(cos * inner_radius) as f32, 0.0, (sin * inner_radius) as f32]);
        }

        for i in 0..segments {
            let outer = 2 * i;
            let inner = outer + 1;
            let next_outer = outer + 2;
            let next_inner = outer + 3;
            indices.extend_from_slice(&[outer, inner, next_outer, inner, next_inner, next_outer]);
        }

        Self {
            positions,
            indices,
            segments,
        }
    }
}

/// Ring for one body.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitPath {
    pub key: String,
    pub radius: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub geometry: RingGeometry,
}

impl OrbitPath {
    fn build(key: &str, radius: f64, half_width: f64, segments: u32) -> Self {
        let inner_radius = (radius - half_width).max(0.0);
        let outer_radius = radius + half_width;
        Self {
            key: key.to_string(),
            radius,
            inner_radius,
            outer_radius,
            geometry: RingGeometry::annulus(inner_radius, outer_radius, segments),
        }
    }
}

/// All orbit paths plus their shared display state.
#[derive(Clone, Debug)]
pub struct OrbitPaths {
    settings: PathSettings,
    paths: BTreeMap<String, OrbitPath>,
    visible: bool,
    opacity: f64,
    performance_mode: bool,
    revision: u64,
}

impl OrbitPaths {
    pub fn new(settings: PathSettings) -> Self {
        Self {
            visible: settings.visible,
            opacity: settings.opacity.clamp(0.0, 1.0),
            settings,
            paths: BTreeMap::new(),
            performance_mode: false,
            revision: 0,
        }
    }

    /// Path creation is switched on in the settings.
    pub fn enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Build (or rebuild) the ring for one body.
    pub fn create_path(&mut self, key: &str, radius: f64) {
        if !self.settings.enabled {
            return;
        }
        let path = OrbitPath::build(key, radius, self.settings.half_width, self.segments());
        self.paths.insert(key.to_string(), path);
        self.revision += 1;
    }

    pub fn remove_path(&mut self, key: &str) -> Option<OrbitPath> {
        let removed = self.paths.remove(key);
        if removed.is_some() {
            self.revision += 1;
        }
        removed
    }

    pub fn get(&self, key: &str) -> Option<&OrbitPath> {
        self.paths.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrbitPath> {
        self.paths.values()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Show or hide all paths. Geometry is kept.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Set the base opacity, clamped to `[0, 1]`. Non-finite input is ignored.
    pub fn set_opacity(&mut self, opacity: f64) {
        if opacity.is_finite() {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    /// Opacity to draw with, after the performance-mode reduction.
    pub fn opacity(&self) -> f64 {
        if self.performance_mode {
            self.opacity.min(self.settings.performance_opacity)
        } else {
            self.opacity
        }
    }

    /// Segment count new geometry is built with.
    pub fn segments(&self) -> u32 {
        if self.performance_mode {
            self.settings.performance_segments
        } else {
            self.settings.segments
        }
    }

    pub fn performance_mode(&self) -> bool {
        self.performance_mode
    }

    /// Switch performance mode and rebuild every ring. Returns `true` if the mode changed.
    pub fn set_performance_mode(&mut self, enabled: bool) -> bool {
        if self.performance_mode == enabled {
            return false;
        }
        self.performance_mode = enabled;

        let rebuilt: Vec<(String, f64)> = self
            .paths
            .values()
            .map(|path| (path.key.clone(), path.radius))
            .collect();
        self.paths.clear();
        for (key, radius) in rebuilt {
            let path = OrbitPath::build(&key, radius, self.settings.half_width, self.segments());
            self.paths.insert(key, path);
        }
        self.revision += 1;
        true
    }

    /// Bumped whenever geometry is created, destroyed, or rebuilt.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drop all geometry.
    pub fn clear(&mut self) {
        if !self.paths.is_empty() {
            self.paths.clear();
            self.revision += 1;
        }
    }
}
