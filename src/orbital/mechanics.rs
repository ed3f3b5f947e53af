//! Orbital mechanics: registry, clock, and per-frame update driver in one owner.
//!
//! A single [`OrbitalMechanics`] value is constructed by the caller and passed
//! to whatever needs it. All mutation happens in [`OrbitalMechanics::update`],
//! called once per frame; readers look at positions between frames.

use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

use bevy::math::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::config::{AnimationSettings, OrbitalConfig};
use crate::planets::PlanetData;
use crate::types::wrap_angle;

use super::body::{OrbitalSnapshot, OrbitingBody};
use super::clock::SimulationClock;
use super::diagnostics::{Diagnostic, DiagnosticSink, LogSink, RegistrationError};
use super::paths::OrbitPaths;
use super::registry::OrbitalRegistry;
use super::scale::compute_orbital_parameters;
use super::transform::{OrbitTransform, SceneTransform};

/// Outcome of a successful registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    Added,
    /// A body with the same key already existed and was overwritten.
    Replaced,
}

/// Snapshot of the core's state for stats panels.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrbitalStats {
    pub initialized: bool,
    pub body_count: usize,
    pub path_count: usize,
    pub paths_visible: bool,
    pub performance_mode: bool,
    pub speed: f64,
    pub paused: bool,
    pub base_time_scale: f64,
    pub elapsed_days: f64,
    pub elapsed_years: f64,
    pub formatted_time: String,
}

/// Owner of every orbiting body and the clock that drives them.
///
/// `T` is whatever the caller animates; the Bevy adapter uses [`SceneTransform`]
/// and copies it onto entities after each update.
pub struct OrbitalMechanics<T: OrbitTransform = SceneTransform> {
    config: OrbitalConfig,
    registry: OrbitalRegistry<T>,
    paths: OrbitPaths,
    clock: SimulationClock,
    rng: ChaCha8Rng,
    diagnostics: Box<dyn DiagnosticSink>,
    initialized: bool,
    warned_uninitialized: bool,
    /// Keys already reported as non-finite, so a broken body warns once.
    non_finite_reported: HashSet<String>,
}

impl<T: OrbitTransform> OrbitalMechanics<T> {
    /// Create with angles drawn from an OS-seeded generator.
    pub fn new(config: OrbitalConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_os_rng())
    }

    /// Create with reproducible initial and reset angles.
    pub fn with_seed(config: OrbitalConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create around an existing generator. The config is sanitized first.
    pub fn with_rng(config: OrbitalConfig, rng: ChaCha8Rng) -> Self {
        let config = config.sanitized();
        Self {
            paths: OrbitPaths::new(config.paths.clone()),
            clock: new_clock(&config.animation),
            registry: OrbitalRegistry::new(),
            rng,
            diagnostics: Box::new(LogSink),
            initialized: false,
            warned_uninitialized: false,
            non_finite_reported: HashSet::new(),
            config,
        }
    }

    /// Replace the diagnostic receiver (defaults to [`LogSink`]).
    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }

    /// Mark the core ready to animate. Calling it again is harmless.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.warned_uninitialized = false;
        self.emit(Diagnostic::Initialized);
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Configuration in effect, after sanitizing.
    pub fn config(&self) -> &OrbitalConfig {
        &self.config
    }

    // --- Registry ---

    /// Register a body to orbit the sun.
    ///
    /// The sun and nameless records are rejected and leave the registry as it
    /// was. Re-registering a name overwrites the previous body.
    pub fn add_orbiting_body(
        &mut self,
        transform: T,
        data: &PlanetData,
    ) -> Result<Registration, RegistrationError> {
        let key = data.key();
        let rejection = if key.is_empty() {
            Some(RegistrationError::MissingName)
        } else if data.is_sun() {
            Some(RegistrationError::Sun)
        } else {
            None
        };
        if let Some(reason) = rejection {
            self.emit(Diagnostic::RegistrationSkipped {
                name: data.name.clone(),
                reason: reason.clone(),
            });
            return Err(reason);
        }

        let params = compute_orbital_parameters(data, &self.config);
        let current_angle = self.random_angle();
        let rotation_angle = self.random_angle();

        let mut body = OrbitingBody {
            key: key.clone(),
            data: data.clone(),
            params,
            current_angle,
            rotation_angle,
            previous_position: DVec3::ZERO,
            target_position: DVec3::ZERO,
            transform,
        };
        place_body(&mut body, &self.config.animation);

        if self.paths.enabled() {
            self.paths.create_path(&key, params.radius);
        }

        self.non_finite_reported.remove(&key);
        match self.registry.insert(body) {
            Some(_) => {
                self.emit(Diagnostic::BodyReplaced { key });
                Ok(Registration::Replaced)
            }
            None => Ok(Registration::Added),
        }
    }

    pub fn remove_orbiting_body(&mut self, name: &str) -> Option<OrbitingBody<T>> {
        let removed = self.registry.remove(name)?;
        self.paths.remove_path(&removed.key);
        self.non_finite_reported.remove(&removed.key);
        Some(removed)
    }

    pub fn get_planet(&self, name: &str) -> Option<&OrbitingBody<T>> {
        self.registry.get(name)
    }

    pub fn has_planet(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    pub fn get_planet_names(&self) -> Vec<String> {
        self.registry.names()
    }

    pub fn get_all_orbital_data(&self) -> Vec<OrbitalSnapshot> {
        self.registry.iter().map(OrbitingBody::snapshot).collect()
    }

    pub fn bodies(&self) -> impl Iterator<Item = &OrbitingBody<T>> {
        self.registry.iter()
    }

    /// Current world position of a body.
    pub fn get_planet_position(&self, name: &str) -> Option<DVec3> {
        self.registry.get(name).map(OrbitingBody::position)
    }

    /// Current world position of every body, by key.
    pub fn body_positions(&self) -> HashMap<String, DVec3> {
        self.registry
            .iter()
            .map(|body| (body.key.clone(), body.position()))
            .collect()
    }

    // --- Time and speed ---

    /// Advance one frame.
    ///
    /// `speed_multiplier` applies to this frame only; zero freezes everything.
    pub fn update(&mut self, delta_seconds: f64, speed_multiplier: f64) {
        if !self.initialized {
            if !self.warned_uninitialized {
                self.warned_uninitialized = true;
                self.emit(Diagnostic::UpdateBeforeInit);
            }
            return;
        }

        let elapsed_days = self.clock.advance(delta_seconds, speed_multiplier);
        if elapsed_days == 0.0 {
            return;
        }

        let mut non_finite = Vec::new();
        for body in self.registry.iter_mut() {
            if !advance_body(body, elapsed_days, &self.config.animation) {
                non_finite.push(body.key.clone());
            }
        }
        for key in non_finite {
            if self.non_finite_reported.insert(key.clone()) {
                self.emit(Diagnostic::NonFinitePosition { key });
            }
        }
    }

    /// Advance one frame at the clock's own speed.
    pub fn tick(&mut self, delta_seconds: f64) {
        let speed = self.clock.speed();
        self.update(delta_seconds, speed);
    }

    /// Set the live speed multiplier (0 pauses).
    ///
    /// Resuming from pause re-seeds every body's smoothing origin from where
    /// its transform actually is, so slow bodies do not jump.
    pub fn set_speed(&mut self, multiplier: f64) {
        if self.clock.set_speed(multiplier) {
            for body in self.registry.iter_mut() {
                body.previous_position = body.transform.position();
            }
        }
    }

    #[deprecated(note = "use `set_speed(1.0)` / `set_speed(0.0)`")]
    pub fn set_playing(&mut self, playing: bool) {
        self.set_speed(if playing { 1.0 } else { 0.0 });
    }

    /// Live speed multiplier; zero when paused.
    pub fn speed(&self) -> f64 {
        self.clock.speed()
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn elapsed_days(&self) -> f64 {
        self.clock.elapsed_days()
    }

    pub fn elapsed_years(&self) -> f64 {
        self.clock.elapsed_years()
    }

    pub fn formatted_time(&self) -> String {
        self.clock.formatted()
    }

    /// Read-only view of the simulation clock.
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Rewind the clock and scatter every body to fresh random angles.
    ///
    /// Bodies are placed immediately; smoothing state is cleared.
    pub fn reset_positions(&mut self) {
        self.clock.reset();
        for body in self.registry.iter_mut() {
            body.current_angle = self.rng.random_range(0.0..TAU);
            body.rotation_angle = self.rng.random_range(0.0..TAU);
            body.previous_position = DVec3::ZERO;
            body.target_position = DVec3::ZERO;
            place_body(body, &self.config.animation);
        }
        let bodies = self.registry.len();
        self.emit(Diagnostic::PositionsReset { bodies });
    }

    // --- Paths ---

    pub fn paths(&self) -> &OrbitPaths {
        &self.paths
    }

    pub fn set_paths_visible(&mut self, visible: bool) {
        self.paths.set_visible(visible);
    }

    pub fn set_path_opacity(&mut self, opacity: f64) {
        self.paths.set_opacity(opacity);
    }

    pub fn set_performance_mode(&mut self, enabled: bool) {
        if self.paths.set_performance_mode(enabled) {
            let (paths, segments) = (self.paths.len(), self.paths.segments());
            self.emit(Diagnostic::PathsRebuilt { paths, segments });
        }
    }

    // --- Lifecycle ---

    pub fn get_stats(&self) -> OrbitalStats {
        OrbitalStats {
            initialized: self.initialized,
            body_count: self.registry.len(),
            path_count: self.paths.len(),
            paths_visible: self.paths.visible(),
            performance_mode: self.paths.performance_mode(),
            speed: self.clock.speed(),
            paused: self.clock.is_paused(),
            base_time_scale: self.clock.base_time_scale(),
            elapsed_days: self.clock.elapsed_days(),
            elapsed_years: self.clock.elapsed_years(),
            formatted_time: self.clock.formatted(),
        }
    }

    /// Drop all bodies and paths and zero the clock.
    ///
    /// Safe to call repeatedly; `init` brings the core back.
    pub fn dispose(&mut self) {
        let was_live = self.initialized || !self.registry.is_empty();
        self.registry.clear();
        self.paths.clear();
        self.non_finite_reported.clear();
        self.clock = new_clock(&self.config.animation);
        self.initialized = false;
        self.warned_uninitialized = false;
        if was_live {
            self.emit(Diagnostic::Disposed);
        }
    }

    fn random_angle(&mut self) -> f64 {
        self.rng.random_range(0.0..TAU)
    }

    fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.emit(&diagnostic);
    }
}

fn new_clock(animation: &AnimationSettings) -> SimulationClock {
    SimulationClock::new(animation.base_time_scale, animation.initial_speed)
}

/// Advance one body by `elapsed_days`. Returns `false` if its position went non-finite.
fn advance_body<T: OrbitTransform>(
    body: &mut OrbitingBody<T>,
    elapsed_days: f64,
    animation: &AnimationSettings,
) -> bool {
    body.current_angle =
        wrap_angle(body.current_angle + body.params.angular_velocity * elapsed_days);
    body.rotation_angle =
        wrap_angle(body.rotation_angle + body.params.rotation_velocity * elapsed_days);

    let target = body.orbital_position();
    body.target_position = target;

    let position = if body.data.orbital_period > animation.distant_period_threshold {
        // Origin means "never seeded" (reset or fresh registration).
        if body.previous_position == DVec3::ZERO {
            body.previous_position = body.transform.position();
        }
        body.previous_position.lerp(target, animation.smoothing_factor)
    } else {
        target
    };

    if !position.is_finite() {
        return false;
    }
    body.previous_position = position;
    body.transform.set_position(position);
    apply_rotation(body, animation);
    true
}

/// Snap a body onto its orbit at its current angles.
fn place_body<T: OrbitTransform>(body: &mut OrbitingBody<T>, animation: &AnimationSettings) {
    let position = body.orbital_position();
    if position.is_finite() {
        body.transform.set_position(position);
    }
    apply_rotation(body, animation);
}

fn apply_rotation<T: OrbitTransform>(body: &mut OrbitingBody<T>, animation: &AnimationSettings) {
    let angle = body.rotation_angle;
    body.transform.set_rotation_y(angle);

    let Some(children) = animation.synced_children.get(&body.key) else {
        return;
    };
    for name in children {
        if let Some(child) = body.transform.child_mut(name) {
            child.set_rotation_y(angle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbital::diagnostics::SilentSink;
    use approx::assert_relative_eq;
    use std::sync::{Arc, Mutex};

    fn mechanics() -> OrbitalMechanics {
        let mut m = OrbitalMechanics::with_seed(OrbitalConfig::default(), 7)
            .with_diagnostics(SilentSink);
        m.init();
        m
    }

    fn earth() -> PlanetData {
        PlanetData::new("Earth", 1.0, 365.25, 24.0)
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Diagnostic>>>);

    impl DiagnosticSink for Recorder {
        fn emit(&self, diagnostic: &Diagnostic) {
            if let Ok(mut log) = self.0.lock() {
                log.push(diagnostic.clone());
            }
        }
    }

    #[test]
    fn test_registration_places_body_on_orbit() {
        let mut m = mechanics();
        assert_eq!(
            m.add_orbiting_body(SceneTransform::default(), &earth()),
            Ok(Registration::Added)
        );
        let body = m.get_planet("Earth").unwrap();
        let pos = body.position();
        assert_relative_eq!((pos.x * pos.x + pos.z * pos.z).sqrt(), 13.0, epsilon = 1e-9);
        assert_eq!(pos.y, 0.0);
        assert!((0.0..TAU).contains(&body.current_angle));
        assert!((0.0..TAU).contains(&body.rotation_angle));
    }

    #[test]
    fn test_reregistration_replaces() {
        let mut m = mechanics();
        m.add_orbiting_body(SceneTransform::default(), &earth()).unwrap();
        let again = m.add_orbiting_body(SceneTransform::default(), &earth());
        assert_eq!(again, Ok(Registration::Replaced));
        assert_eq!(m.get_planet_names(), vec!["earth"]);
    }

    #[test]
    fn test_sun_and_nameless_are_rejected() {
        let recorder = Recorder::default();
        let mut m = OrbitalMechanics::with_seed(OrbitalConfig::default(), 1)
            .with_diagnostics(recorder.clone());
        m.init();

        let sun = PlanetData::new("Sun", 0.0, 0.0, 609.12);
        assert_eq!(
            m.add_orbiting_body(SceneTransform::default(), &sun),
            Err(RegistrationError::Sun)
        );
        let blank = PlanetData::new("   ", 1.0, 100.0, 10.0);
        assert_eq!(
            m.add_orbiting_body(SceneTransform::default(), &blank),
            Err(RegistrationError::MissingName)
        );
        assert!(!m.has_planet("sun"));
        assert!(m.get_planet_names().is_empty());
        assert!(m.paths().is_empty());

        let log = recorder.0.lock().unwrap();
        let skipped = log
            .iter()
            .filter(|d| matches!(d, Diagnostic::RegistrationSkipped { .. }))
            .count();
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_non_finite_position_warns_once_per_body() {
        let recorder = Recorder::default();
        let mut m = OrbitalMechanics::with_seed(OrbitalConfig::default(), 3)
            .with_diagnostics(recorder.clone());
        m.init();
        m.add_orbiting_body(SceneTransform::default(), &earth()).unwrap();
        let placed = m.get_planet_position("earth").unwrap();

        if let Some(body) = m.registry.iter_mut().next() {
            body.params.radius = f64::NAN;
        }
        for _ in 0..5 {
            m.update(0.1, 1.0);
        }

        let count = |recorder: &Recorder| {
            recorder
                .0
                .lock()
                .unwrap()
                .iter()
                .filter(|d| matches!(d, Diagnostic::NonFinitePosition { .. }))
                .count()
        };
        assert_eq!(count(&recorder), 1);
        assert_eq!(m.get_planet_position("earth"), Some(placed));

        // A fresh registration may warn again.
        m.add_orbiting_body(SceneTransform::default(), &earth()).unwrap();
        if let Some(body) = m.registry.iter_mut().next() {
            body.params.radius = f64::NAN;
        }
        m.update(0.1, 1.0);
        assert_eq!(count(&recorder), 2);
    }

    #[test]
    fn test_update_before_init_is_a_noop() {
        let recorder = Recorder::default();
        let mut m = OrbitalMechanics::with_seed(OrbitalConfig::default(), 1)
            .with_diagnostics(recorder.clone());
        m.add_orbiting_body(SceneTransform::default(), &earth()).unwrap();
        let angle = m.get_planet("earth").unwrap().current_angle;

        m.update(0.016, 1.0);
        m.update(0.016, 1.0);

        assert_eq!(m.elapsed_days(), 0.0);
        assert_eq!(m.get_planet("earth").unwrap().current_angle, angle);
        let warnings = recorder
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|d| **d == Diagnostic::UpdateBeforeInit)
            .count();
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_retrograde_spin_decreases_angle() {
        let mut m = mechanics();
        let venus = PlanetData::new("Venus", 0.723, 224.7, -5832.5);
        m.add_orbiting_body(SceneTransform::default(), &venus).unwrap();
        let before = m.get_planet("venus").unwrap().rotation_angle;
        m.update(0.016, 1.0);
        let after = m.get_planet("venus").unwrap().rotation_angle;

        let delta = wrap_angle(before - after);
        assert!(delta > 0.0 && delta < 0.1, "delta {delta}");
    }

    #[test]
    fn test_synced_children_follow_spin() {
        let mut m = mechanics();
        let saturn = PlanetData::new("Saturn", 9.537, 10759.22, 10.66);
        m.add_orbiting_body(SceneTransform::default().with_child("rings"), &saturn)
            .unwrap();
        m.update(0.5, 1.0);

        let body = m.get_planet("saturn").unwrap();
        let rings = body.transform.child("rings").unwrap();
        assert_eq!(rings.rotation_y, body.rotation_angle);
        assert_eq!(body.transform.rotation_y, body.rotation_angle);
    }

    #[test]
    fn test_missing_children_are_ignored() {
        let mut m = mechanics();
        let saturn = PlanetData::new("Saturn", 9.537, 10759.22, 10.66);
        m.add_orbiting_body(SceneTransform::default(), &saturn).unwrap();
        m.update(0.5, 1.0);
        assert!(m.get_planet("saturn").unwrap().transform.children.is_empty());
    }

    #[test]
    fn test_distant_body_is_smoothed() {
        let mut m = mechanics();
        let neptune = PlanetData::new("Neptune", 30.069, 60182.0, 16.11);
        m.add_orbiting_body(SceneTransform::default(), &neptune).unwrap();
        m.update(1.0, 1.0);

        let body = m.get_planet("neptune").unwrap();
        let target = body.target_position;
        let actual = body.position();
        assert_ne!(target, actual);
        assert_eq!(body.previous_position, actual);
        assert!(actual.distance(target) < body.params.radius * 0.1);
    }

    #[test]
    fn test_near_body_snaps() {
        let mut m = mechanics();
        m.add_orbiting_body(SceneTransform::default(), &earth()).unwrap();
        m.update(1.0, 1.0);
        let body = m.get_planet("earth").unwrap();
        assert_eq!(body.position(), body.target_position);
    }

    #[test]
    fn test_remove_drops_path() {
        let mut m = mechanics();
        m.add_orbiting_body(SceneTransform::default(), &earth()).unwrap();
        assert!(m.paths().get("earth").is_some());
        assert!(m.remove_orbiting_body("EARTH").is_some());
        assert!(m.paths().get("earth").is_none());
        assert!(m.remove_orbiting_body("earth").is_none());
    }

    #[test]
    #[allow(deprecated)]
    fn test_set_playing_matches_set_speed() {
        let mut m = mechanics();
        m.set_playing(false);
        assert!(m.is_paused());
        m.set_playing(true);
        assert_eq!(m.speed(), 1.0);
    }

    #[test]
    fn test_performance_mode_reports_rebuild() {
        let recorder = Recorder::default();
        let mut m = OrbitalMechanics::with_seed(OrbitalConfig::default(), 3)
            .with_diagnostics(recorder.clone());
        m.init();
        m.add_orbiting_body(SceneTransform::default(), &earth()).unwrap();
        m.set_performance_mode(true);
        m.set_performance_mode(true);

        let rebuilt: Vec<_> = recorder
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|d| matches!(d, Diagnostic::PathsRebuilt { .. }))
            .cloned()
            .collect();
        assert_eq!(
            rebuilt,
            vec![Diagnostic::PathsRebuilt {
                paths: 1,
                segments: 48
            }]
        );
        assert!(m.get_stats().performance_mode);
    }

    #[test]
    fn test_dispose_is_idempotent_and_reinitializable() {
        let mut m = mechanics();
        m.add_orbiting_body(SceneTransform::default(), &earth()).unwrap();
        m.update(1.0, 1.0);

        m.dispose();
        m.dispose();
        let stats = m.get_stats();
        assert!(!stats.initialized);
        assert_eq!(stats.body_count, 0);
        assert_eq!(stats.path_count, 0);
        assert_eq!(stats.elapsed_days, 0.0);

        m.update(1.0, 1.0);
        assert_eq!(m.elapsed_days(), 0.0);

        m.init();
        m.add_orbiting_body(SceneTransform::default(), &earth()).unwrap();
        m.update(1.0, 1.0);
        assert!(m.elapsed_days() > 0.0);
    }

    #[test]
    fn test_stats_report_clock() {
        let mut m = mechanics();
        m.add_orbiting_body(SceneTransform::default(), &earth()).unwrap();
        m.update(2.0, 1.0);
        let stats = m.get_stats();
        assert_eq!(stats.body_count, 1);
        assert_eq!(stats.path_count, 1);
        assert_relative_eq!(stats.elapsed_days, 40.0, epsilon = 1e-12);
        assert_eq!(stats.formatted_time, "1m 9d");
        assert!(!stats.paused);
    }

    #[test]
    fn test_snapshots_cover_every_body() {
        let mut m = mechanics();
        for planet in crate::planets::solar_system() {
            let _ = m.add_orbiting_body(SceneTransform::default(), &planet);
        }
        let data = m.get_all_orbital_data();
        assert_eq!(data.len(), 9);
        assert!(data.iter().all(|s| s.key != "sun"));
        assert_eq!(m.body_positions().len(), 9);
    }
}
