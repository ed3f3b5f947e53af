//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use orrery::config::OrbitalConfig;
use orrery::orbital::{Diagnostic, DiagnosticSink, OrbitalMechanics, SceneTransform, SilentSink};
use orrery::planets::PlanetData;

pub const SEED: u64 = 42;

/// Initialized core with default config, fixed seed, and no logging.
pub fn mechanics() -> OrbitalMechanics {
    mechanics_with(OrbitalConfig::default())
}

pub fn mechanics_with(config: OrbitalConfig) -> OrbitalMechanics {
    let mut mechanics = OrbitalMechanics::with_seed(config, SEED).with_diagnostics(SilentSink);
    mechanics.init();
    mechanics
}

pub fn earth() -> PlanetData {
    PlanetData::new("Earth", 1.0, 365.25, 24.0)
}

pub fn mars() -> PlanetData {
    PlanetData::new("Mars", 1.524, 686.98, 24.62)
}

pub fn jupiter() -> PlanetData {
    PlanetData::new("Jupiter", 5.204, 4332.59, 9.93)
}

pub fn neptune() -> PlanetData {
    PlanetData::new("Neptune", 30.069, 60182.0, 16.11)
}

pub fn venus() -> PlanetData {
    PlanetData::new("Venus", 0.723, 224.7, -243.0 * 24.0)
}

/// Register a body with a plain transform, panicking on rejection.
pub fn register(mechanics: &mut OrbitalMechanics, data: &PlanetData) {
    mechanics
        .add_orbiting_body(SceneTransform::default(), data)
        .expect("body should register");
}

/// Sink that keeps every diagnostic for later inspection.
#[derive(Clone, Default)]
pub struct RecordingSink(pub Arc<Mutex<Vec<Diagnostic>>>);

impl RecordingSink {
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.0.lock().unwrap().push(diagnostic.clone());
    }
}
