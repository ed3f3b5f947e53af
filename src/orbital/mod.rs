//! Orbital animation core.
//!
//! Converts planet records to scene-space circular orbits and advances them
//! once per frame. Nothing in here knows about entities or meshes: bodies are
//! written through the [`OrbitTransform`] contract and the Bevy adapter in
//! [`crate::render`] copies the result onto the scene.

mod body;
mod clock;
mod diagnostics;
mod mechanics;
mod paths;
mod registry;
mod scale;
mod transform;

#[cfg(test)]
mod proptest_orbital;

pub use body::{OrbitalParameters, OrbitalSnapshot, OrbitingBody};
pub use clock::SimulationClock;
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, RegistrationError, Severity, SilentSink};
pub use mechanics::{OrbitalMechanics, OrbitalStats, Registration};
pub use paths::{OrbitPath, OrbitPaths, RingGeometry};
pub use registry::OrbitalRegistry;
pub use scale::{angular_velocity, compute_orbital_parameters, orbital_radius, rotation_velocity};
pub use transform::{OrbitTransform, SceneTransform};
