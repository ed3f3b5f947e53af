//! Rendering systems for the orrery.
//!
//! This module provides the visual representation of the Sun and planets,
//! orbit paths, the asteroid belt, and background elements. Per-frame
//! position sync lives in [`sync`] and is scheduled by the simulation plugin.

mod background;
pub mod belt;
pub mod bodies;
mod orbits;
pub mod sync;

use bevy::prelude::*;

use self::background::BackgroundPlugin;
use self::belt::BeltRenderPlugin;
use self::bodies::CelestialBodyPlugin;
use self::orbits::OrbitPathPlugin;

pub use self::belt::BeltRenderSettings;
pub use self::bodies::Sun;
pub use self::sync::{OrbitChild, OrbitalBody};

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            CelestialBodyPlugin,
            BackgroundPlugin,
            OrbitPathPlugin,
            BeltRenderPlugin,
        ));
    }
}
