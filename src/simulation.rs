//! Bevy integration of the orbital core.
//!
//! [`OrbitalPlugin`] owns the per-frame pipeline: advance the clock and every
//! orbit, copy the results onto entities, then let the asteroid belt react to
//! the committed positions. It needs nothing beyond `MinimalPlugins`, so the
//! whole pipeline runs headless in tests.

use bevy::prelude::*;

use crate::belt::AsteroidBelt;
use crate::config::OrbitalConfig;
use crate::orbital::OrbitalMechanics;
use crate::planets::{PlanetData, solar_system};
use crate::render::sync::sync_orbit_transforms;

/// The orbital core as a Bevy resource.
#[derive(Resource, Deref, DerefMut)]
pub struct Orrery(pub OrbitalMechanics);

/// The asteroid belt band and its scattered field.
#[derive(Resource, Deref, DerefMut)]
pub struct Belt(pub AsteroidBelt);

/// Active configuration, kept for systems that spawn or draw from it.
#[derive(Resource, Clone, Debug, Default, Deref)]
pub struct OrbitalSettings(pub OrbitalConfig);

/// Planet records to spawn at startup.
#[derive(Resource, Clone, Debug, Deref)]
pub struct PlanetCatalog(pub Vec<PlanetData>);

impl Default for PlanetCatalog {
    fn default() -> Self {
        Self(solar_system())
    }
}

/// Per-frame orbital pipeline, in order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrbitalSet {
    Advance,
    Sync,
    Dependents,
}

/// Plugin providing the orbital simulation.
///
/// Adds:
/// - `Orrery`, `Belt`, `OrbitalSettings` resources (and a default `PlanetCatalog`)
/// - `advance_orbits` → `sync_orbit_transforms` → `recalculate_belt` in `Update`
#[derive(Default)]
pub struct OrbitalPlugin {
    pub config: OrbitalConfig,
    /// Fixed seed for reproducible starting angles. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        let config = self.config.clone().sanitized();
        let mut mechanics = match self.seed {
            Some(seed) => OrbitalMechanics::with_seed(config.clone(), seed),
            None => OrbitalMechanics::new(config.clone()),
        };
        mechanics.init();

        app.insert_resource(Orrery(mechanics))
            .insert_resource(Belt(AsteroidBelt::new(config.belt.clone())))
            .insert_resource(OrbitalSettings(config))
            .init_resource::<PlanetCatalog>()
            .configure_sets(
                Update,
                (OrbitalSet::Advance, OrbitalSet::Sync, OrbitalSet::Dependents).chain(),
            )
            .add_systems(
                Update,
                (
                    advance_orbits.in_set(OrbitalSet::Advance),
                    sync_orbit_transforms.in_set(OrbitalSet::Sync),
                    recalculate_belt.in_set(OrbitalSet::Dependents),
                ),
            );
    }
}

/// Advance the clock and every registered orbit by this frame's wall time.
pub fn advance_orbits(mut orrery: ResMut<Orrery>, time: Res<Time>) {
    orrery.tick(time.delta_secs_f64());
}

/// Re-derive the belt band from the positions committed this frame.
pub fn recalculate_belt(orrery: Res<Orrery>, mut belt: ResMut<Belt>) {
    if belt.recalculate(&orrery.body_positions()) {
        if let Some(bounds) = belt.built_bounds() {
            debug!(
                "Rebuilt asteroid belt: {:.2}..{:.2} ({} asteroids)",
                bounds.inner_radius,
                bounds.outer_radius,
                belt.asteroids().len()
            );
        }
    }
}

/// Rewind the simulation and reseat every body.
///
/// Shared by the reset button and the `R` shortcut.
pub fn reset_simulation(orrery: &mut Orrery, belt: &mut Belt) {
    orrery.reset_positions();
    belt.clear();
    info!("Simulation reset");
}
