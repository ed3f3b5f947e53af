//! Orrery - Animated Solar System
//!
//! A desktop application showing the planets on compressed circular orbits,
//! with playback controls and an asteroid belt that follows Mars and Jupiter.
//!
//! Usage: `orrery [CONFIG.json] [PLANETS.json]`

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orrery::camera::CameraPlugin;
use orrery::config::OrbitalConfig;
use orrery::input::InputPlugin;
use orrery::planets::{load_planets, solar_system};
use orrery::render::RenderPlugin;
use orrery::simulation::{OrbitalPlugin, PlanetCatalog};
use orrery::ui::UiPlugin;

fn main() {
    let mut args = std::env::args().skip(1);
    let config_path = args.next();
    let planets_path = args.next();

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orrery".into(),
            ..default()
        }),
        ..default()
    }));

    // Logging is only available once LogPlugin is in.
    let config = match config_path {
        Some(path) => OrbitalConfig::load(&path).unwrap_or_else(|err| {
            warn!("Could not load config {}: {}; using defaults", path, err);
            OrbitalConfig::default()
        }),
        None => OrbitalConfig::default(),
    };
    let planets = match planets_path {
        Some(path) => load_planets(&path).unwrap_or_else(|err| {
            warn!("Could not load planets {}: {}; using built-in catalog", path, err);
            solar_system()
        }),
        None => solar_system(),
    };

    app.add_plugins(EguiPlugin::default())
        // Insert resources before plugins that depend on them
        .insert_resource(PlanetCatalog(planets))
        .add_plugins((
            OrbitalPlugin { config, seed: None },
            CameraPlugin,
            RenderPlugin,
            InputPlugin,
            UiPlugin,
        ))
        .run();
}
