//! Input handling for keyboard shortcuts.
//!
//! Provides keyboard controls for playback speed, reset, and orbit path
//! display. The dock exposes the same actions through [`Playback`].

use bevy::prelude::*;

use crate::simulation::{Belt, Orrery, reset_simulation};

/// Speed multipliers on the number keys 1–4 and the dock.
pub const SPEED_PRESETS: [f64; 4] = [0.25, 1.0, 4.0, 16.0];

pub const MIN_SPEED: f64 = 1.0 / 16.0;
pub const MAX_SPEED: f64 = 64.0;

/// Speed to restore when playback resumes.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Playback {
    pub resume_speed: f64,
}

impl Default for Playback {
    fn default() -> Self {
        Self { resume_speed: 1.0 }
    }
}

impl Playback {
    /// Pause if playing, resume at the remembered speed if paused.
    pub fn toggle(&mut self, orrery: &mut Orrery) {
        if orrery.is_paused() {
            orrery.set_speed(self.resume_speed);
        } else {
            self.resume_speed = orrery.speed();
            orrery.set_speed(0.0);
        }
    }

    /// Select a speed. While paused it only changes the speed resumed to.
    pub fn select(&mut self, orrery: &mut Orrery, speed: f64) {
        let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        self.resume_speed = speed;
        if !orrery.is_paused() {
            orrery.set_speed(speed);
        }
    }

    /// Multiply the current (or remembered) speed.
    pub fn scale(&mut self, orrery: &mut Orrery, factor: f64) {
        let base = if orrery.is_paused() {
            self.resume_speed
        } else {
            orrery.speed()
        };
        self.select(orrery, base * factor);
    }
}

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Playback>()
            .add_systems(Update, keyboard_shortcuts);
    }
}

/// Handle keyboard shortcuts for simulation control.
fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut orrery: ResMut<Orrery>,
    mut belt: ResMut<Belt>,
    mut playback: ResMut<Playback>,
) {
    // Space: toggle pause
    if keys.just_pressed(KeyCode::Space) {
        playback.toggle(&mut orrery);
        info!("Simulation {}", if orrery.is_paused() { "paused" } else { "running" });
    }

    // [ and ]: halve / double speed
    if keys.just_pressed(KeyCode::BracketLeft) {
        playback.scale(&mut orrery, 0.5);
        info!("Speed: {}x", playback.resume_speed);
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        playback.scale(&mut orrery, 2.0);
        info!("Speed: {}x", playback.resume_speed);
    }

    // 1-4: speed presets
    let preset_keys = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4];
    for (key, speed) in preset_keys.into_iter().zip(SPEED_PRESETS) {
        if keys.just_pressed(key) {
            playback.select(&mut orrery, speed);
            info!("Speed: {}x", speed);
        }
    }

    // R: reset positions
    if keys.just_pressed(KeyCode::KeyR) {
        reset_simulation(&mut orrery, &mut belt);
    }

    // O: orbit paths
    if keys.just_pressed(KeyCode::KeyO) {
        let visible = !orrery.paths().visible();
        orrery.set_paths_visible(visible);
        info!("Orbit paths {}", if visible { "shown" } else { "hidden" });
    }

    // P: performance mode
    if keys.just_pressed(KeyCode::KeyP) {
        let enabled = !orrery.paths().performance_mode();
        orrery.set_performance_mode(enabled);
        info!("Performance mode {}", if enabled { "on" } else { "off" });
    }
}
