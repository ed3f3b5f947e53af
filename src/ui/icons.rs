//! Phosphor icon definitions for the UI.
//!
//! Icons are registered with egui via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

// Browse all icons at https://phosphoricons.com/

pub const PLAY: &str = egui_phosphor::regular::PLAY;
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
pub const RESET: &str = egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE;
pub const HELP: &str = egui_phosphor::regular::QUESTION;
pub const CLOCK: &str = egui_phosphor::regular::CLOCK;
/// Orbit path visibility
pub const ORBIT: &str = egui_phosphor::regular::CIRCLE_DASHED;
/// Performance mode
pub const PERFORMANCE: &str = egui_phosphor::regular::LIGHTNING;
pub const PLANET: &str = egui_phosphor::regular::GLOBE;
