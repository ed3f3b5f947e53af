//! Dock (bottom bar) for the playback controls.
//!
//! The dock provides a single horizontal strip with:
//! - Play/Pause toggle
//! - Elapsed simulated time
//! - Speed presets
//! - Orbit path and performance toggles
//! - Reset and help buttons

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::input::{Playback, SPEED_PRESETS};
use crate::simulation::{Belt, Orrery, reset_simulation};
use crate::ui::icons;

/// Colors for the dock UI.
mod colors {
    use bevy_egui::egui::Color32;

    pub const DOCK_BG: Color32 = Color32::from_rgba_premultiplied(26, 26, 36, 240);
    pub const ACTIVE: Color32 = Color32::from_rgb(85, 221, 136);
    pub const INACTIVE: Color32 = Color32::from_rgb(120, 120, 130);
    pub const PLAY_ICON: Color32 = Color32::from_rgb(85, 221, 136);
    pub const PAUSE_ICON: Color32 = Color32::from_rgb(221, 170, 85);
    pub const TEXT: Color32 = Color32::from_rgb(220, 220, 230);
}

/// Resource for help tooltip visibility.
#[derive(Resource, Default)]
pub struct HelpTooltipState {
    pub visible: bool,
}

/// System that renders the dock at the bottom.
pub fn dock_system(
    mut contexts: EguiContexts,
    mut orrery: ResMut<Orrery>,
    mut belt: ResMut<Belt>,
    mut playback: ResMut<Playback>,
    mut help_state: ResMut<HelpTooltipState>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::bottom("dock")
        .exact_height(56.0)
        .frame(
            egui::Frame::new()
                .fill(colors::DOCK_BG)
                .inner_margin(egui::Margin::symmetric(20, 10)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 16.0;

                render_play_pause(ui, &mut orrery, &mut playback);
                ui.separator();

                render_elapsed_time(ui, &orrery);
                ui.separator();

                render_speed_presets(ui, &mut orrery, &mut playback);
                ui.separator();

                render_path_toggles(ui, &mut orrery);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.spacing_mut().item_spacing.x = 10.0;

                    render_help_button(ui, &mut help_state);

                    let reset = egui::Button::new(egui::RichText::new(icons::RESET).size(18.0))
                        .min_size(egui::vec2(36.0, 32.0));
                    if ui.add(reset).on_hover_text("Reset positions (R)").clicked() {
                        reset_simulation(&mut orrery, &mut belt);
                    }
                });
            });
        });

    if help_state.visible {
        render_help_overlay(ctx);
    }
}

fn render_play_pause(ui: &mut egui::Ui, orrery: &mut Orrery, playback: &mut Playback) {
    let (icon, color, tooltip) = if orrery.is_paused() {
        (icons::PLAY, colors::PLAY_ICON, "Play (Space)")
    } else {
        (icons::PAUSE, colors::PAUSE_ICON, "Pause (Space)")
    };

    let button = egui::Button::new(egui::RichText::new(icon).size(22.0).color(color))
        .min_size(egui::vec2(40.0, 36.0));

    if ui.add(button).on_hover_text(tooltip).clicked() {
        playback.toggle(orrery);
    }
}

fn render_elapsed_time(ui: &mut egui::Ui, orrery: &Orrery) {
    let text = format!("{} {}", icons::CLOCK, orrery.formatted_time());
    ui.label(egui::RichText::new(text).monospace().size(14.0).color(colors::TEXT))
        .on_hover_text(format!("{:.2} years", orrery.elapsed_years()));
}

fn render_speed_presets(ui: &mut egui::Ui, orrery: &mut Orrery, playback: &mut Playback) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        for (i, speed) in SPEED_PRESETS.into_iter().enumerate() {
            let is_active = (playback.resume_speed - speed).abs() < 1e-9;
            let color = if is_active { colors::ACTIVE } else { colors::INACTIVE };

            let text = egui::RichText::new(format_speed(speed)).size(14.0).color(color);
            let text = if is_active { text.strong() } else { text };

            let button = egui::Button::new(text)
                .frame(is_active)
                .min_size(egui::vec2(40.0, 28.0));
            let tooltip = format!("{} speed (press {})", format_speed(speed), i + 1);

            if ui.add(button).on_hover_text(tooltip).clicked() {
                playback.select(orrery, speed);
            }
        }
    });
}

fn render_path_toggles(ui: &mut egui::Ui, orrery: &mut Orrery) {
    let visible = orrery.paths().visible();
    let color = if visible { colors::ACTIVE } else { colors::INACTIVE };
    let button = egui::Button::new(egui::RichText::new(icons::ORBIT).size(18.0).color(color))
        .min_size(egui::vec2(32.0, 32.0));
    if ui.add(button).on_hover_text("Orbit paths (O)").clicked() {
        orrery.set_paths_visible(!visible);
    }

    let mut opacity = orrery.paths().opacity() as f32;
    let slider = egui::Slider::new(&mut opacity, 0.0..=1.0)
        .show_value(false)
        .fixed_decimals(2);
    if ui
        .add_enabled(visible && !orrery.paths().performance_mode(), slider)
        .on_hover_text("Orbit path opacity")
        .changed()
    {
        orrery.set_path_opacity(opacity as f64);
    }

    let performance = orrery.paths().performance_mode();
    let color = if performance { colors::ACTIVE } else { colors::INACTIVE };
    let button =
        egui::Button::new(egui::RichText::new(icons::PERFORMANCE).size(18.0).color(color))
            .min_size(egui::vec2(32.0, 32.0));
    if ui.add(button).on_hover_text("Performance mode (P)").clicked() {
        orrery.set_performance_mode(!performance);
    }
}

fn render_help_button(ui: &mut egui::Ui, help_state: &mut HelpTooltipState) {
    let button = egui::Button::new(egui::RichText::new(icons::HELP).size(18.0))
        .min_size(egui::vec2(32.0, 32.0));

    let response = ui.add(button);
    if response.clicked() {
        help_state.visible = !help_state.visible;
    }
}

fn render_help_overlay(ctx: &egui::Context) {
    egui::Window::new("Keyboard Shortcuts")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-70.0, -70.0))
        .frame(
            egui::Frame::new()
                .fill(egui::Color32::from_rgba_premultiplied(26, 26, 36, 245))
                .inner_margin(egui::Margin::same(16))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(60, 60, 80))),
        )
        .show(ctx, |ui| {
            ui.spacing_mut().item_spacing.y = 6.0;

            let shortcuts = [
                ("Space", "Play/Pause"),
                ("[ / ]", "Halve / double speed"),
                ("1-4", "Speed presets"),
                ("R", "Reset positions"),
                ("O", "Toggle orbit paths"),
                ("P", "Toggle performance mode"),
                ("I", "Orbit data panel"),
                ("Scroll", "Zoom"),
                ("Right drag", "Swing camera"),
            ];

            egui::Grid::new("shortcuts_grid")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for (key, action) in shortcuts {
                        ui.label(egui::RichText::new(key).monospace().strong());
                        ui.label(action);
                        ui.end_row();
                    }
                });
        });
}

/// `0.25` → `"¼x"`, `4.0` → `"4x"`.
fn format_speed(speed: f64) -> String {
    if (speed - 0.25).abs() < 1e-9 {
        "¼x".to_string()
    } else if (speed - 0.5).abs() < 1e-9 {
        "½x".to_string()
    } else if speed.fract() == 0.0 {
        format!("{}x", speed as i64)
    } else {
        format!("{speed:.2}x")
    }
}
