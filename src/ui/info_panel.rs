//! Orbital data panel.
//!
//! Floating window listing every orbiting body with its scene radius, period,
//! speed and spin, plus the core's summary stats.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::orbital::{OrbitTransform, OrbitingBody};
use crate::simulation::{Belt, Orrery};
use crate::ui::icons;

/// Resource for info panel visibility.
#[derive(Resource)]
pub struct InfoPanelState {
    pub open: bool,
}

impl Default for InfoPanelState {
    fn default() -> Self {
        Self { open: true }
    }
}

/// One table row, precomputed so the UI closure stays simple.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRow {
    pub name: String,
    pub radius: String,
    /// Orbital period: days under a year, years otherwise.
    pub period: String,
    pub angular_velocity: String,
    /// Signed rotation period in days.
    pub day: String,
    pub spin: &'static str,
}

impl<T: OrbitTransform> From<&OrbitingBody<T>> for BodyRow {
    fn from(body: &OrbitingBody<T>) -> Self {
        let years = body.data.orbital_period_years();
        let period = if years >= 1.0 {
            format!("{years:.2} y")
        } else {
            format!("{:.0} d", body.data.orbital_period)
        };
        Self {
            name: body.data.name.clone(),
            radius: format!("{:.1}", body.params.radius),
            period,
            angular_velocity: format!("{:.4}", body.params.angular_velocity),
            day: format!("{:.2} d", body.data.rotation_period_days()),
            spin: if body.params.is_retrograde { "retro" } else { "pro" },
        }
    }
}

/// Rows sorted by orbital radius, innermost first.
pub fn body_rows<'a, T: OrbitTransform + 'a>(
    bodies: impl IntoIterator<Item = &'a OrbitingBody<T>>,
) -> Vec<BodyRow> {
    let mut bodies: Vec<_> = bodies.into_iter().collect();
    bodies.sort_by(|a, b| a.params.radius.total_cmp(&b.params.radius));
    bodies.into_iter().map(BodyRow::from).collect()
}

pub fn info_panel_system(
    mut contexts: EguiContexts,
    orrery: Res<Orrery>,
    belt: Res<Belt>,
    mut state: ResMut<InfoPanelState>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut open = state.open;
    egui::Window::new(format!("{} Orbits", icons::PLANET))
        .open(&mut open)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
        .show(ctx, |ui| {
            let stats = orrery.get_stats();
            ui.label(format!(
                "{} bodies, {} paths{}",
                stats.body_count,
                stats.path_count,
                if stats.performance_mode { " (performance)" } else { "" }
            ));
            ui.label(format!(
                "{:.1} days/s at {}x",
                stats.base_time_scale,
                stats.speed
            ));
            if let Some(bounds) = belt.bounds() {
                ui.label(format!(
                    "Belt {:.1}..{:.1}",
                    bounds.inner_radius, bounds.outer_radius
                ));
            }
            ui.separator();

            egui::Grid::new("orbit_grid")
                .num_columns(6)
                .striped(true)
                .show(ui, |ui| {
                    for heading in ["Body", "Radius", "Period", "rad/day", "Day", "Spin"] {
                        ui.label(egui::RichText::new(heading).strong());
                    }
                    ui.end_row();

                    for row in body_rows(orrery.bodies()) {
                        ui.label(row.name);
                        ui.label(egui::RichText::new(row.radius).monospace());
                        ui.label(egui::RichText::new(row.period).monospace());
                        ui.label(egui::RichText::new(row.angular_velocity).monospace());
                        ui.label(egui::RichText::new(row.day).monospace());
                        ui.label(row.spin);
                        ui.end_row();
                    }
                });
        });
    state.open = open;
}
