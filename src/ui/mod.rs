//! UI module providing the egui-based interface.

mod dock;
pub mod icons;
mod info_panel;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub use dock::HelpTooltipState;
pub use info_panel::{BodyRow, InfoPanelState, body_rows};

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HelpTooltipState>()
            .init_resource::<InfoPanelState>()
            .init_resource::<icons::FontsInitialized>()
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                (dock::dock_system, info_panel::info_panel_system)
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            )
            .add_systems(Update, toggle_info_panel);
    }
}

/// I: show or hide the orbital data panel.
fn toggle_info_panel(keys: Res<ButtonInput<KeyCode>>, mut state: ResMut<InfoPanelState>) {
    if keys.just_pressed(KeyCode::KeyI) {
        state.open = !state.open;
    }
}
