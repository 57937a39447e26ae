use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod zone_change_panel;

/// egui front end for the zoning tool. Widgets only read `UiBindings` and
/// send `UiTrigger` events; all state lives in the `zoning` crate.
pub struct ZoningUiPlugin;

impl Plugin for ZoningUiPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin);
        }
        app.add_systems(
            Update,
            zone_change_panel::zone_change_panel_ui.after(zoning::ZoningSet::Tool),
        );
    }
}
