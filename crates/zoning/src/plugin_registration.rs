use bevy::prelude::*;

use crate::*;

/// Register the zoning feature plugins, leaf first.
pub(crate) fn register_feature_plugins(app: &mut App) {
    app.add_plugins(road_creation::RoadCreationPlugin);
    app.add_plugins(reconcile::ReconcilePlugin);
    app.add_plugins(tool::ZoningToolPlugin);
    app.add_plugins(ui_bridge::UiBridgePlugin);
}
