use bevy::prelude::*;

pub mod depth;
pub mod host;
pub mod reconcile;
pub mod road_creation;
pub mod settings;
pub mod tool;
pub mod ui_bridge;
pub mod zoning_mode;
pub mod zoning_sets;

mod plugin_registration;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use depth::{DepthPair, ZoningDepth, ZoningPreview, MAX_ZONING_DEPTH};
pub use settings::ZoningSettings;
pub use zoning_mode::{RoadZoningMode, ToolZoningMode, ZoningMode};
pub use zoning_sets::ZoningSet;

/// Road-side zoning depth: the interactive tool, new-road seeding, the block
/// reconciler and the UI bindings.
///
/// Host input resources (`ButtonInput<MouseButton>`, `ButtonInput<KeyCode>`)
/// are initialized if the embedding app has not done so already. The host
/// singletons in [`host`] are expected to be inserted by the host.
pub struct ZoningPlugin;

impl Plugin for ZoningPlugin {
    fn build(&self, app: &mut App) {
        zoning_sets::configure_zoning_sets(app);

        app.init_resource::<ZoningSettings>()
            .init_resource::<ToolZoningMode>()
            .init_resource::<RoadZoningMode>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ButtonInput<KeyCode>>();

        plugin_registration::register_feature_plugins(app);
    }
}
