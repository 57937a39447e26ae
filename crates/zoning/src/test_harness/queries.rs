//! Queries and assertions for `TestZoning`.

use bevy::prelude::*;

use crate::depth::{DepthPair, ZoningDepth, ZoningPreview};
use crate::host::{Highlighted, ToolSound, ToolSoundEvent, ToolSystem, ValidArea, ZoneBlock};
use crate::tool::ZoningToolState;
use crate::ui_bridge::UiBindings;
use crate::zoning_mode::{RoadZoningMode, ToolZoningMode, ZoningMode};

use super::TestZoning;

impl TestZoning {
    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn committed(&self, road: Entity) -> Option<DepthPair> {
        self.world().get::<ZoningDepth>(road).map(|d| d.0)
    }

    pub fn preview(&self, road: Entity) -> Option<DepthPair> {
        self.world().get::<ZoningPreview>(road).map(|p| p.0)
    }

    pub fn is_highlighted(&self, road: Entity) -> bool {
        self.world().get::<Highlighted>(road).is_some()
    }

    /// `(size.y, valid_area.max_z)` of a block.
    pub fn block_geometry(&self, block: Entity) -> Option<(i32, i32)> {
        let world = self.world();
        let size = world.get::<ZoneBlock>(block)?.size;
        let area = world.get::<ValidArea>(block)?;
        Some((size.y, area.max_z))
    }

    pub fn tool_state(&self) -> &ZoningToolState {
        self.world().resource::<ZoningToolState>()
    }

    pub fn tool_mode(&self) -> ZoningMode {
        self.world().resource::<ToolZoningMode>().0
    }

    pub fn road_mode(&self) -> ZoningMode {
        self.world().resource::<RoadZoningMode>().0
    }

    pub fn tools(&self) -> &ToolSystem {
        self.world().resource::<ToolSystem>()
    }

    pub fn bindings(&self) -> &UiBindings {
        self.world().resource::<UiBindings>()
    }

    /// Sounds requested since the last call.
    pub fn drain_sounds(&mut self) -> Vec<ToolSound> {
        self.world_mut()
            .resource_mut::<Events<ToolSoundEvent>>()
            .drain()
            .map(|e| e.0)
            .collect()
    }

    /// Number of roads carrying a preview record.
    pub fn preview_count(&mut self) -> usize {
        let world = self.world_mut();
        world.query::<&ZoningPreview>().iter(world).count()
    }

    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    /// Assert both geometry fields of a block hold `depth`.
    pub fn assert_block_depth(&self, block: Entity, depth: i32) {
        let geometry = self.block_geometry(block);
        assert_eq!(
            geometry,
            Some((depth, depth)),
            "Expected block {block} at depth {depth}, got (size.y, max_z) = {geometry:?}"
        );
    }

    pub fn assert_no_preview(&self, road: Entity) {
        let preview = self.preview(road);
        assert!(
            preview.is_none(),
            "Expected no preview on {road}, found {preview:?}"
        );
    }
}
