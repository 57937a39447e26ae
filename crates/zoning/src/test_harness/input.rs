//! Cursor, button and host-tool controls for `TestZoning`.

use bevy::prelude::*;

use crate::host::{
    ActivePrefab, CursorRaycast, PhotoMode, RaycastError, ToolHandle, ToolSystem,
};
use crate::tool::ToolActivation;
use crate::ui_bridge::UiTrigger;
use crate::zoning_mode::{RoadZoningMode, ToolZoningMode, ZoningMode};

use super::TestZoning;

impl TestZoning {
    // -----------------------------------------------------------------------
    // Host tool
    // -----------------------------------------------------------------------

    /// Enable the zoning tool the way the toggle action does.
    pub fn activate_tool(&mut self) {
        self.world_mut()
            .resource_scope(|world, mut activation: Mut<ToolActivation>| {
                let mut tools = world.resource_mut::<ToolSystem>();
                activation.set_tool_enabled(&mut tools, true);
            });
    }

    /// The host switches to another tool behind the zoning tool's back.
    pub fn switch_host_tool(&mut self, tool: ToolHandle) {
        self.world_mut().resource_mut::<ToolSystem>().active_tool = tool;
    }

    pub fn set_active_prefab(&mut self, prefab: Option<ActivePrefab>) {
        self.world_mut().resource_mut::<ToolSystem>().active_prefab = prefab;
    }

    pub fn set_tool_mode(&mut self, mode: ZoningMode) {
        self.world_mut().resource_mut::<ToolZoningMode>().0 = mode;
    }

    pub fn set_road_mode(&mut self, mode: ZoningMode) {
        self.world_mut().resource_mut::<RoadZoningMode>().0 = mode;
    }

    pub fn set_photo_mode(&mut self, enabled: bool) {
        self.world_mut().resource_mut::<PhotoMode>().enabled = enabled;
    }

    pub fn send_trigger(&mut self, trigger: UiTrigger) {
        self.world_mut().send_event(trigger);
    }

    // -----------------------------------------------------------------------
    // Cursor
    // -----------------------------------------------------------------------

    pub fn hover(&mut self, entity: Entity) {
        self.world_mut()
            .insert_resource(CursorRaycast::hit(entity, Vec3::ZERO));
    }

    pub fn hover_nothing(&mut self) {
        self.world_mut().insert_resource(CursorRaycast::default());
    }

    pub fn fail_raycast(&mut self) {
        self.world_mut().insert_resource(CursorRaycast {
            result: Err(RaycastError::Failed("terrain not ready".into())),
        });
    }

    // -----------------------------------------------------------------------
    // Buttons
    // -----------------------------------------------------------------------

    pub fn press_primary(&mut self) {
        self.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
    }

    pub fn release_primary(&mut self) {
        self.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(MouseButton::Left);
    }

    /// Press and immediately release the secondary button.
    pub fn click_secondary(&mut self) {
        let mut mouse = self.world_mut().resource_mut::<ButtonInput<MouseButton>>();
        mouse.press(MouseButton::Right);
        mouse.release(MouseButton::Right);
    }

    /// Press a key together with Shift.
    pub fn press_shifted(&mut self, key: KeyCode) {
        let mut keys = self.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.press(KeyCode::ShiftLeft);
        keys.press(key);
    }

    pub fn release_all_keys(&mut self) {
        self.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release_all();
    }

    /// Hover `road`, then press and release primary over it.
    pub fn click_road(&mut self, road: Entity) {
        self.hover(road);
        self.tick(1);
        self.press_primary();
        self.tick(1);
        self.release_primary();
        self.tick(1);
    }
}
