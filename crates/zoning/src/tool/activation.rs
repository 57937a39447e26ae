//! Switching the zoning tool on and off.
//!
//! Enabling remembers which host tool was active so disabling can hand
//! control back to it.

use bevy::prelude::*;

use crate::host::{ToolHandle, ToolSystem};
use crate::settings::ZoningSettings;

/// Tool that was active before the zoning tool took over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviousTool {
    #[default]
    NoTool,
    DefaultTool,
    OtherTool(ToolHandle),
}

impl PreviousTool {
    fn remember(active: ToolHandle) -> Self {
        match active {
            ToolHandle::Default => PreviousTool::DefaultTool,
            ToolHandle::ZoningController => PreviousTool::NoTool,
            other => PreviousTool::OtherTool(other),
        }
    }

    /// Tool to reactivate when the zoning tool is disabled. Falls back to the
    /// default tool when nothing usable was recorded.
    pub fn restore_target(self) -> ToolHandle {
        match self {
            PreviousTool::OtherTool(handle) if handle != ToolHandle::ZoningController => handle,
            _ => ToolHandle::Default,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct ToolActivation {
    pub previous: PreviousTool,
}

impl ToolActivation {
    /// Activate or deactivate the zoning tool. Requests that match the
    /// current state do nothing.
    pub fn set_tool_enabled(&mut self, tools: &mut ToolSystem, enabled: bool) {
        let active = tools.is_active(ToolHandle::ZoningController);
        if enabled == active {
            return;
        }
        if enabled {
            self.previous = PreviousTool::remember(tools.active_tool);
            tools.active_tool = ToolHandle::ZoningController;
            info!("zoning tool enabled");
        } else {
            tools.active_tool = self.previous.restore_target();
            self.previous = PreviousTool::NoTool;
            info!("zoning tool disabled, restored {:?}", tools.active_tool);
        }
    }

    /// Flip activation. Returns whether the tool is now enabled.
    pub fn toggle_tool(&mut self, tools: &mut ToolSystem) -> bool {
        let enable = !tools.is_active(ToolHandle::ZoningController);
        self.set_tool_enabled(tools, enable);
        enable
    }
}

/// Toggle the tool on the configured hotkey.
pub fn toggle_tool_hotkey(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<ZoningSettings>,
    tools: Option<ResMut<ToolSystem>>,
    mut activation: ResMut<ToolActivation>,
) {
    if !settings.toggle_tool_binding.just_pressed(&keys) {
        return;
    }
    let Some(mut tools) = tools else {
        warn!("zoning tool hotkey pressed before the host tool system exists");
        return;
    };
    activation.toggle_tool(&mut tools);
}
