use std::fmt;

use bevy::prelude::*;

use crate::zoning_mode::ZoningMode;

pub const CHANGE_ROAD_ZONING_MODE: &str = "ChangeRoadZoningMode";
pub const CHANGE_TOOL_ZONING_MODE: &str = "ChangeToolZoningMode";
pub const FLIP_TOOL_BOTH_MODE: &str = "FlipToolBothMode";
pub const FLIP_ROAD_BOTH_MODE: &str = "FlipRoadBothMode";
pub const TOGGLE_ZONE_CONTROLLER_TOOL: &str = "ToggleZoneControllerTool";
pub const TOGGLE_CONTOUR_LINES: &str = "ToggleContourLines";

/// Trigger fired by the UI layer, by name with an optional integer argument.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct UiTrigger {
    pub name: String,
    pub arg: Option<i32>,
}

impl UiTrigger {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg: None,
        }
    }

    pub fn with_arg(name: impl Into<String>, arg: i32) -> Self {
        Self {
            name: name.into(),
            arg: Some(arg),
        }
    }

    pub fn change_tool_mode(mode: ZoningMode) -> Self {
        Self::with_arg(CHANGE_TOOL_ZONING_MODE, mode.to_raw())
    }

    pub fn change_road_mode(mode: ZoningMode) -> Self {
        Self::with_arg(CHANGE_ROAD_ZONING_MODE, mode.to_raw())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    UnknownTrigger(String),
    MissingArgument(&'static str),
    /// Integer outside the `ZoningMode` range.
    InvalidMode(i32),
    /// The host tool system is not available yet.
    ToolUnavailable,
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::UnknownTrigger(name) => write!(f, "unknown UI trigger '{name}'"),
            BridgeError::MissingArgument(name) => {
                write!(f, "UI trigger '{name}' needs an integer argument")
            }
            BridgeError::InvalidMode(value) => write!(f, "{value} is not a zoning mode"),
            BridgeError::ToolUnavailable => write!(f, "host tool system is not available"),
        }
    }
}

impl std::error::Error for BridgeError {}

/// A validated UI trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerCommand {
    ChangeRoadZoningMode(ZoningMode),
    ChangeToolZoningMode(ZoningMode),
    FlipToolBothMode,
    FlipRoadBothMode,
    ToggleZoneControllerTool,
    ToggleContourLines,
}

fn mode_arg(trigger: &UiTrigger, name: &'static str) -> Result<ZoningMode, BridgeError> {
    let raw = trigger.arg.ok_or(BridgeError::MissingArgument(name))?;
    ZoningMode::from_raw(raw).ok_or(BridgeError::InvalidMode(raw))
}

impl TryFrom<&UiTrigger> for TriggerCommand {
    type Error = BridgeError;

    fn try_from(trigger: &UiTrigger) -> Result<Self, Self::Error> {
        Ok(match trigger.name.as_str() {
            CHANGE_ROAD_ZONING_MODE => {
                TriggerCommand::ChangeRoadZoningMode(mode_arg(trigger, CHANGE_ROAD_ZONING_MODE)?)
            }
            CHANGE_TOOL_ZONING_MODE => {
                TriggerCommand::ChangeToolZoningMode(mode_arg(trigger, CHANGE_TOOL_ZONING_MODE)?)
            }
            FLIP_TOOL_BOTH_MODE => TriggerCommand::FlipToolBothMode,
            FLIP_ROAD_BOTH_MODE => TriggerCommand::FlipRoadBothMode,
            TOGGLE_ZONE_CONTROLLER_TOOL => TriggerCommand::ToggleZoneControllerTool,
            TOGGLE_CONTOUR_LINES => TriggerCommand::ToggleContourLines,
            other => return Err(BridgeError::UnknownTrigger(other.to_string())),
        })
    }
}
