//! User-facing settings of the zoning tool.
//!
//! The host's options menu owns the UI for these; the zoning systems only read
//! the [`ZoningSettings`] resource. Settings round-trip through JSON so the
//! host can keep them in its own settings file. Missing fields fall back to
//! their defaults.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// A key plus modifier flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: KeyCode,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyBinding {
    pub const fn shift(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: false,
            shift: true,
        }
    }

    /// True on the frame the key goes down with exactly the bound modifiers held.
    pub fn just_pressed(self, keys: &ButtonInput<KeyCode>) -> bool {
        if !keys.just_pressed(self.key) {
            return false;
        }
        let ctrl_held = keys.pressed(KeyCode::ControlLeft) || keys.pressed(KeyCode::ControlRight);
        let shift_held = keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);
        ctrl_held == self.ctrl && shift_held == self.shift
    }

    /// Label such as "Shift+KeyZ".
    pub fn display_label(self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(format!("{:?}", self.key));
        parts.join("+")
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoningSettings {
    /// Leave blocks alone when any of their cells is already zoned.
    pub protect_zoned_cells: bool,
    /// Leave blocks alone when any of their cells carries a building.
    pub protect_occupied_cells: bool,
    /// Hotkey toggling the zoning tool on and off.
    pub toggle_tool_binding: KeyBinding,
}

impl Default for ZoningSettings {
    fn default() -> Self {
        Self {
            protect_zoned_cells: true,
            protect_occupied_cells: true,
            toggle_tool_binding: KeyBinding::shift(KeyCode::KeyZ),
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Parse(serde_json::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "invalid zoning settings: {e}"),
            SettingsError::Serialize(e) => write!(f, "could not serialize zoning settings: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) | SettingsError::Serialize(e) => Some(e),
        }
    }
}

impl ZoningSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(SettingsError::Parse)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(SettingsError::Serialize)
    }

    /// Parse settings, falling back to defaults (with a warning) when the
    /// stored text is unreadable.
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("{e}; using default zoning settings");
                Self::default()
            }
        }
    }
}
