//! Value and trigger bindings between the zoning systems and the UI layer.
//!
//! Values are published into [`UiBindings`] under string keys; the UI sends
//! [`UiTrigger`] events back. Trigger failures are logged and dropped, they
//! never reach the caller.

mod trigger;

use std::collections::HashMap;

use bevy::prelude::*;

pub use trigger::{
    BridgeError, TriggerCommand, UiTrigger, CHANGE_ROAD_ZONING_MODE, CHANGE_TOOL_ZONING_MODE,
    FLIP_ROAD_BOTH_MODE, FLIP_TOOL_BOTH_MODE, TOGGLE_CONTOUR_LINES, TOGGLE_ZONE_CONTROLLER_TOOL,
};

use crate::host::{PhotoMode, Snap, ToolHandle, ToolSystem};
use crate::tool::{run_zoning_tool, ToolActivation};
use crate::zoning_mode::{RoadZoningMode, ToolZoningMode};
use crate::zoning_sets::ZoningSet;

pub const TOOL_ZONING_MODE: &str = "ToolZoningMode";
pub const ROAD_ZONING_MODE: &str = "RoadZoningMode";
pub const IS_ROAD_PREFAB: &str = "IsRoadPrefab";
pub const IS_PHOTO_MODE: &str = "IsPhotoMode";
pub const CONTOUR_ENABLED: &str = "ContourEnabled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingValue {
    Int(i32),
    Bool(bool),
}

/// Values the UI reads, keyed by binding name.
#[derive(Resource, Debug, Clone)]
pub struct UiBindings {
    values: HashMap<&'static str, BindingValue>,
}

impl Default for UiBindings {
    fn default() -> Self {
        let values = HashMap::from([
            (TOOL_ZONING_MODE, BindingValue::Int(ToolZoningMode::default().0.to_raw())),
            (ROAD_ZONING_MODE, BindingValue::Int(RoadZoningMode::default().0.to_raw())),
            (IS_ROAD_PREFAB, BindingValue::Bool(false)),
            (IS_PHOTO_MODE, BindingValue::Bool(false)),
            (CONTOUR_ENABLED, BindingValue::Bool(false)),
        ]);
        Self { values }
    }
}

impl UiBindings {
    pub fn get(&self, key: &str) -> Option<BindingValue> {
        self.values.get(key).copied()
    }

    pub fn int(&self, key: &str) -> Option<i32> {
        match self.get(key)? {
            BindingValue::Int(v) => Some(v),
            BindingValue::Bool(_) => None,
        }
    }

    /// Boolean binding; missing or non-boolean keys read as false.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some(BindingValue::Bool(true)))
    }

    pub fn set(&mut self, key: &'static str, value: BindingValue) {
        self.values.insert(key, value);
    }

    /// The tool-options panel shows while a road is being drawn or the
    /// zoning tool is active, and never in photo mode.
    pub fn panel_visible(&self) -> bool {
        self.flag(IS_ROAD_PREFAB) && !self.flag(IS_PHOTO_MODE)
    }
}

/// Write a binding only when its value changed, so readers can rely on
/// change detection.
fn publish(bindings: &mut ResMut<UiBindings>, key: &'static str, value: BindingValue) {
    if bindings.get(key) != Some(value) {
        bindings.set(key, value);
    }
}

pub struct UiBridgePlugin;

impl Plugin for UiBridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiBindings>()
            .init_resource::<ToolZoningMode>()
            .init_resource::<RoadZoningMode>()
            .init_resource::<ToolActivation>()
            .add_event::<UiTrigger>()
            .add_systems(Update, handle_ui_triggers.in_set(ZoningSet::Input))
            .add_systems(
                Update,
                publish_bindings
                    .after(run_zoning_tool)
                    .in_set(ZoningSet::Tool),
            );
    }
}

/// True when the zoning tool is active or a road prefab is being drawn.
pub fn is_road_prefab(tools: &ToolSystem) -> bool {
    tools.is_active(ToolHandle::ZoningController)
        || tools.active_prefab.as_ref().is_some_and(|p| p.is_road())
}

pub fn publish_bindings(
    tool_mode: Res<ToolZoningMode>,
    road_mode: Res<RoadZoningMode>,
    tools: Option<Res<ToolSystem>>,
    photo: Option<Res<PhotoMode>>,
    mut bindings: ResMut<UiBindings>,
) {
    publish(
        &mut bindings,
        TOOL_ZONING_MODE,
        BindingValue::Int(tool_mode.reported().to_raw()),
    );
    publish(
        &mut bindings,
        ROAD_ZONING_MODE,
        BindingValue::Int(road_mode.reported().to_raw()),
    );
    if let Some(tools) = tools.filter(|t| t.is_changed()) {
        publish(
            &mut bindings,
            IS_ROAD_PREFAB,
            BindingValue::Bool(is_road_prefab(&tools)),
        );
    }
    let photo_mode = photo.is_some_and(|p| p.enabled);
    publish(&mut bindings, IS_PHOTO_MODE, BindingValue::Bool(photo_mode));
}

/// Mutable state a trigger may touch.
pub struct TriggerTargets<'a> {
    pub tool_mode: &'a mut ToolZoningMode,
    pub road_mode: &'a mut RoadZoningMode,
    pub bindings: &'a mut UiBindings,
    pub tools: Option<&'a mut ToolSystem>,
    pub activation: &'a mut ToolActivation,
}

/// Flip the contour binding, then ask the active tool to follow it.
fn toggle_contour_lines(targets: &mut TriggerTargets<'_>) {
    let enabled = !targets.bindings.flag(CONTOUR_ENABLED);
    targets
        .bindings
        .set(CONTOUR_ENABLED, BindingValue::Bool(enabled));
    let Some(tools) = targets.tools.as_deref_mut() else {
        return;
    };
    if let Err(e) = tools.set_snap_flag(Snap::CONTOUR_LINES, enabled) {
        warn!("contour lines not applied: {e}");
    }
}

pub fn apply_trigger(
    trigger: &UiTrigger,
    targets: &mut TriggerTargets<'_>,
) -> Result<(), BridgeError> {
    match TriggerCommand::try_from(trigger)? {
        TriggerCommand::ChangeRoadZoningMode(mode) => targets.road_mode.0 = mode,
        TriggerCommand::ChangeToolZoningMode(mode) => targets.tool_mode.0 = mode,
        TriggerCommand::FlipToolBothMode => {
            targets.tool_mode.0 = targets.tool_mode.0.flipped_both();
        }
        TriggerCommand::FlipRoadBothMode => {
            targets.road_mode.0 = targets.road_mode.0.flipped_both();
        }
        TriggerCommand::ToggleZoneControllerTool => {
            let tools = targets
                .tools
                .as_deref_mut()
                .ok_or(BridgeError::ToolUnavailable)?;
            targets.activation.toggle_tool(tools);
        }
        TriggerCommand::ToggleContourLines => toggle_contour_lines(targets),
    }
    Ok(())
}

pub fn handle_ui_triggers(
    mut triggers: EventReader<UiTrigger>,
    mut tool_mode: ResMut<ToolZoningMode>,
    mut road_mode: ResMut<RoadZoningMode>,
    mut bindings: ResMut<UiBindings>,
    mut tools: Option<ResMut<ToolSystem>>,
    mut activation: ResMut<ToolActivation>,
) {
    for trigger in triggers.read() {
        let mut targets = TriggerTargets {
            tool_mode: &mut tool_mode,
            road_mode: &mut road_mode,
            bindings: &mut bindings,
            tools: tools.as_deref_mut(),
            activation: &mut activation,
        };
        match apply_trigger(trigger, &mut targets) {
            Ok(()) => debug!("handled UI trigger {}", trigger.name),
            Err(e) => warn!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ActivePrefab, PrefabKind};
    use crate::zoning_mode::ZoningMode;

    struct Fixture {
        tool_mode: ToolZoningMode,
        road_mode: RoadZoningMode,
        bindings: UiBindings,
        tools: ToolSystem,
        activation: ToolActivation,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                tool_mode: ToolZoningMode::default(),
                road_mode: RoadZoningMode::default(),
                bindings: UiBindings::default(),
                tools: ToolSystem::default(),
                activation: ToolActivation::default(),
            }
        }

        fn fire(&mut self, trigger: UiTrigger) -> Result<(), BridgeError> {
            let mut targets = TriggerTargets {
                tool_mode: &mut self.tool_mode,
                road_mode: &mut self.road_mode,
                bindings: &mut self.bindings,
                tools: Some(&mut self.tools),
                activation: &mut self.activation,
            };
            apply_trigger(&trigger, &mut targets)
        }
    }

    #[test]
    fn test_mode_triggers_write_their_own_instance() {
        let mut fx = Fixture::new();
        fx.fire(UiTrigger::change_road_mode(ZoningMode::LEFT)).unwrap();
        assert_eq!(fx.road_mode.0, ZoningMode::LEFT);
        assert_eq!(fx.tool_mode.0, ZoningMode::BOTH);

        fx.fire(UiTrigger::new(FLIP_TOOL_BOTH_MODE)).unwrap();
        assert_eq!(fx.tool_mode.0, ZoningMode::NONE);
        fx.fire(UiTrigger::new(FLIP_ROAD_BOTH_MODE)).unwrap();
        assert_eq!(fx.road_mode.0, ZoningMode::BOTH);
    }

    #[test]
    fn test_bad_trigger_leaves_state_alone() {
        let mut fx = Fixture::new();
        let err = fx
            .fire(UiTrigger::with_arg(CHANGE_TOOL_ZONING_MODE, 17))
            .unwrap_err();
        assert_eq!(err, BridgeError::InvalidMode(17));
        assert_eq!(fx.tool_mode.0, ZoningMode::BOTH);
    }

    #[test]
    fn test_toggle_tool_trigger() {
        let mut fx = Fixture::new();
        fx.fire(UiTrigger::new(TOGGLE_ZONE_CONTROLLER_TOOL)).unwrap();
        assert!(fx.tools.is_active(ToolHandle::ZoningController));
        fx.fire(UiTrigger::new(TOGGLE_ZONE_CONTROLLER_TOOL)).unwrap();
        assert!(fx.tools.is_active(ToolHandle::Default));
    }

    #[test]
    fn test_toggle_tool_without_host_is_error() {
        let mut fx = Fixture::new();
        let mut targets = TriggerTargets {
            tool_mode: &mut fx.tool_mode,
            road_mode: &mut fx.road_mode,
            bindings: &mut fx.bindings,
            tools: None,
            activation: &mut fx.activation,
        };
        let result = apply_trigger(&UiTrigger::new(TOGGLE_ZONE_CONTROLLER_TOOL), &mut targets);
        assert_eq!(result, Err(BridgeError::ToolUnavailable));
    }

    #[test]
    fn test_contour_toggle_survives_host_refusal() {
        let mut fx = Fixture::new();
        // The default tool has no snap settings, so the host refuses.
        fx.fire(UiTrigger::new(TOGGLE_CONTOUR_LINES)).unwrap();
        assert!(fx.bindings.flag(CONTOUR_ENABLED));
        fx.fire(UiTrigger::new(TOGGLE_CONTOUR_LINES)).unwrap();
        assert!(!fx.bindings.flag(CONTOUR_ENABLED));
    }

    #[test]
    fn test_contour_toggle_sets_snap_bit() {
        let mut fx = Fixture::new();
        fx.tools.active_tool = ToolHandle::ZoningController;
        fx.tools
            .snap_settings
            .insert(ToolHandle::ZoningController, Snap::empty());
        fx.fire(UiTrigger::new(TOGGLE_CONTOUR_LINES)).unwrap();
        assert_eq!(fx.tools.selected_snap(), Some(Snap::CONTOUR_LINES));
    }

    #[test]
    fn test_is_road_prefab() {
        let mut tools = ToolSystem::default();
        assert!(!is_road_prefab(&tools));
        tools.active_prefab = Some(ActivePrefab::new("Small Road", PrefabKind::Road));
        assert!(is_road_prefab(&tools));
        tools.active_prefab = Some(ActivePrefab::new("Low Density", PrefabKind::Zone));
        assert!(!is_road_prefab(&tools));
        tools.active_tool = ToolHandle::ZoningController;
        assert!(is_road_prefab(&tools));
    }

    #[test]
    fn test_panel_visibility() {
        let mut bindings = UiBindings::default();
        assert!(!bindings.panel_visible());
        bindings.set(IS_ROAD_PREFAB, BindingValue::Bool(true));
        assert!(bindings.panel_visible());
        bindings.set(IS_PHOTO_MODE, BindingValue::Bool(true));
        assert!(!bindings.panel_visible());
    }

    #[test]
    fn test_default_bindings_publish_both() {
        let bindings = UiBindings::default();
        assert_eq!(bindings.int(TOOL_ZONING_MODE), Some(3));
        assert_eq!(bindings.int(ROAD_ZONING_MODE), Some(3));
        assert_eq!(bindings.int(IS_ROAD_PREFAB), None);
    }
}
