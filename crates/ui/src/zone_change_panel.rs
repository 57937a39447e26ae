//! "Zone Change" section of the tool-options panel.
//!
//! Shown while a road is being drawn or the zoning tool is active. The
//! buttons edit the road-drawing mode while a road prefab is placed, and the
//! tool mode otherwise.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use zoning::host::{ToolHandle, ToolSystem};
use zoning::ui_bridge::{
    UiBindings, UiTrigger, CONTOUR_ENABLED, FLIP_ROAD_BOTH_MODE, FLIP_TOOL_BOTH_MODE,
    ROAD_ZONING_MODE, TOGGLE_CONTOUR_LINES, TOOL_ZONING_MODE,
};
use zoning::ZoningMode;

/// Which mode instance the panel edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTarget {
    Road,
    Tool,
}

impl PanelTarget {
    pub fn for_tools(tools: &ToolSystem) -> Self {
        let drawing_road = tools.active_prefab.as_ref().is_some_and(|p| p.is_road());
        if drawing_road && !tools.is_active(ToolHandle::ZoningController) {
            PanelTarget::Road
        } else {
            PanelTarget::Tool
        }
    }

    fn binding_key(self) -> &'static str {
        match self {
            PanelTarget::Road => ROAD_ZONING_MODE,
            PanelTarget::Tool => TOOL_ZONING_MODE,
        }
    }

    /// Mode currently published for this target.
    pub fn current_mode(self, bindings: &UiBindings) -> ZoningMode {
        bindings
            .int(self.binding_key())
            .and_then(ZoningMode::from_raw)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneButton {
    Both,
    Left,
    Right,
}

impl ZoneButton {
    pub const ALL: [Self; 3] = [Self::Both, Self::Left, Self::Right];

    pub fn label(self) -> &'static str {
        match self {
            ZoneButton::Both => "Both",
            ZoneButton::Left => "Left",
            ZoneButton::Right => "Right",
        }
    }

    pub fn is_selected(self, mode: ZoningMode) -> bool {
        match self {
            ZoneButton::Both => mode == ZoningMode::BOTH,
            ZoneButton::Left => mode == ZoningMode::LEFT,
            ZoneButton::Right => mode == ZoningMode::RIGHT,
        }
    }

    /// Trigger a click sends. "Both" toggles Both/None, the sides select
    /// exactly that side.
    pub fn trigger(self, target: PanelTarget) -> UiTrigger {
        match (self, target) {
            (ZoneButton::Both, PanelTarget::Road) => UiTrigger::new(FLIP_ROAD_BOTH_MODE),
            (ZoneButton::Both, PanelTarget::Tool) => UiTrigger::new(FLIP_TOOL_BOTH_MODE),
            (ZoneButton::Left, PanelTarget::Road) => UiTrigger::change_road_mode(ZoningMode::LEFT),
            (ZoneButton::Left, PanelTarget::Tool) => UiTrigger::change_tool_mode(ZoningMode::LEFT),
            (ZoneButton::Right, PanelTarget::Road) => {
                UiTrigger::change_road_mode(ZoningMode::RIGHT)
            }
            (ZoneButton::Right, PanelTarget::Tool) => {
                UiTrigger::change_tool_mode(ZoningMode::RIGHT)
            }
        }
    }
}

pub fn zone_change_panel_ui(
    mut contexts: EguiContexts,
    bindings: Res<UiBindings>,
    tools: Option<Res<ToolSystem>>,
    mut triggers: EventWriter<UiTrigger>,
) {
    let Some(tools) = tools else {
        return;
    };
    if !bindings.panel_visible() {
        return;
    }

    let target = PanelTarget::for_tools(&tools);
    let mode = target.current_mode(&bindings);
    let tool_active = tools.is_active(ToolHandle::ZoningController);

    let ctx = contexts.ctx_mut();
    egui::Window::new("Zone Change")
        .id(egui::Id::new("zone_change_panel"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-10.0, -10.0))
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for button in ZoneButton::ALL {
                    if ui
                        .selectable_label(button.is_selected(mode), button.label())
                        .clicked()
                    {
                        triggers.send(button.trigger(target));
                    }
                }
            });

            if tool_active {
                ui.add_space(4.0);
                let contour = bindings.flag(CONTOUR_ENABLED);
                if ui.selectable_label(contour, "Contour lines").clicked() {
                    triggers.send(UiTrigger::new(TOGGLE_CONTOUR_LINES));
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoning::host::{ActivePrefab, PrefabKind};
    use zoning::ui_bridge::{BindingValue, CHANGE_ROAD_ZONING_MODE, CHANGE_TOOL_ZONING_MODE};

    #[test]
    fn test_road_prefab_targets_road_mode() {
        let tools = ToolSystem {
            active_prefab: Some(ActivePrefab::new("Small Road", PrefabKind::Road)),
            ..Default::default()
        };
        assert_eq!(PanelTarget::for_tools(&tools), PanelTarget::Road);
    }

    #[test]
    fn test_active_tool_targets_tool_mode() {
        let tools = ToolSystem {
            active_tool: ToolHandle::ZoningController,
            active_prefab: Some(ActivePrefab::new("Small Road", PrefabKind::Road)),
            ..Default::default()
        };
        assert_eq!(PanelTarget::for_tools(&tools), PanelTarget::Tool);
        assert_eq!(
            PanelTarget::for_tools(&ToolSystem::default()),
            PanelTarget::Tool
        );
    }

    #[test]
    fn test_buttons_send_expected_triggers() {
        assert_eq!(
            ZoneButton::Both.trigger(PanelTarget::Road).name,
            FLIP_ROAD_BOTH_MODE
        );
        let left = ZoneButton::Left.trigger(PanelTarget::Tool);
        assert_eq!(left.name, CHANGE_TOOL_ZONING_MODE);
        assert_eq!(left.arg, Some(ZoningMode::LEFT.to_raw()));
        let right = ZoneButton::Right.trigger(PanelTarget::Road);
        assert_eq!(right.name, CHANGE_ROAD_ZONING_MODE);
        assert_eq!(right.arg, Some(ZoningMode::RIGHT.to_raw()));
    }

    #[test]
    fn test_selection_highlight() {
        assert!(ZoneButton::Both.is_selected(ZoningMode::BOTH));
        assert!(!ZoneButton::Both.is_selected(ZoningMode::NONE));
        assert!(ZoneButton::Left.is_selected(ZoningMode::LEFT));
        assert!(!ZoneButton::Right.is_selected(ZoningMode::LEFT));
    }

    #[test]
    fn test_current_mode_reads_target_binding() {
        let mut bindings = UiBindings::default();
        bindings.set(ROAD_ZONING_MODE, BindingValue::Int(ZoningMode::LEFT.to_raw()));
        assert_eq!(PanelTarget::Road.current_mode(&bindings), ZoningMode::LEFT);
        assert_eq!(PanelTarget::Tool.current_mode(&bindings), ZoningMode::BOTH);
    }
}
