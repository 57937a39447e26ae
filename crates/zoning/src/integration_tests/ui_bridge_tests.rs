//! UI bridge values and triggers through the full app.

use crate::host::{ActivePrefab, PrefabKind, Snap, ToolHandle, ToolSystem};
use crate::test_harness::TestZoning;
use crate::ui_bridge::{
    UiTrigger, CONTOUR_ENABLED, FLIP_TOOL_BOTH_MODE, IS_ROAD_PREFAB, ROAD_ZONING_MODE,
    TOGGLE_CONTOUR_LINES, TOGGLE_ZONE_CONTROLLER_TOOL, TOOL_ZONING_MODE,
};
use crate::zoning_mode::ZoningMode;

#[test]
fn test_mode_bindings_follow_triggers() {
    let mut zoning = TestZoning::new();
    zoning.send_trigger(UiTrigger::change_tool_mode(ZoningMode::LEFT));
    zoning.send_trigger(UiTrigger::change_road_mode(ZoningMode::RIGHT));
    zoning.tick(1);

    assert_eq!(zoning.bindings().int(TOOL_ZONING_MODE), Some(2));
    assert_eq!(zoning.bindings().int(ROAD_ZONING_MODE), Some(1));

    zoning.send_trigger(UiTrigger::new(FLIP_TOOL_BOTH_MODE));
    zoning.tick(1);
    assert_eq!(zoning.tool_mode(), ZoningMode::BOTH);
    assert_eq!(zoning.bindings().int(TOOL_ZONING_MODE), Some(3));
}

#[test]
fn test_bad_triggers_are_dropped() {
    let mut zoning = TestZoning::new();
    zoning.send_trigger(UiTrigger::with_arg("ChangeToolZoningMode", 12));
    zoning.send_trigger(UiTrigger::new("NoSuchTrigger"));
    zoning.send_trigger(UiTrigger::change_tool_mode(ZoningMode::RIGHT));
    zoning.tick(1);
    assert_eq!(zoning.tool_mode(), ZoningMode::RIGHT);
}

#[test]
fn test_secondary_cycle_is_published() {
    let mut zoning = TestZoning::new();
    zoning.activate_tool();
    zoning.set_tool_mode(ZoningMode::LEFT);
    let road = zoning.spawn_road();
    zoning.hover(road.road);
    zoning.tick(1);
    zoning.click_secondary();
    zoning.tick(1);
    assert_eq!(
        zoning.bindings().int(TOOL_ZONING_MODE),
        Some(ZoningMode::RIGHT.to_raw())
    );
}

#[test]
fn test_panel_visibility_follows_host_state() {
    let mut zoning = TestZoning::new();
    assert!(!zoning.bindings().panel_visible());

    zoning.set_active_prefab(Some(ActivePrefab::new("Two-Lane Road", PrefabKind::Road)));
    zoning.tick(1);
    assert!(zoning.bindings().flag(IS_ROAD_PREFAB));
    assert!(zoning.bindings().panel_visible());

    zoning.set_photo_mode(true);
    zoning.tick(1);
    assert!(!zoning.bindings().panel_visible());

    zoning.set_photo_mode(false);
    zoning.set_active_prefab(Some(ActivePrefab::new("Office Tower", PrefabKind::Building)));
    zoning.tick(1);
    assert!(!zoning.bindings().panel_visible());

    zoning.activate_tool();
    zoning.tick(1);
    assert!(zoning.bindings().panel_visible());
}

#[test]
fn test_toggle_tool_trigger() {
    let mut zoning = TestZoning::new();
    zoning.send_trigger(UiTrigger::new(TOGGLE_ZONE_CONTROLLER_TOOL));
    zoning.tick(1);
    assert!(zoning.tools().is_active(ToolHandle::ZoningController));
    assert!(zoning.bindings().flag(IS_ROAD_PREFAB));

    zoning.send_trigger(UiTrigger::new(TOGGLE_ZONE_CONTROLLER_TOOL));
    zoning.tick(1);
    assert!(zoning.tools().is_active(ToolHandle::Default));
}

#[test]
fn test_contour_toggle_reaches_active_tool() {
    let mut zoning = TestZoning::new();
    zoning.activate_tool();
    zoning
        .world_mut()
        .resource_mut::<ToolSystem>()
        .snap_settings
        .insert(ToolHandle::ZoningController, Snap::GUIDE_LINES);

    zoning.send_trigger(UiTrigger::new(TOGGLE_CONTOUR_LINES));
    zoning.tick(1);
    assert!(zoning.bindings().flag(CONTOUR_ENABLED));
    assert_eq!(
        zoning.tools().selected_snap(),
        Some(Snap::GUIDE_LINES | Snap::CONTOUR_LINES)
    );
}

#[test]
fn test_contour_toggle_without_snap_support_still_flips_binding() {
    let mut zoning = TestZoning::new();
    zoning.send_trigger(UiTrigger::new(TOGGLE_CONTOUR_LINES));
    zoning.tick(1);
    assert!(zoning.bindings().flag(CONTOUR_ENABLED));
    assert_eq!(zoning.tools().selected_snap(), None);
}
