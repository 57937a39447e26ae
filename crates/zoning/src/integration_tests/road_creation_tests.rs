//! New-road seeding through the full app.

use crate::depth::DepthPair;
use crate::host::{Created, Temp, Updated};
use crate::test_harness::TestZoning;
use crate::ui_bridge::UiTrigger;
use crate::zoning_mode::ZoningMode;

#[test]
fn test_left_road_mode_seeds_and_reshapes_new_road() {
    let mut zoning = TestZoning::new();
    zoning.set_road_mode(ZoningMode::LEFT);
    let road = zoning.spawn_created_road();
    zoning.tick(2);

    assert_eq!(zoning.committed(road.road), Some(DepthPair::new(6, 0)));
    zoning.assert_block_depth(road.left_block, 0);
    zoning.assert_block_depth(road.right_block, 6);

    let world = zoning.world();
    assert!(world.get::<Created>(road.road).is_none());
    assert!(world.get::<Temp>(road.road).is_none());
    assert!(world.get::<Updated>(road.road).is_none());
}

#[test]
fn test_default_road_mode_attaches_no_record() {
    let mut zoning = TestZoning::new();
    let road = zoning.spawn_created_road();
    zoning.tick(2);
    assert_eq!(zoning.committed(road.road), None);
    zoning.assert_block_depth(road.left_block, 6);
    zoning.assert_block_depth(road.right_block, 6);
}

#[test]
fn test_road_mode_set_from_ui_applies_to_next_road() {
    let mut zoning = TestZoning::new();
    zoning.send_trigger(UiTrigger::change_road_mode(ZoningMode::NONE));
    zoning.tick(1);
    assert_eq!(zoning.road_mode(), ZoningMode::NONE);
    assert_eq!(zoning.tool_mode(), ZoningMode::BOTH);

    let road = zoning.spawn_created_road();
    zoning.tick(2);
    assert_eq!(zoning.committed(road.road), Some(DepthPair::ZERO));
    zoning.assert_block_depth(road.left_block, 0);
    zoning.assert_block_depth(road.right_block, 0);
}

#[test]
fn test_existing_roads_keep_their_depth_when_road_mode_changes() {
    let mut zoning = TestZoning::new();
    let old = zoning.spawn_road();
    zoning.set_road_mode(ZoningMode::RIGHT);
    zoning.mark_updated(old.road);
    zoning.tick(2);
    assert_eq!(zoning.committed(old.road), None);
    zoning.assert_block_depth(old.left_block, 6);
}
