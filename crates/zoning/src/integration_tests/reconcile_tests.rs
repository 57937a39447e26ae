//! Block reconciliation through the full app: side mapping, cell
//! protection and per-block error isolation.

use bevy::prelude::*;

use crate::depth::{DepthPair, ZoningDepth};
use crate::host::{BlockCells, CellFlags, SubBlocks, Updated, ZoneType};
use crate::settings::ZoningSettings;
use crate::test_harness::TestZoning;

fn commit(zoning: &mut TestZoning, road: Entity, depths: DepthPair) {
    zoning
        .world_mut()
        .entity_mut(road)
        .insert((ZoningDepth(depths), Updated));
}

#[test]
fn test_left_only_depth_lands_on_cross_mapped_side() {
    let mut zoning = TestZoning::new();
    let road = zoning.spawn_road();
    commit(&mut zoning, road.road, DepthPair::new(6, 0));
    zoning.tick(1);

    // A block classified left by its direction reads the pair's right value.
    zoning.assert_block_depth(road.left_block, 0);
    zoning.assert_block_depth(road.right_block, 6);
}

#[test]
fn test_blocks_of_untouched_roads_are_left_alone() {
    let mut zoning = TestZoning::new();
    let road = zoning.spawn_road();
    zoning.mark_updated(road.road);
    zoning.tick(1);
    zoning.assert_block_depth(road.left_block, 6);
    zoning.assert_block_depth(road.right_block, 6);
}

#[test]
fn test_occupied_cell_blocks_depth_change() {
    let mut zoning = TestZoning::new();
    let road = zoning.spawn_road_with_depth(DepthPair::new(6, 6));
    zoning.edit_cell(road.left_block, 1, 3, |cell| {
        cell.state = CellFlags::OCCUPIED;
    });

    commit(&mut zoning, road.road, DepthPair::ZERO);
    zoning.tick(1);

    zoning.assert_block_depth(road.left_block, 6);
    zoning.assert_block_depth(road.right_block, 0);
}

#[test]
fn test_zoned_cell_blocks_depth_change() {
    let mut zoning = TestZoning::new();
    let road = zoning.spawn_road();
    zoning.edit_cell(road.right_block, 0, 0, |cell| cell.zone = ZoneType(2));

    commit(&mut zoning, road.road, DepthPair::ZERO);
    zoning.tick(1);

    zoning.assert_block_depth(road.left_block, 0);
    zoning.assert_block_depth(road.right_block, 6);
}

#[test]
fn test_disabled_protection_allows_change() {
    let mut zoning = TestZoning::new();
    zoning.world_mut().insert_resource(ZoningSettings {
        protect_occupied_cells: false,
        protect_zoned_cells: false,
        ..Default::default()
    });
    let road = zoning.spawn_road();
    zoning.edit_cell(road.left_block, 0, 0, |cell| {
        cell.state = CellFlags::OCCUPIED;
        cell.zone = ZoneType(1);
    });

    commit(&mut zoning, road.road, DepthPair::ZERO);
    zoning.tick(1);
    zoning.assert_block_depth(road.left_block, 0);
}

#[test]
fn test_protected_block_survives_tool_apply() {
    let mut zoning = TestZoning::new();
    zoning.activate_tool();
    let road = zoning.spawn_road_with_depth(DepthPair::new(6, 6));
    zoning.edit_cell(road.right_block, 1, 5, |cell| {
        cell.state = CellFlags::OCCUPIED;
    });

    zoning.click_road(road.road);
    assert_eq!(zoning.committed(road.road), Some(DepthPair::ZERO));
    zoning.tick(1);

    zoning.assert_block_depth(road.right_block, 6);
    zoning.assert_block_depth(road.left_block, 0);
}

#[test]
fn test_orphan_block_does_not_stop_the_batch() {
    let mut zoning = TestZoning::new();
    let orphan = zoning.spawn_block(None, Vec2::X);
    zoning.mark_updated(orphan);
    let road = zoning.spawn_road();
    commit(&mut zoning, road.road, DepthPair::ZERO);
    zoning.tick(1);

    zoning.assert_block_depth(orphan, 6);
    zoning.assert_block_depth(road.left_block, 0);
    zoning.assert_block_depth(road.right_block, 0);
}

#[test]
fn test_short_cell_buffer_only_skips_that_block() {
    let mut zoning = TestZoning::new();
    let road = zoning.spawn_road();
    zoning.world_mut().entity_mut(road.left_block).insert(BlockCells(Vec::new()));
    commit(&mut zoning, road.road, DepthPair::ZERO);
    zoning.tick(1);

    zoning.assert_block_depth(road.left_block, 6);
    zoning.assert_block_depth(road.right_block, 0);
}

#[test]
fn test_many_roads_reconcile_in_one_tick() {
    let mut zoning = TestZoning::new();
    let roads: Vec<_> = (0..150).map(|_| zoning.spawn_road()).collect();
    for road in &roads {
        commit(&mut zoning, road.road, DepthPair::new(0, 6));
    }
    zoning.tick(1);

    for road in &roads {
        zoning.assert_block_depth(road.left_block, 6);
        zoning.assert_block_depth(road.right_block, 0);
        assert_eq!(
            zoning.world().get::<SubBlocks>(road.road).map(|s| s.0.len()),
            Some(2)
        );
    }
}
