//! Road and block builders for `TestZoning`.

use bevy::prelude::*;

use crate::depth::{DepthPair, ZoningDepth, MAX_ZONING_DEPTH};
use crate::host::{
    BlockCells, BlockOwner, Cell, Created, Road, SubBlocks, Temp, TempFlags, Updated, ValidArea,
    ZoneBlock,
};

use super::TestZoning;

/// Width of every test block, in cells.
pub const BLOCK_WIDTH: i32 = 2;

/// A road with one block on each side.
#[derive(Debug, Clone, Copy)]
pub struct TestRoad {
    pub road: Entity,
    /// Block the direction test classifies as left.
    pub left_block: Entity,
    /// Block the direction test classifies as right.
    pub right_block: Entity,
}

impl TestZoning {
    /// Spawn a block of full depth with unzoned, empty cells.
    pub fn spawn_block(&mut self, owner: Option<Entity>, direction: Vec2) -> Entity {
        let cell_count = (BLOCK_WIDTH * MAX_ZONING_DEPTH) as usize;
        let mut block = self.world_mut().spawn((
            ZoneBlock {
                direction,
                size: IVec2::new(BLOCK_WIDTH, MAX_ZONING_DEPTH),
            },
            ValidArea {
                min_x: 0,
                max_x: BLOCK_WIDTH,
                min_z: 0,
                max_z: MAX_ZONING_DEPTH,
            },
            BlockCells(vec![Cell::default(); cell_count]),
        ));
        if let Some(owner) = owner {
            block.insert(BlockOwner(owner));
        }
        block.id()
    }

    /// Spawn a zoneable road with a left and a right block.
    pub fn spawn_road(&mut self) -> TestRoad {
        let road = self.world_mut().spawn(Road).id();
        let left_block = self.spawn_block(Some(road), Vec2::NEG_X);
        let right_block = self.spawn_block(Some(road), Vec2::X);
        self.world_mut()
            .entity_mut(road)
            .insert(SubBlocks(vec![left_block, right_block]));
        TestRoad {
            road,
            left_block,
            right_block,
        }
    }

    /// Spawn a road that already carries a committed depth.
    pub fn spawn_road_with_depth(&mut self, depths: DepthPair) -> TestRoad {
        let test_road = self.spawn_road();
        self.world_mut()
            .entity_mut(test_road.road)
            .insert(ZoningDepth(depths));
        test_road
    }

    /// Spawn a road the host is creating this tick.
    pub fn spawn_created_road(&mut self) -> TestRoad {
        let test_road = self.spawn_road();
        self.world_mut().entity_mut(test_road.road).insert((
            Created,
            Updated,
            Temp {
                flags: TempFlags::CREATE,
            },
        ));
        test_road
    }

    /// Run `f` on one cell of a block.
    pub fn edit_cell(&mut self, block: Entity, x: i32, z: i32, f: impl FnOnce(&mut Cell)) {
        let index = (z * BLOCK_WIDTH + x) as usize;
        if let Some(mut cells) = self.world_mut().get_mut::<BlockCells>(block) {
            if let Some(cell) = cells.0.get_mut(index) {
                f(cell);
            }
        }
    }

    /// Flag a road as changed so its blocks get reconciled next tick.
    pub fn mark_updated(&mut self, entity: Entity) {
        self.world_mut().entity_mut(entity).insert(Updated);
    }
}
