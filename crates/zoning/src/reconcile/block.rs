//! Per-block reconciliation, free of any ECS access.
//!
//! The system feeds read-only [`BlockView`]s through [`reconcile_block`] in
//! parallel and commits the resulting writes afterwards on one thread.

use std::fmt;

use bevy::prelude::*;

use crate::depth::DepthPair;
use crate::host::{Cell, CellFlags, ValidArea, ZoneBlock, ZoneType};
use crate::settings::ZoningSettings;

/// Side of its owning road a block lies on, by the block-direction sign test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockSide {
    Left,
    Right,
}

impl BlockSide {
    pub fn classify(direction: Vec2) -> Self {
        if Vec2::ONE.dot(direction) < 0.0 {
            BlockSide::Left
        } else {
            BlockSide::Right
        }
    }

    /// Depth a block on this side realizes.
    ///
    /// The direction test and the UI's left/right are measured against
    /// opposite frames, so a `Left` block takes the pair's right value and a
    /// `Right` block its left value.
    pub fn depth_from(self, depths: DepthPair) -> i32 {
        match self {
            BlockSide::Left => depths.right,
            BlockSide::Right => depths.left,
        }
    }
}

/// Which cell guards are active for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Protection {
    pub occupied: bool,
    pub zoned: bool,
}

impl From<&ZoningSettings> for Protection {
    fn from(settings: &ZoningSettings) -> Self {
        Self {
            occupied: settings.protect_occupied_cells,
            zoned: settings.protect_zoned_cells,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectedBy {
    OccupiedCell,
    ZonedCell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    /// Set the block's depth and valid-area bound to this value.
    Write(i32),
    /// Owning road carries no preview or committed depth.
    NoDirective,
    /// A cell guard vetoed the change.
    Protected(ProtectedBy),
}

/// Invariant violations found while reconciling one block. Each aborts only
/// the block it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    MissingOwner {
        block: Entity,
    },
    CellBufferTooShort {
        block: Entity,
        index: i64,
        len: usize,
    },
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileError::MissingOwner { block } => {
                write!(f, "zone block {block} has no owner assigned")
            }
            ReconcileError::CellBufferTooShort { block, index, len } => write!(
                f,
                "zone block {block}: valid area reaches cell {index} but only {len} cells exist"
            ),
        }
    }
}

impl std::error::Error for ReconcileError {}

/// Read-only snapshot of one updated block.
#[derive(Debug, Clone, Copy)]
pub struct BlockView<'a> {
    pub entity: Entity,
    pub block: ZoneBlock,
    pub area: ValidArea,
    pub owner: Option<Entity>,
    pub cells: &'a [Cell],
}

impl BlockView<'_> {
    /// True if any cell inside the valid area matches `pred`.
    fn any_cell(&self, pred: impl Fn(&Cell) -> bool) -> Result<bool, ReconcileError> {
        if self.area.is_empty() {
            return Ok(false);
        }
        let width = i64::from(self.block.size.x);
        for z in self.area.min_z..self.area.max_z {
            for x in self.area.min_x..self.area.max_x {
                let index = i64::from(z) * width + i64::from(x);
                let cell = usize::try_from(index)
                    .ok()
                    .and_then(|i| self.cells.get(i))
                    .ok_or(ReconcileError::CellBufferTooShort {
                        block: self.entity,
                        index,
                        len: self.cells.len(),
                    })?;
                if pred(cell) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

/// Decide what happens to one block.
///
/// `depths_of` resolves the owning road's effective depth pair (preview
/// first, committed second).
pub fn reconcile_block(
    view: &BlockView<'_>,
    depths_of: impl Fn(Entity) -> Option<DepthPair>,
    protection: Protection,
) -> Result<BlockOutcome, ReconcileError> {
    let road = view
        .owner
        .ok_or(ReconcileError::MissingOwner { block: view.entity })?;

    let side = BlockSide::classify(view.block.direction);
    let Some(depths) = depths_of(road) else {
        return Ok(BlockOutcome::NoDirective);
    };
    let depth = side.depth_from(depths);

    if protection.occupied && view.any_cell(|c| c.state.contains(CellFlags::OCCUPIED))? {
        return Ok(BlockOutcome::Protected(ProtectedBy::OccupiedCell));
    }
    if protection.zoned && view.any_cell(|c| c.zone != ZoneType::NONE)? {
        return Ok(BlockOutcome::Protected(ProtectedBy::ZonedCell));
    }

    Ok(BlockOutcome::Write(depth))
}

/// Apply a reconciled depth to the block geometry.
pub fn apply_depth(block: &mut ZoneBlock, area: &mut ValidArea, depth: i32) {
    block.size.y = depth;
    area.max_z = depth;
}
