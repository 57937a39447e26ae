//! Block depth reconciler.
//!
//! Every tick, each zone block tagged `Updated` is brought in line with the
//! depth its owning road asks for. The work is split in two phases:
//!
//! 1. Read-only [`BlockView`] snapshots are mapped in parallel chunks on the
//!    compute task pool through [`reconcile_block`].
//! 2. The resulting writes are committed on the system's thread.
//!
//! Each block is written by at most one outcome, so the commit never races.

mod block;

use std::collections::HashMap;

use bevy::prelude::*;
use bevy::tasks::{ComputeTaskPool, ParallelSlice, TaskPool};

pub use block::{
    apply_depth, reconcile_block, BlockOutcome, BlockSide, BlockView, ProtectedBy, Protection,
    ReconcileError,
};

use crate::depth::{effective_depths, DepthPair, ZoningDepth, ZoningPreview};
use crate::host::{BlockCells, BlockOwner, Updated, ValidArea, ZoneBlock};
use crate::settings::ZoningSettings;
use crate::zoning_sets::ZoningSet;

pub struct ReconcilePlugin;

impl Plugin for ReconcilePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ZoningSettings>()
            .add_systems(Update, reconcile_blocks.in_set(ZoningSet::BlockSync));
    }
}

/// Blocks handed to one task.
pub const BLOCK_CHUNK_SIZE: usize = 32;

pub type BlockResult = (Entity, Result<BlockOutcome, ReconcileError>);

/// Reconcile a batch of views on the compute pool.
pub fn reconcile_views(
    views: &[BlockView<'_>],
    depths: &HashMap<Entity, DepthPair>,
    protection: Protection,
) -> Vec<BlockResult> {
    let pool = ComputeTaskPool::get_or_init(TaskPool::default);
    views
        .par_chunk_map(pool, BLOCK_CHUNK_SIZE, |_, chunk| {
            chunk
                .iter()
                .map(|view| {
                    let outcome =
                        reconcile_block(view, |road| depths.get(&road).copied(), protection);
                    (view.entity, outcome)
                })
                .collect::<Vec<_>>()
        })
        .into_iter()
        .flatten()
        .collect()
}

#[allow(clippy::type_complexity)]
pub fn reconcile_blocks(
    settings: Res<ZoningSettings>,
    roads: Query<
        (Entity, Option<&ZoningPreview>, Option<&ZoningDepth>),
        Or<(With<ZoningPreview>, With<ZoningDepth>)>,
    >,
    mut blocks: Query<
        (
            Entity,
            &mut ZoneBlock,
            &mut ValidArea,
            Option<&BlockOwner>,
            Option<&BlockCells>,
        ),
        With<Updated>,
    >,
) {
    #[cfg(feature = "trace")]
    let _span = bevy::log::info_span!("reconcile_blocks").entered();

    if blocks.is_empty() {
        return;
    }

    let depths: HashMap<Entity, DepthPair> = roads
        .iter()
        .filter_map(|(road, preview, committed)| {
            effective_depths(preview, committed).map(|d| (road, d))
        })
        .collect();

    let views: Vec<BlockView<'_>> = blocks
        .iter()
        .map(|(entity, block, area, owner, cells)| BlockView {
            entity,
            block: *block,
            area: *area,
            owner: owner.map(|o| o.0),
            cells: cells.map(|c| c.0.as_slice()).unwrap_or_default(),
        })
        .collect();

    let results = reconcile_views(&views, &depths, Protection::from(&*settings));
    drop(views);

    for (entity, outcome) in results {
        match outcome {
            Ok(BlockOutcome::Write(depth)) => {
                if let Ok((_, mut block, mut area, _, _)) = blocks.get_mut(entity) {
                    if block.size.y != depth || area.max_z != depth {
                        apply_depth(&mut block, &mut area, depth);
                    }
                }
            }
            Ok(BlockOutcome::Protected(reason)) => {
                debug!("zone block {entity} left unchanged: {reason:?}");
            }
            Ok(BlockOutcome::NoDirective) => {}
            Err(e) => error!("{e}"),
        }
    }
}
