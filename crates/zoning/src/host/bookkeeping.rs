//! Per-tick tag bookkeeping the host performs around the zoning systems.
//!
//! A real host regenerates the blocks of every updated road and clears its
//! per-tick tags once the modification phases are done. Embedders without
//! that machinery (and the test harness) add [`HostBookkeepingPlugin`].

use bevy::prelude::*;

use super::{Created, Road, SubBlocks, Temp, Updated};
use crate::reconcile::reconcile_blocks;
use crate::zoning_sets::ZoningSet;

pub struct HostBookkeepingPlugin;

impl Plugin for HostBookkeepingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            mark_sub_blocks_updated
                .before(reconcile_blocks)
                .in_set(ZoningSet::BlockSync),
        )
        .add_systems(Update, clear_frame_tags.in_set(ZoningSet::Cleanup));
    }
}

/// Propagate `Updated` from roads to the blocks they own.
pub fn mark_sub_blocks_updated(
    roads: Query<&SubBlocks, (With<Road>, With<Updated>)>,
    blocks: Query<(), Without<Updated>>,
    mut commands: Commands,
) {
    for sub_blocks in &roads {
        for &block in &sub_blocks.0 {
            if blocks.contains(block) {
                commands.entity(block).insert(Updated);
            }
        }
    }
}

/// Drop the tags that only live for one tick.
pub fn clear_frame_tags(
    tagged: Query<Entity, Or<(With<Updated>, With<Created>, With<Temp>)>>,
    mut commands: Commands,
) {
    for entity in &tagged {
        commands
            .entity(entity)
            .remove::<(Updated, Created, Temp)>();
    }
}
