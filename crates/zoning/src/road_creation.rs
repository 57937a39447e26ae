//! Seed freshly drawn roads with the road-drawing zoning mode.
//!
//! Only roads the host is creating right now (a `Temp` definition carrying
//! the `CREATE` flag) are touched. With the default mode nothing is
//! attached, so the host's own depth applies.

use bevy::prelude::*;

use crate::depth::{ZoningDepth, DEFAULT_DEPTHS};
use crate::host::{Created, Road, SubBlocks, Temp, TempFlags, Updated};
use crate::zoning_mode::RoadZoningMode;
use crate::zoning_sets::ZoningSet;

pub struct RoadCreationPlugin;

impl Plugin for RoadCreationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RoadZoningMode>()
            .add_systems(Update, sync_created_roads.in_set(ZoningSet::Modification));
    }
}

#[allow(clippy::type_complexity)]
pub fn sync_created_roads(
    mode: Res<RoadZoningMode>,
    created: Query<
        (Entity, &Temp),
        (
            With<Road>,
            With<Created>,
            With<Updated>,
            With<SubBlocks>,
        ),
    >,
    mut commands: Commands,
) {
    let depths = mode.depths();
    if depths == DEFAULT_DEPTHS {
        return;
    }
    for (road, temp) in &created {
        if !temp.flags.contains(TempFlags::CREATE) {
            continue;
        }
        commands
            .entity(road)
            .try_insert((ZoningDepth(depths), Updated));
        debug!("seeded new road {road} with {} zoning", mode.0.label());
    }
}
