//! Per-tick ordering of the zoning systems via `SystemSet` phases.
//!
//! ```text
//! Modification  →  BlockSync  →  Cleanup  →  Input  →  Tool
//! ```
//!
//! * **Modification** – seed freshly created roads with the road-drawing depth.
//! * **BlockSync** – rewrite the geometry of every updated zone block.
//! * **Cleanup** – the host drops its per-tick tags (`Updated`, `Created`, `Temp`).
//! * **Input** – hotkey and UI trigger handling.
//! * **Tool** – tool state machine, preview sync, UI binding publication.
//!
//! The tool writes through deferred commands after the cleanup point, so an
//! apply or preview change reaches the reconciler on the following tick.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ZoningSet {
    Modification,
    BlockSync,
    Cleanup,
    Input,
    Tool,
}

pub(crate) fn configure_zoning_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            ZoningSet::Modification,
            ZoningSet::BlockSync,
            ZoningSet::Cleanup,
            ZoningSet::Input,
            ZoningSet::Tool,
        )
            .chain(),
    );
}
