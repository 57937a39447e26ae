//! Contract with the host game.
//!
//! Everything in this module is owned by the host: road and zone-block
//! geometry, per-tick change tags, the active tool, the cursor raycast and the
//! photo-mode flag. The zoning systems only read these types, except for the
//! two block geometry fields the reconciler rewrites and the `Updated` /
//! `Highlighted` tags the tool writes.
//!
//! Host singletons are read as `Option<Res<_>>`: a missing resource means the
//! host has not populated it yet and the dependent system skips that tick.

use std::collections::HashMap;
use std::fmt;

use bevy::prelude::*;

mod bookkeeping;

pub use bookkeeping::{clear_frame_tags, mark_sub_blocks_updated, HostBookkeepingPlugin};

// =============================================================================
// Road and block geometry
// =============================================================================

/// Marks an entity as a road segment.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Road;

/// Zone blocks generated along a road. Roads without sub-blocks (highways,
/// bridges) never accept zoning.
#[derive(Component, Debug, Clone, Default)]
pub struct SubBlocks(pub Vec<Entity>);

/// Rectangular zoning region along one side of a road.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ZoneBlock {
    /// Orientation of the block; its sign against a fixed axis tells which
    /// side of the owning road the block lies on.
    pub direction: Vec2,
    /// `x` = width along the road, `y` = depth away from it, in cells.
    pub size: IVec2,
}

/// Cell rectangle of a block that is currently zoneable: `[min_x, max_x) x
/// [min_z, max_z)`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidArea {
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl ValidArea {
    pub fn is_empty(&self) -> bool {
        self.max_x <= self.min_x || self.max_z <= self.min_z
    }
}

/// Back-reference from a block to the road that owns it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockOwner(pub Entity);

bitflags::bitflags! {
    /// Per-cell state flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u16 {
        /// A building stands on the cell.
        const OCCUPIED = 0b0001;
        const VISIBLE  = 0b0010;
        const BLOCKED  = 0b0100;
    }
}

/// Index of a zone prefab. `ZoneType::NONE` is an unzoned cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZoneType(pub u16);

impl ZoneType {
    pub const NONE: Self = Self(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub state: CellFlags,
    pub zone: ZoneType,
}

/// Row-major cells of a block, indexed `z * size.x + x`.
#[derive(Component, Debug, Clone, Default)]
pub struct BlockCells(pub Vec<Cell>);

// =============================================================================
// Per-tick tags
// =============================================================================

/// Entity changed this tick; dependent systems re-run for it.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Updated;

/// Entity was created this tick.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Created;

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TempFlags: u32 {
        const CREATE = 0b0001;
        const DELETE = 0b0010;
        const MODIFY = 0b0100;
    }
}

/// Transient definition of an entity being placed by a host tool.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Temp {
    pub flags: TempFlags,
}

/// Road is highlighted by the zoning tool. Written only by the tool.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Highlighted;

// =============================================================================
// Active tool
// =============================================================================

/// Handle of a host tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolHandle {
    /// The host's default (selection) tool.
    #[default]
    Default,
    /// The road-side zoning tool implemented by this crate.
    ZoningController,
    /// Any other host tool.
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefabKind {
    Road,
    Zone,
    Building,
    Other,
}

/// Prefab selected in the active tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePrefab {
    pub name: String,
    pub kind: PrefabKind,
}

impl ActivePrefab {
    pub fn new(name: impl Into<String>, kind: PrefabKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn is_road(&self) -> bool {
        self.kind == PrefabKind::Road
    }
}

bitflags::bitflags! {
    /// Snapping options of a host tool.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Snap: u32 {
        const CONTOUR_LINES = 0b0001;
        const GUIDE_LINES   = 0b0010;
        const NET_SIDE      = 0b0100;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The active tool has no snapping settings to change.
    SnapUnavailable(ToolHandle),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::SnapUnavailable(tool) => {
                write!(f, "tool {tool:?} exposes no snap settings")
            }
        }
    }
}

impl std::error::Error for HostError {}

/// The host's tool manager.
#[derive(Resource, Debug, Clone, Default)]
pub struct ToolSystem {
    pub active_tool: ToolHandle,
    pub active_prefab: Option<ActivePrefab>,
    /// Snap settings per tool. Tools without an entry do not support snapping.
    pub snap_settings: HashMap<ToolHandle, Snap>,
}

impl ToolSystem {
    pub fn is_active(&self, tool: ToolHandle) -> bool {
        self.active_tool == tool
    }

    /// Snap settings of the active tool, if it has any.
    pub fn selected_snap(&self) -> Option<Snap> {
        self.snap_settings.get(&self.active_tool).copied()
    }

    /// Set or clear `flag` on the active tool's snap settings.
    pub fn set_snap_flag(&mut self, flag: Snap, enabled: bool) -> Result<Snap, HostError> {
        let tool = self.active_tool;
        let snap = self
            .snap_settings
            .get_mut(&tool)
            .ok_or(HostError::SnapUnavailable(tool))?;
        snap.set(flag, enabled);
        Ok(*snap)
    }
}

/// Photo mode state; while enabled the tool panel stays hidden.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PhotoMode {
    pub enabled: bool,
}

// =============================================================================
// Cursor raycast
// =============================================================================

/// Hit of the host's road-layer raycast (underground included).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub entity: Entity,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaycastError {
    /// The raycast system has not produced a result yet.
    NotReady,
    Failed(String),
}

impl fmt::Display for RaycastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaycastError::NotReady => write!(f, "raycast result not ready"),
            RaycastError::Failed(msg) => write!(f, "raycast failed: {msg}"),
        }
    }
}

impl std::error::Error for RaycastError {}

/// Result of the cursor raycast, refreshed by the host every frame.
#[derive(Resource, Debug, Clone)]
pub struct CursorRaycast {
    pub result: Result<Option<RaycastHit>, RaycastError>,
}

impl Default for CursorRaycast {
    fn default() -> Self {
        Self { result: Ok(None) }
    }
}

impl CursorRaycast {
    pub fn hit(entity: Entity, position: Vec3) -> Self {
        Self {
            result: Ok(Some(RaycastHit { entity, position })),
        }
    }

    /// Entity under the cursor. Failures count as "nothing hit".
    pub fn hit_entity(&self) -> Option<Entity> {
        match &self.result {
            Ok(hit) => hit.map(|h| h.entity),
            Err(_) => None,
        }
    }
}

// =============================================================================
// Feedback sounds
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolSound {
    /// Mode cycled with the secondary action.
    Snap,
    /// A road was added to the drag selection.
    SelectEntity,
    /// Depth changes were applied.
    Apply,
}

/// Request for the host audio layer to play a UI sound.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSoundEvent(pub ToolSound);
