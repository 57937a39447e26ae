//! Per-road zoning depth records.
//!
//! A road carries at most two records:
//! - [`ZoningDepth`]: the committed, persisted depth.
//! - [`ZoningPreview`]: the transient depth shown while the tool hovers or
//!   selects the road. When present it overrides the committed depth.
//!
//! Roads without a committed record keep the host's built-in depth
//! ([`DEFAULT_DEPTHS`]).

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed maximum zoning depth in cells.
pub const MAX_ZONING_DEPTH: i32 = 6;

/// Depth the host gives every road side when no record is attached.
pub const DEFAULT_DEPTHS: DepthPair = DepthPair {
    left: MAX_ZONING_DEPTH,
    right: MAX_ZONING_DEPTH,
};

/// Left/right depth in cells, in the UI-facing convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DepthPair {
    pub left: i32,
    pub right: i32,
}

impl DepthPair {
    pub const ZERO: Self = Self { left: 0, right: 0 };

    pub const fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    pub fn is_all_off(self) -> bool {
        self.left == 0 && self.right == 0
    }

    pub fn is_any_on(self) -> bool {
        self.left > 0 || self.right > 0
    }
}

/// Committed depth of a road. Persisted with the road entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoningDepth(pub DepthPair);

/// Preview depth of a road while the tool has it selected. Never persisted.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoningPreview(pub DepthPair);

/// Depth the reconciler should realize for a road: preview first, then the
/// committed record. `None` means no zoning directive applies.
pub fn effective_depths(
    preview: Option<&ZoningPreview>,
    committed: Option<&ZoningDepth>,
) -> Option<DepthPair> {
    preview
        .map(|p| p.0)
        .or_else(|| committed.map(|c| c.0))
}

/// Depth the toggle policy starts from: the committed record, or all-off
/// when the road was never touched.
pub fn toggle_base(committed: Option<&ZoningDepth>) -> DepthPair {
    committed.map_or(DepthPair::ZERO, |c| c.0)
}

// ---------------------------------------------------------------------------
// Entity save format
// ---------------------------------------------------------------------------

/// Encoded size of a committed depth record: two little-endian `i32`.
pub const ENCODED_DEPTH_LEN: usize = 8;

/// Errors decoding a committed depth record from the host save stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepthCodecError {
    /// The record was not exactly [`ENCODED_DEPTH_LEN`] bytes.
    WrongLength { expected: usize, found: usize },
}

impl fmt::Display for DepthCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthCodecError::WrongLength { expected, found } => {
                write!(f, "zoning depth record must be {expected} bytes, found {found}")
            }
        }
    }
}

impl std::error::Error for DepthCodecError {}

impl ZoningDepth {
    /// Serialize verbatim as `left`, `right`.
    pub fn encode(&self) -> [u8; ENCODED_DEPTH_LEN] {
        let mut out = [0u8; ENCODED_DEPTH_LEN];
        out[..4].copy_from_slice(&self.0.left.to_le_bytes());
        out[4..].copy_from_slice(&self.0.right.to_le_bytes());
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DepthCodecError> {
        let Ok(raw) = <[u8; ENCODED_DEPTH_LEN]>::try_from(bytes) else {
            return Err(DepthCodecError::WrongLength {
                expected: ENCODED_DEPTH_LEN,
                found: bytes.len(),
            });
        };
        let left = i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
        let right = i32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]);
        Ok(Self(DepthPair::new(left, right)))
    }
}
