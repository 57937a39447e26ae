//! Zoning mode flags and the mode/depth translator.
//!
//! `ZoningMode` is the bit-flag view the UI and the tool operate on. Every
//! conversion between a mode and a `(left, right)` depth pair goes through
//! [`depths_from_mode`] / [`mode_from_depths`]; no other module re-derives the
//! left/right convention.
//!
//! Two independent instances of the mode exist as separate resources:
//! [`ToolZoningMode`] drives the interactive tool, [`RoadZoningMode`] drives
//! newly drawn roads. They share a type but have different writers.

use bevy::prelude::*;

use crate::depth::{DepthPair, MAX_ZONING_DEPTH};

bitflags::bitflags! {
    /// Which side(s) of a road receive zoning depth.
    ///
    /// The raw values are part of the UI channel contract (`None=0, Right=1,
    /// Left=2, Both=3`).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ZoningMode: u8 {
        const RIGHT = 0b01;
        const LEFT  = 0b10;
        const BOTH  = Self::RIGHT.bits() | Self::LEFT.bits();
    }
}

impl ZoningMode {
    /// No side selected.
    pub const NONE: Self = Self::empty();

    /// All four modes, in raw-value order.
    pub const ALL: [Self; 4] = [Self::NONE, Self::RIGHT, Self::LEFT, Self::BOTH];

    /// Validated conversion from the integer carried by the UI channel.
    pub fn from_raw(value: i32) -> Option<Self> {
        u8::try_from(value).ok().and_then(Self::from_bits)
    }

    /// Integer form published on the UI channel.
    pub fn to_raw(self) -> i32 {
        i32::from(self.bits())
    }

    /// Secondary-action cycle: Left → Right → Both → Left.
    ///
    /// `None` is not part of the cycle and re-enters it at `Left`.
    pub fn cycled(self) -> Self {
        if self == Self::LEFT {
            Self::RIGHT
        } else if self == Self::RIGHT {
            Self::BOTH
        } else {
            Self::LEFT
        }
    }

    /// Both ↔ None flip used by the panel's "Both" button. Any single-side
    /// mode flips to `Both`.
    pub fn flipped_both(self) -> Self {
        if self == Self::BOTH {
            Self::NONE
        } else {
            Self::BOTH
        }
    }

    pub fn label(self) -> &'static str {
        if self == Self::BOTH {
            "Both"
        } else if self == Self::LEFT {
            "Left"
        } else if self == Self::RIGHT {
            "Right"
        } else {
            "None"
        }
    }
}

impl Default for ZoningMode {
    fn default() -> Self {
        Self::BOTH
    }
}

/// Depth pair a mode stands for: a selected side gets the full depth.
pub fn depths_from_mode(mode: ZoningMode) -> DepthPair {
    DepthPair::new(
        if mode.contains(ZoningMode::LEFT) {
            MAX_ZONING_DEPTH
        } else {
            0
        },
        if mode.contains(ZoningMode::RIGHT) {
            MAX_ZONING_DEPTH
        } else {
            0
        },
    )
}

/// Inverse of [`depths_from_mode`]: any positive side counts as selected.
/// Published mode values go through here.
pub fn mode_from_depths(depths: DepthPair) -> ZoningMode {
    let mut mode = ZoningMode::NONE;
    if depths.left > 0 {
        mode |= ZoningMode::LEFT;
    }
    if depths.right > 0 {
        mode |= ZoningMode::RIGHT;
    }
    mode
}

/// Toggle policy shared by apply and preview.
///
/// - `None`: all-off becomes full on both sides, anything else clears.
/// - `Both`: any side on clears, all-off becomes full on both sides.
/// - `Left` / `Right`: flip only that side between 0 and full depth.
pub fn toggle_depths(current: DepthPair, mode: ZoningMode) -> DepthPair {
    let full = DepthPair::new(MAX_ZONING_DEPTH, MAX_ZONING_DEPTH);
    let flip = |value: i32| if value == 0 { MAX_ZONING_DEPTH } else { 0 };

    if mode == ZoningMode::NONE {
        if current.is_all_off() {
            full
        } else {
            DepthPair::ZERO
        }
    } else if mode == ZoningMode::BOTH {
        if current.is_any_on() {
            DepthPair::ZERO
        } else {
            full
        }
    } else if mode == ZoningMode::LEFT {
        DepthPair::new(flip(current.left), current.right)
    } else {
        DepthPair::new(current.left, flip(current.right))
    }
}

/// Mode of the interactive zoning tool.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolZoningMode(pub ZoningMode);

impl ToolZoningMode {
    pub fn depths(&self) -> DepthPair {
        depths_from_mode(self.0)
    }

    /// Mode as reported to the UI.
    pub fn reported(&self) -> ZoningMode {
        mode_from_depths(self.depths())
    }
}

/// Mode applied to roads drawn with a road prefab.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoadZoningMode(pub ZoningMode);

impl RoadZoningMode {
    pub fn depths(&self) -> DepthPair {
        depths_from_mode(self.0)
    }

    pub fn reported(&self) -> ZoningMode {
        mode_from_depths(self.depths())
    }
}
