use std::collections::HashSet;

use bevy::prelude::*;

/// Phase the tool ended the last tick in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolPhase {
    #[default]
    Idle,
    /// Hovering a road; it is the sole selection and shows a preview.
    Previewing,
    /// Primary held; roads under the cursor join the selection.
    Selecting,
    /// Primary released over a road; the selection was committed.
    Applying,
}

/// Per-tick input the state machine decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolInput {
    /// Valid road under the cursor.
    pub hit: Option<Entity>,
    pub primary_just_pressed: bool,
    pub primary_held: bool,
    pub primary_just_released: bool,
    pub secondary_just_pressed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    /// Make the road the sole selection and cycle the mode.
    CycleMode(Entity),
    /// Extend the drag selection with whatever is under the cursor.
    Select(Option<Entity>),
    /// Commit the selection.
    Apply,
    /// Hover bookkeeping only.
    Preview(Option<Entity>),
}

impl ToolInput {
    /// Highest-priority action for this tick.
    pub fn action(&self) -> ToolAction {
        match self.hit {
            Some(road) if self.secondary_just_pressed => ToolAction::CycleMode(road),
            _ if self.primary_just_pressed || self.primary_held => ToolAction::Select(self.hit),
            Some(_) if self.primary_just_released => ToolAction::Apply,
            hit => ToolAction::Preview(hit),
        }
    }
}

/// Selection and highlight bookkeeping of the zoning tool.
///
/// Written only by the tool systems.
#[derive(Resource, Debug, Default)]
pub struct ZoningToolState {
    pub phase: ToolPhase,
    /// Roads the next apply will commit, in selection order.
    selection: Vec<Entity>,
    /// Road under the cursor the last time hover bookkeeping ran.
    hovered: Option<Entity>,
    highlighted: HashSet<Entity>,
}

impl ZoningToolState {
    pub fn selection(&self) -> &[Entity] {
        &self.selection
    }

    pub fn hovered(&self) -> Option<Entity> {
        self.hovered
    }

    pub fn is_selected(&self, road: Entity) -> bool {
        self.selection.contains(&road)
    }

    pub fn is_highlighted(&self, road: Entity) -> bool {
        self.highlighted.contains(&road)
    }

    pub fn is_clear(&self) -> bool {
        self.selection.is_empty() && self.highlighted.is_empty() && self.hovered.is_none()
    }

    /// Add a road to the selection. Returns false if it was already there.
    pub fn select(&mut self, road: Entity) -> bool {
        if self.is_selected(road) {
            return false;
        }
        self.selection.push(road);
        true
    }

    pub fn set_hovered(&mut self, road: Option<Entity>) {
        self.hovered = road;
    }

    /// Returns true only if the highlight membership changed.
    pub fn highlight(&mut self, road: Entity) -> bool {
        self.highlighted.insert(road)
    }

    pub fn unhighlight(&mut self, road: Entity) -> bool {
        self.highlighted.remove(&road)
    }

    /// Empty the selection, handing back what was in it.
    pub fn take_selection(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.selection)
    }

    /// Drop every highlight, handing back the roads that lost one.
    pub fn take_highlighted(&mut self) -> Vec<Entity> {
        self.highlighted.drain().collect()
    }

    /// Forget everything, e.g. when the tool is switched off.
    pub fn reset(&mut self) {
        self.phase = ToolPhase::Idle;
        self.selection.clear();
        self.hovered = None;
        self.highlighted.clear();
    }
}
