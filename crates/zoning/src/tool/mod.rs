//! The interactive road-side zoning tool.
//!
//! Hovering a road previews the current [`ToolZoningMode`] on it, dragging
//! with the primary button collects roads, releasing commits them and the
//! secondary button cycles the mode. Previews are toggled against the
//! committed depth, so the preview always shows what an apply would write.

mod activation;
mod state;

use bevy::prelude::*;

pub use activation::{toggle_tool_hotkey, PreviousTool, ToolActivation};
pub use state::{ToolAction, ToolInput, ToolPhase, ZoningToolState};

use crate::depth::{toggle_base, ZoningDepth, ZoningPreview};
use crate::host::{
    CursorRaycast, Highlighted, Road, SubBlocks, ToolHandle, ToolSound, ToolSoundEvent,
    ToolSystem, Updated,
};
use crate::settings::ZoningSettings;
use crate::zoning_mode::{toggle_depths, ToolZoningMode};
use crate::zoning_sets::ZoningSet;

pub struct ZoningToolPlugin;

impl Plugin for ZoningToolPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ZoningToolState>()
            .init_resource::<ToolActivation>()
            .init_resource::<ToolZoningMode>()
            .init_resource::<ZoningSettings>()
            .add_event::<ToolSoundEvent>()
            .add_systems(Update, toggle_tool_hotkey.in_set(ZoningSet::Input))
            .add_systems(
                Update,
                (run_zoning_tool, sync_previews)
                    .chain()
                    .run_if(zoning_tool_active)
                    .in_set(ZoningSet::Tool),
            )
            .add_systems(
                Update,
                release_tool_state
                    .run_if(not(zoning_tool_active))
                    .in_set(ZoningSet::Tool),
            );
    }
}

/// Run condition: the host reports the zoning tool as active.
pub fn zoning_tool_active(tools: Option<Res<ToolSystem>>) -> bool {
    tools.is_some_and(|t| t.is_active(ToolHandle::ZoningController))
}

fn highlight(state: &mut ZoningToolState, commands: &mut Commands, road: Entity) {
    if !state.highlight(road) {
        return;
    }
    if let Some(mut entity) = commands.get_entity(road) {
        entity.try_insert((Highlighted, Updated));
    }
}

fn unhighlight(state: &mut ZoningToolState, commands: &mut Commands, road: Entity) {
    if !state.unhighlight(road) {
        return;
    }
    if let Some(mut entity) = commands.get_entity(road) {
        entity.remove::<Highlighted>().try_insert(Updated);
    }
}

/// Drop the selection, unhighlighting every road in it except `keep`.
fn release_selection(state: &mut ZoningToolState, commands: &mut Commands, keep: Option<Entity>) {
    for road in state.take_selection() {
        if Some(road) != keep {
            unhighlight(state, commands, road);
        }
    }
}

/// One tick of the tool state machine.
#[allow(clippy::too_many_arguments)]
pub fn run_zoning_tool(
    mouse: Res<ButtonInput<MouseButton>>,
    raycast: Option<Res<CursorRaycast>>,
    roads: Query<Option<&ZoningDepth>, (With<Road>, With<SubBlocks>)>,
    mut mode: ResMut<ToolZoningMode>,
    mut state: ResMut<ZoningToolState>,
    mut sounds: EventWriter<ToolSoundEvent>,
    mut commands: Commands,
) {
    let Some(raycast) = raycast else {
        return;
    };
    let state = &mut *state;

    let input = ToolInput {
        hit: raycast.hit_entity().filter(|&e| roads.contains(e)),
        primary_just_pressed: mouse.just_pressed(MouseButton::Left),
        primary_held: mouse.pressed(MouseButton::Left),
        primary_just_released: mouse.just_released(MouseButton::Left),
        secondary_just_pressed: mouse.just_pressed(MouseButton::Right),
    };

    match input.action() {
        ToolAction::CycleMode(road) => {
            release_selection(state, &mut commands, Some(road));
            state.select(road);
            highlight(state, &mut commands, road);
            state.set_hovered(Some(road));
            mode.0 = mode.0.cycled();
            debug!("zoning tool mode -> {}", mode.0.label());
            sounds.send(ToolSoundEvent(ToolSound::Snap));
            state.phase = ToolPhase::Previewing;
        }
        ToolAction::Select(hit) => {
            state.phase = ToolPhase::Selecting;
            if let Some(road) = hit {
                state.set_hovered(Some(road));
                if state.select(road) {
                    highlight(state, &mut commands, road);
                    sounds.send(ToolSoundEvent(ToolSound::SelectEntity));
                }
            }
        }
        ToolAction::Apply => {
            let selection = state.take_selection();
            let mut applied = 0usize;
            for road in selection {
                unhighlight(state, &mut commands, road);
                let Ok(committed) = roads.get(road) else {
                    continue;
                };
                let depths = toggle_depths(toggle_base(committed), mode.0);
                if let Some(mut entity) = commands.get_entity(road) {
                    entity
                        .remove::<ZoningPreview>()
                        .try_insert((ZoningDepth(depths), Updated));
                    applied += 1;
                }
            }
            if applied > 0 {
                info!("applied {} zoning to {applied} road(s)", mode.0.label());
                sounds.send(ToolSoundEvent(ToolSound::Apply));
            }
            state.set_hovered(input.hit);
            state.phase = ToolPhase::Applying;
        }
        ToolAction::Preview(hit) => {
            if hit != state.hovered() {
                release_selection(state, &mut commands, None);
                state.set_hovered(hit);
                if let Some(road) = hit {
                    state.select(road);
                    highlight(state, &mut commands, road);
                }
            }
            state.phase = if hit.is_some() {
                ToolPhase::Previewing
            } else {
                ToolPhase::Idle
            };
        }
    }
}

/// Keep preview records in step with the selection and the current mode.
#[allow(clippy::type_complexity)]
pub fn sync_previews(
    mode: Res<ToolZoningMode>,
    state: Res<ZoningToolState>,
    roads: Query<(Entity, Option<&ZoningDepth>, Option<&ZoningPreview>), With<Road>>,
    mut commands: Commands,
) {
    for &road in state.selection() {
        let Ok((_, committed, preview)) = roads.get(road) else {
            continue;
        };
        let desired = toggle_depths(toggle_base(committed), mode.0);
        if preview.map(|p| p.0) != Some(desired) {
            commands
                .entity(road)
                .try_insert((ZoningPreview(desired), Updated));
        }
    }

    for (road, _, preview) in &roads {
        if preview.is_some() && !state.is_selected(road) {
            commands
                .entity(road)
                .remove::<ZoningPreview>()
                .try_insert(Updated);
        }
    }
}

/// Release everything the tool holds once it is no longer the active tool.
pub fn release_tool_state(
    mut state: ResMut<ZoningToolState>,
    previews: Query<Entity, With<ZoningPreview>>,
    mut commands: Commands,
) {
    if !state.is_clear() {
        for road in state.take_highlighted() {
            if let Some(mut entity) = commands.get_entity(road) {
                entity.remove::<Highlighted>().try_insert(Updated);
            }
        }
        state.reset();
        debug!("zoning tool state released");
    }
    for road in &previews {
        commands
            .entity(road)
            .remove::<ZoningPreview>()
            .try_insert(Updated);
    }
}
