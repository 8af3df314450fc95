// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use bevy::prelude::*;
use transform::{math, AxisKey, TransformMode};

use crate::{
    transform_controls::{set_world_transform, world_of, LocalTransforms},
    world_space::WorldSpaceSet,
    AppState, RemoveObject, Transforms, UiFocus,
};

mod key_command;
pub use key_command::{just_pressed_actions, KeyCommand, KEY_COMMANDS};

pub struct ActionsPlugin;

// Keyboard shortcuts become `EditorAction` events, which are then applied to
// the selected object.  The UI can send the same events.
impl Plugin for ActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Transforms>()
            .add_event::<EditorAction>()
            .add_event::<RemoveObject>()
            .add_systems(
                Update,
                (
                    send_key_actions.run_if(in_state(AppState::Editor)),
                    apply_editor_actions,
                )
                    .chain()
                    .before(WorldSpaceSet),
            );
    }
}

#[derive(Event, Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditorAction {
    ToggleTranslation,
    ToggleRotation,
    CycleAxis(AxisKey),
    SaveVector,
    ClearVectors,
    /// Rotate and move the selected object so the latest saved vector lines
    /// up against the one saved before it.
    AlignVectors,
    MoveToOrigin,
    RemoveSelected,
    MoveToVectorStart,
}

fn send_key_actions(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    ui_focus: Res<UiFocus>,
    mut actions: EventWriter<EditorAction>,
) {
    if ui_focus.keyboard {
        return;
    }
    for action in just_pressed_actions(&keyboard_input) {
        actions.send(action);
    }
}

pub fn apply_editor_actions(
    mut actions: EventReader<EditorAction>,
    mut transforms: ResMut<Transforms>,
    mut locals: LocalTransforms,
    mut removals: EventWriter<RemoveObject>,
) {
    for &action in actions.read() {
        match action {
            EditorAction::ToggleTranslation => {
                transforms.toggle_mode(TransformMode::Translation);
                info!("Transform mode: {}", transforms.mode());
            }
            EditorAction::ToggleRotation => {
                transforms.toggle_mode(TransformMode::Rotation);
                info!("Transform mode: {}", transforms.mode());
            }
            EditorAction::CycleAxis(key) => {
                transforms.cycle_axis(key);
                info!("Transform axis: {}", transforms.axis());
            }
            EditorAction::SaveVector => {
                let parent_of = |entity: Entity| {
                    locals
                        .get(entity)
                        .ok()
                        .and_then(|(_, parent)| parent.map(Parent::get))
                };
                match transforms.save_vector(parent_of) {
                    Ok(vector) => info!("Saved vector {:?} -> {:?}", vector.start, vector.end),
                    Err(err) => warn!("Cannot save vector: {}", err),
                }
            }
            EditorAction::ClearVectors => {
                transforms.clear_vectors();
                info!("Cleared saved vectors");
            }
            EditorAction::AlignVectors => align_selected(&transforms, &mut locals),
            EditorAction::MoveToOrigin => {
                let origin = transforms.origin();
                move_selected(&transforms, &mut locals, |_| Some(origin));
            }
            EditorAction::MoveToVectorStart => {
                let Some(latest) = transforms.vectors().last(0) else {
                    warn!("No saved vector to move to");
                    continue;
                };
                let start = latest.start;
                move_selected(&transforms, &mut locals, |locals| {
                    Transforms::position_of(start, locals)
                });
            }
            EditorAction::RemoveSelected => match transforms.selected() {
                Some(selected) => {
                    removals.send(RemoveObject(selected));
                }
                None => warn!("Nothing selected to remove"),
            },
        }
    }
}

/// Moves the selected object so its origin sits at the position `target`
/// picks.
fn move_selected(
    transforms: &Transforms,
    locals: &mut LocalTransforms,
    target: impl FnOnce(&LocalTransforms) -> Option<Vec3>,
) {
    let Some(selected) = transforms.selected() else {
        warn!("Nothing selected to move");
        return;
    };
    let (Some(mut world), Some(position)) = (world_of(selected, locals), target(locals)) else {
        return;
    };
    world.translation = position;
    set_world_transform(selected, world, locals);
}

fn align_selected(transforms: &Transforms, locals: &mut LocalTransforms) {
    let Some(selected) = transforms.selected() else {
        warn!("Nothing selected to align");
        return;
    };
    let (latest, previous) = match transforms.alignment_pair() {
        Ok(pair) => pair,
        Err(err) => {
            warn!("Cannot align: {}", err);
            return;
        }
    };
    let Some(world) = world_of(selected, locals) else {
        return;
    };
    let position_of = |id| Transforms::position_of(id, locals);
    let aligned = math::align_to(
        &world,
        latest.start_position(position_of),
        latest.vector(position_of),
        previous.start_position(position_of),
        previous.vector(position_of),
    );
    set_world_transform(selected, aligned, locals);
    debug!("Aligned {:?} to the previous vector", selected);
}

// End of File
