// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Moving and turning the selected object with the cursor while a transform
//! mode is active, and drawing the constraint axis and saved vectors.

use bevy::{prelude::*, window::PrimaryWindow};
use transform::{math, DragState, TransformManager, TransformMode};

use crate::{
    world_space::{to_local, world_transform, WorldSpaceSet},
    AppState, EditorCamera, UiFocus,
};

/// Half the length of the drawn constraint axis.
const AXIS_LINE_EXTENT: f32 = 100.0;

pub struct TransformControlsPlugin;

impl Plugin for TransformControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Transforms>().add_systems(
            Update,
            (drive_selected_object, draw_transform_gizmos)
                .chain()
                .after(WorldSpaceSet)
                .run_if(in_state(AppState::Editor)),
        );
    }
}

/// The editor's transform state, keyed by entity.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct Transforms(pub TransformManager<Entity>);

impl Transforms {
    /// World position of a live entity.
    pub fn position_of(entity: Entity, locals: &LocalTransforms) -> Option<Vec3> {
        world_of(entity, locals).map(|transform| transform.translation)
    }

    /// Offset of the most recently saved vector, if any.
    pub fn latest_vector(&self, locals: &LocalTransforms) -> Option<Vec3> {
        self.vectors()
            .last(0)
            .map(|vector| vector.vector(|id| Self::position_of(id, locals)))
    }
}

/// Every positioned entity, with its parent.
pub type LocalTransforms<'w, 's> =
    Query<'w, 's, (&'static mut Transform, Option<&'static Parent>)>;

/// An entity's transform in world coordinates, composed from the local
/// transforms of it and its ancestors.
pub fn world_of(entity: Entity, locals: &LocalTransforms) -> Option<Transform> {
    world_transform(entity, |entity| {
        locals
            .get(entity)
            .ok()
            .map(|(transform, parent)| (*transform, parent.map(Parent::get)))
    })
}

/// Replaces an entity's world transform, converting it into its parent's
/// frame when it has one.
pub fn set_world_transform(entity: Entity, world: Transform, locals: &mut LocalTransforms) {
    let parent_world = match locals.get(entity) {
        Ok((_, Some(parent))) => world_of(parent.get(), locals),
        Ok((_, None)) => None,
        Err(_) => return,
    };
    if let Ok((mut transform, _)) = locals.get_mut(entity) {
        *transform = to_local(world, parent_world);
    }
}

fn drive_selected_object(
    mut transforms: ResMut<Transforms>,
    ui_focus: Res<UiFocus>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<EditorCamera>>,
    mut locals: LocalTransforms,
) {
    let mode = transforms.mode();
    if mode == TransformMode::None || ui_focus.pointer {
        return;
    }
    let Some(selected) = transforms.selected() else {
        return;
    };
    let Some(cursor) = windows.get_single().ok().and_then(Window::cursor_position) else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let Some(mut world) = world_of(selected, &locals) else {
        return;
    };

    let view_forward = camera_transform.compute_transform().rotation * Vec3::NEG_Z;
    let saved_vector = transforms.latest_vector(&locals);
    let axis = transforms.axis();

    match mode {
        TransformMode::Translation => {
            let Some(ray) = camera.viewport_to_world(camera_transform, cursor) else {
                return;
            };
            let direction = axis.direction(world.rotation, saved_vector);
            match transforms.drag {
                DragState::Translating {
                    plane_point,
                    plane_normal,
                    last_hit,
                } => {
                    let Some(hit) = math::ray_plane_intersection(
                        ray.origin,
                        *ray.direction,
                        plane_point,
                        plane_normal,
                    ) else {
                        return;
                    };
                    let delta = hit - last_hit;
                    world.translation += match direction {
                        Some(axis) => math::constrain_to_axis(delta, axis),
                        None => delta,
                    };
                    set_world_transform(selected, world, &mut locals);
                    transforms.drag = DragState::Translating {
                        plane_point,
                        plane_normal,
                        last_hit: hit,
                    };
                }
                _ => {
                    let plane_normal = math::drag_plane_normal(direction, view_forward);
                    let plane_point = world.translation;
                    if let Some(hit) = math::ray_plane_intersection(
                        ray.origin,
                        *ray.direction,
                        plane_point,
                        plane_normal,
                    ) {
                        transforms.drag = DragState::Translating {
                            plane_point,
                            plane_normal,
                            last_hit: hit,
                        };
                    }
                }
            }
        }
        TransformMode::Rotation => {
            let Some(pivot) = camera.world_to_viewport(camera_transform, world.translation) else {
                return;
            };
            let offset = cursor - pivot;
            if let DragState::Rotating { last_offset } = transforms.drag {
                let angle = math::signed_screen_angle(last_offset, offset);
                if angle != 0.0 {
                    let axis = axis.rotation_axis(view_forward, world.rotation, saved_vector);
                    world.rotate_around(
                        world.translation,
                        math::rotation_about(axis, angle, view_forward),
                    );
                    set_world_transform(selected, world, &mut locals);
                }
            }
            transforms.drag = DragState::Rotating {
                last_offset: offset,
            };
        }
        TransformMode::None => {}
    }
}

fn draw_transform_gizmos(
    mut gizmos: Gizmos,
    transforms: Res<Transforms>,
    locals: LocalTransforms,
) {
    if let Some(selected) = transforms.selected() {
        if let Some(world) = world_of(selected, &locals) {
            let saved_vector = transforms.latest_vector(&locals);
            if let Some(axis) = transforms.axis().direction(world.rotation, saved_vector) {
                gizmos.line(
                    world.translation + axis * AXIS_LINE_EXTENT,
                    world.translation - axis * AXIS_LINE_EXTENT,
                    Color::CYAN,
                );
            }
        }
    }

    // Oldest first, so the most recent vector ends up red.
    let colors = [Color::ORANGE, Color::RED];
    let count = transforms.vectors().len();
    for (i, vector) in transforms.vectors().iter().enumerate() {
        let color = colors[(i + colors.len() - count).min(colors.len() - 1)];
        let start = Transforms::position_of(vector.start, &locals);
        let end = Transforms::position_of(vector.end, &locals);
        if let (Some(start), Some(end)) = (start, end) {
            gizmos.arrow(start, end, color);
        }
    }
}

// End of File
