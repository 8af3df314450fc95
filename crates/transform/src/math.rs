// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use bevy::{
    math::{Quat, Vec2, Vec3},
    transform::components::Transform,
};

const EPSILON: f32 = 1e-6;

/// Where a ray meets a plane.  `None` if the ray runs parallel to the plane
/// or starts on the far side heading away from it.
pub fn ray_plane_intersection(
    ray_origin: Vec3,
    ray_direction: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<Vec3> {
    let denom = ray_direction.dot(plane_normal);
    if denom.abs() < EPSILON {
        return None;
    }
    let t = (plane_point - ray_origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None;
    }
    Some(ray_origin + ray_direction * t)
}

/// Normal of the plane a translation drag moves across.
///
/// Free drags move in the plane facing the camera.  Constrained drags move
/// in the plane that contains the axis and faces the camera as squarely as
/// possible, so cursor motion maps onto the axis predictably.
pub fn drag_plane_normal(axis: Option<Vec3>, view_forward: Vec3) -> Vec3 {
    let facing = -view_forward.normalize_or_zero();
    let Some(axis) = axis.and_then(Vec3::try_normalize) else {
        return facing;
    };
    let rejected = facing - axis * facing.dot(axis);
    rejected.try_normalize().unwrap_or(facing)
}

pub fn constrain_to_axis(delta: Vec3, axis: Vec3) -> Vec3 {
    let axis = axis.normalize_or_zero();
    axis * delta.dot(axis)
}

/// Signed angle between two cursor offsets measured from a pivot, in window
/// coordinates (y grows downward).  Positive angles are clockwise on screen.
pub fn signed_screen_angle(from: Vec2, to: Vec2) -> f32 {
    const MIN_OFFSET: f32 = 1e-3;
    if from.length() < MIN_OFFSET || to.length() < MIN_OFFSET {
        return 0.0;
    }
    from.perp_dot(to).atan2(from.dot(to))
}

/// Rotation about `axis` that turns the object clockwise on screen for a
/// positive `screen_angle`, whichever way the axis points relative to the
/// camera.
pub fn rotation_about(axis: Vec3, screen_angle: f32, view_forward: Vec3) -> Quat {
    let Some(axis) = axis.try_normalize() else {
        return Quat::IDENTITY;
    };
    // Seen from behind (looking along the axis) a positive right-handed
    // rotation is clockwise.
    let sign = if axis.dot(view_forward) < 0.0 { -1.0 } else { 1.0 };
    Quat::from_axis_angle(axis, screen_angle * sign)
}

/// Snaps a transform so that one alignment vector lines up head-to-tail with
/// another.
///
/// The transform is rotated about `moving_start` until the reversed
/// `moving_vec` points along `target_vec`, then translated so `moving_start`
/// lands on `target_start`.  A zero-length vector skips the rotation.
pub fn align_to(
    transform: &Transform,
    moving_start: Vec3,
    moving_vec: Vec3,
    target_start: Vec3,
    target_vec: Vec3,
) -> Transform {
    let mut result = *transform;
    if let (Some(from), Some(to)) = ((-moving_vec).try_normalize(), target_vec.try_normalize()) {
        result.rotate_around(moving_start, Quat::from_rotation_arc(from, to));
    }
    result.translation += target_start - moving_start;
    result
}


// End of File
