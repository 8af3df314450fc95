// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use app_config::EditorSettings;
use bevy::{
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
};
use smooth_bevy_cameras::{
    controllers::orbit::{ControlEvent, OrbitCameraBundle, OrbitCameraController},
    LookTransform,
};

use crate::UiFocus;

const INITIAL_EYE: Vec3 = Vec3::new(0.0, 0.0, 12.0);

/// Pixel scroll deltas are scaled down to roughly match one wheel notch.
const PIXELS_PER_LINE: f32 = 100.0;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, camera_input);
    }
}

/// Marks the camera looking at the scene.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct EditorCamera;

fn spawn_camera(mut commands: Commands, settings: Res<EditorSettings>) {
    commands
        .spawn((Camera3dBundle::default(), EditorCamera, Name::new("Camera")))
        .insert(OrbitCameraBundle::new(
            OrbitCameraController {
                mouse_rotate_sensitivity: Vec2::splat(settings.orbit_speed),
                mouse_translate_sensitivity: Vec2::splat(settings.pan_speed),
                mouse_wheel_zoom_sensitivity: settings.zoom_speed,
                ..default()
            },
            INITIAL_EYE,
            Vec3::ZERO,
            Vec3::Y,
        ));
}

/// Factor to scale the camera's distance by so that one scroll of `lines`
/// notches moves it by `zoom_speed` per notch, staying within the allowed
/// range.
pub fn zoom_factor(radius: f32, lines: f32, settings: &EditorSettings) -> f32 {
    if radius <= f32::EPSILON {
        return 1.0;
    }
    let wanted = radius * (1.0 - lines * settings.zoom_speed).max(0.05);
    wanted.clamp(settings.min_zoom, settings.max_zoom) / radius
}

/// Right drag orbits, middle drag pans and the wheel zooms, unless the
/// pointer is over the side panel.
fn camera_input(
    mut motion_events: EventReader<MouseMotion>,
    mut wheel_events: EventReader<MouseWheel>,
    buttons: Res<ButtonInput<MouseButton>>,
    ui_focus: Res<UiFocus>,
    settings: Res<EditorSettings>,
    cameras: Query<(&LookTransform, &OrbitCameraController), With<EditorCamera>>,
    mut control_events: EventWriter<ControlEvent>,
) {
    let Ok((look, controller)) = cameras.get_single() else {
        return;
    };
    let motion: Vec2 = motion_events.read().map(|event| event.delta).sum();
    let lines: f32 = wheel_events
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
        })
        .sum();
    if ui_focus.pointer || !controller.enabled {
        return;
    }

    if buttons.pressed(MouseButton::Right) && motion != Vec2::ZERO {
        control_events.send(ControlEvent::Orbit(
            controller.mouse_rotate_sensitivity * motion,
        ));
    } else if buttons.pressed(MouseButton::Middle) && motion != Vec2::ZERO {
        control_events.send(ControlEvent::TranslateTarget(
            controller.mouse_translate_sensitivity * motion,
        ));
    }

    if lines != 0.0 {
        control_events.send(ControlEvent::Zoom(zoom_factor(look.radius(), lines, &settings)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_moves_by_the_configured_fraction() {
        let settings = EditorSettings::default();
        let factor = zoom_factor(10.0, 1.0, &settings);
        assert!((factor - (1.0 - settings.zoom_speed)).abs() < 1e-6);
        let factor = zoom_factor(10.0, -1.0, &settings);
        assert!((factor - (1.0 + settings.zoom_speed)).abs() < 1e-6);
    }

    #[test]
    fn zoom_stays_within_limits() {
        let settings = EditorSettings::default();
        let radius = settings.min_zoom + 0.1;
        assert!((radius * zoom_factor(radius, 5.0, &settings) - settings.min_zoom).abs() < 1e-5);
        let radius = settings.max_zoom - 0.1;
        assert!((radius * zoom_factor(radius, -5.0, &settings) - settings.max_zoom).abs() < 1e-4);
        assert_eq!(zoom_factor(0.0, 1.0, &settings), 1.0);
    }
}

// End of File
