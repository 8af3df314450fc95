// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use crate::{AppPlugin, StartupImports, APP_NAME, LOG_FILTER};
use app_config::{AppConfig, EditorSettings, WindowSettings};
use bevy::{
    log::{Level, LogPlugin},
    prelude::*,
    window::PresentMode,
};
use bevy_egui::EguiPlugin;
use bevy_mod_picking::DefaultPickingPlugins;
use smooth_bevy_cameras::{controllers::orbit::OrbitCameraPlugin, LookTransformPlugin};

const DEFAULT_RESOLUTION: Vec2 = Vec2::new(1280.0, 800.0);

pub fn start() {
    let app_config = AppConfig::new();
    let window_settings = WindowSettings::load(&app_config);
    let editor_settings = EditorSettings::load(&app_config);
    let resolution = window_settings
        .known_resolution()
        .unwrap_or(DEFAULT_RESOLUTION);

    let log_plugin = LogPlugin {
        filter: LOG_FILTER.into(),
        level: Level::INFO,
        ..default()
    };

    let window_plugin = WindowPlugin {
        primary_window: Some(Window {
            title: APP_NAME.into(),
            resolution: (resolution.x, resolution.y).into(),
            present_mode: PresentMode::AutoNoVsync,
            ..default()
        }),
        ..default()
    };

    let default_plugins = DefaultPlugins.set(log_plugin).set(window_plugin);

    App::new()
        .insert_resource(app_config)
        .insert_resource(window_settings)
        .insert_resource(editor_settings)
        .insert_resource(StartupImports::from_args(std::env::args_os().skip(1)))
        .insert_resource(ClearColor(Color::rgb(0.12, 0.12, 0.14)))
        .add_plugins(default_plugins)
        .add_plugins((
            EguiPlugin,
            DefaultPickingPlugins,
            LookTransformPlugin,
            // Our own input system feeds the orbit controller.
            OrbitCameraPlugin::new(true),
        ))
        .add_plugins(AppPlugin)
        .run();
}

// End of File
