// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use crate::{
    window_management::{
        apply_initial_window_settings, save_settings_on_exit, set_window_icon,
        update_window_settings,
    },
    AppState, EditorPlugin, FrameLimiterPlugin, LoadingPlugin, XyzAssetPlugin,
};
use app_config::{AppConfig, EditorSettings, WindowSettings};
use bevy::prelude::*;

/// Everything the editor adds on top of Bevy's default plugins and the
/// third-party input, camera and UI plugins.
pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<WindowSettings>()
            .init_resource::<EditorSettings>()
            .init_state::<AppState>()
            .add_plugins((
                XyzAssetPlugin,
                LoadingPlugin,
                EditorPlugin,
                FrameLimiterPlugin,
            ))
            .add_systems(Startup, (set_window_icon, apply_initial_window_settings))
            .add_systems(Update, update_window_settings)
            .add_systems(Last, save_settings_on_exit);
    }
}

// End of File
