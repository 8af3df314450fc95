// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use crate::{load_group, save_group, AppConfig, SettingValue, SettingsGroup};

use bevy::prelude::*;

/// Placement of the primary window, restored on the next launch.
#[derive(Debug, Clone, PartialEq, Resource)]
pub struct WindowSettings {
    /// Logical inner size.  Non-positive components mean "not yet known".
    pub resolution: Vec2,
    /// Physical position of the outer top-left corner.
    pub position: IVec2,
    pub maximized: bool,
    pub fullscreen: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            resolution: Vec2::new(-1.0, -1.0),
            position: IVec2::ZERO,
            maximized: false,
            fullscreen: false,
        }
    }
}

impl WindowSettings {
    pub const GROUP: &'static str = "primary_window";
    pub const MIN_WIDTH: f32 = 640.0;
    pub const MIN_HEIGHT: f32 = 480.0;

    pub fn load(app_config: &AppConfig) -> Self {
        let defaults = Self::default();
        let group = match load_group(app_config, Self::GROUP) {
            Ok(values) => SettingsGroup(values),
            Err(err) => {
                debug!("Using default window settings: {}", err);
                SettingsGroup::default()
            }
        };

        Self {
            resolution: Vec2::new(
                group.f32_or("resolution_x", defaults.resolution.x),
                group.f32_or("resolution_y", defaults.resolution.y),
            ),
            position: IVec2::new(
                group.i32_or("position_x", defaults.position.x),
                group.i32_or("position_y", defaults.position.y),
            ),
            maximized: group.bool_or("maximized", defaults.maximized),
            fullscreen: group.bool_or("fullscreen", defaults.fullscreen),
        }
    }

    pub fn save(&self, app_config: &AppConfig) -> rusqlite::Result<()> {
        save_group(
            app_config,
            Self::GROUP,
            &[
                ("resolution_x", SettingValue::Float(self.resolution.x)),
                ("resolution_y", SettingValue::Float(self.resolution.y)),
                ("position_x", SettingValue::Int(self.position.x)),
                ("position_y", SettingValue::Int(self.position.y)),
                ("maximized", SettingValue::Bool(self.maximized)),
                ("fullscreen", SettingValue::Bool(self.fullscreen)),
            ],
        )
    }

    /// The saved size, if one has been recorded.
    pub fn known_resolution(&self) -> Option<Vec2> {
        (self.resolution.x > 0.0 && self.resolution.y > 0.0).then_some(
            self.resolution
                .max(Vec2::new(Self::MIN_WIDTH, Self::MIN_HEIGHT)),
        )
    }
}


// End of File
