// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use crate::{load_group, save_group, AppConfig, SettingValue, SettingsGroup};

use bevy::prelude::*;

/// User-tunable behaviour of the editor.
#[derive(Debug, Clone, PartialEq, Resource)]
pub struct EditorSettings {
    pub orbit_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    /// Closest the camera may get to its target.
    pub min_zoom: f32,
    /// Furthest the camera may get from its target.
    pub max_zoom: f32,
    /// Drawn atom radius as a fraction of the van der Waals radius.  Overlap
    /// checks use the same spheres that are drawn.
    pub atom_scale: f32,
    pub overlap_tolerance: f32,
    pub overlap_padding: f32,
    pub import_dir: String,
    pub export_path: String,
    pub fps_cap: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            orbit_speed: 0.08,
            pan_speed: 0.1,
            zoom_speed: 0.2,
            min_zoom: 2.0,
            max_zoom: 20.0,
            atom_scale: 0.4,
            overlap_tolerance: 1.0,
            overlap_padding: 0.1,
            import_dir: String::new(),
            export_path: "combined.xyz".to_owned(),
            fps_cap: 100.0,
        }
    }
}

impl EditorSettings {
    pub const GROUP: &'static str = "editor";

    pub fn load(app_config: &AppConfig) -> Self {
        let group = match load_group(app_config, Self::GROUP) {
            Ok(values) => SettingsGroup(values),
            Err(err) => {
                debug!("Using default editor settings: {}", err);
                SettingsGroup::default()
            }
        };
        Self::from_group(&group)
    }

    pub fn from_group(group: &SettingsGroup) -> Self {
        let d = Self::default();
        let positive = |name: &str, default: f32| {
            let value = group.f32_or(name, default);
            if value > 0.0 {
                value
            } else {
                default
            }
        };

        let min_zoom = positive("min_zoom", d.min_zoom);
        let max_zoom = positive("max_zoom", d.max_zoom).max(min_zoom);
        Self {
            orbit_speed: positive("orbit_speed", d.orbit_speed),
            pan_speed: positive("pan_speed", d.pan_speed),
            zoom_speed: positive("zoom_speed", d.zoom_speed),
            min_zoom,
            max_zoom,
            atom_scale: positive("atom_scale", d.atom_scale),
            overlap_tolerance: positive("overlap_tolerance", d.overlap_tolerance),
            overlap_padding: group.f32_or("overlap_padding", d.overlap_padding).max(0.0),
            import_dir: group.string_or("import_dir", &d.import_dir),
            export_path: group.string_or("export_path", &d.export_path),
            fps_cap: positive("fps_cap", d.fps_cap),
        }
    }

    pub fn save(&self, app_config: &AppConfig) -> rusqlite::Result<()> {
        save_group(
            app_config,
            Self::GROUP,
            &[
                ("orbit_speed", SettingValue::Float(self.orbit_speed)),
                ("pan_speed", SettingValue::Float(self.pan_speed)),
                ("zoom_speed", SettingValue::Float(self.zoom_speed)),
                ("min_zoom", SettingValue::Float(self.min_zoom)),
                ("max_zoom", SettingValue::Float(self.max_zoom)),
                ("atom_scale", SettingValue::Float(self.atom_scale)),
                ("overlap_tolerance", SettingValue::Float(self.overlap_tolerance)),
                ("overlap_padding", SettingValue::Float(self.overlap_padding)),
                ("import_dir", SettingValue::String(self.import_dir.clone())),
                ("export_path", SettingValue::String(self.export_path.clone())),
                ("fps_cap", SettingValue::Float(self.fps_cap)),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save_record_to_db;
    use tempfile::tempdir;

    #[test]
    fn settings_round_trip() {
        let dir = tempdir().unwrap();
        let config = AppConfig::with_db_path(dir.path().join("settings.sqlite3"));
        let settings = EditorSettings {
            max_zoom: 50.0,
            atom_scale: 0.6,
            export_path: "/tmp/out.xyz".to_owned(),
            ..default()
        };
        settings.save(&config).unwrap();
        assert_eq!(EditorSettings::load(&config), settings);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::with_db_path(dir.path().join("settings.sqlite3"));
        save_record_to_db(&config, "editor", "min_zoom", &SettingValue::Float(-3.0)).unwrap();
        save_record_to_db(&config, "editor", "max_zoom", &SettingValue::Float(1.0)).unwrap();
        save_record_to_db(&config, "editor", "fps_cap", &SettingValue::Bool(true)).unwrap();
        save_record_to_db(&config, "editor", "zoom_speed", &SettingValue::Int(2)).unwrap();

        let settings = EditorSettings::load(&config);
        assert_eq!(settings.min_zoom, 2.0);
        // Never closer than the minimum.
        assert_eq!(settings.max_zoom, 2.0);
        assert_eq!(settings.fps_cap, 100.0);
        assert_eq!(settings.zoom_speed, 2.0);
    }

    #[test]
    fn unpersisted_config_loads_defaults() {
        assert_eq!(
            EditorSettings::load(&AppConfig::default()),
            EditorSettings::default()
        );
    }
}

// End of File
