// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Persistent editor settings, stored as typed key/value rows in a local
//! SQLite database.

use bevy::{prelude::*, utils::HashMap};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::path::PathBuf;

mod editor_settings;
mod serialization;
pub mod setting_value;
mod window_settings;

pub use editor_settings::EditorSettings;
pub use setting_value::{SettingRecord, SettingValue, SettingsGroup};
pub use window_settings::WindowSettings;

#[derive(Resource, Debug, Default, Clone)]
pub struct AppConfig {
    /// sqlite connection path.  `None` means settings are not persisted.
    pub db_path: Option<PathBuf>,
}

impl AppConfig {
    /// Configuration stored in the platform's per-user config directory.
    pub fn new() -> Self {
        let mut config = Self::default();
        config.set_db_path();
        config
    }

    pub fn with_db_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(path.into()),
        }
    }

    pub fn set_db_path(&mut self) {
        let Some(config_dir) = directories::ProjectDirs::from("org", "xyzcombiner", "XYZCombiner")
            .map(|dirs| dirs.config_dir().to_owned())
        else {
            warn!("No configuration directory on this platform; settings will not be persisted.");
            self.db_path = None;
            return;
        };

        // Create config directory if it doesn't exist.
        if !config_dir.exists() {
            if let Err(err) = std::fs::create_dir_all(&config_dir) {
                self.db_path = None;
                error!(
                    "Failed to create config directory {}: {}",
                    config_dir.display(),
                    err
                );
                warn!("AppConfig will not be persisted as no storage can be created.");
                return;
            }
        }
        self.db_path = Some(config_dir.join("settings.sqlite3"));
    }

    fn connect(&self) -> SqliteResult<Connection> {
        let path = self.db_path.as_ref().ok_or_else(|| {
            rusqlite::Error::InvalidPath("no settings database path set".into())
        })?;
        let conn = Connection::open(path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                group_name TEXT NOT NULL,
                name TEXT NOT NULL,
                value TEXT NOT NULL,
                value_type TEXT NOT NULL,
                PRIMARY KEY (group_name, name)
            )",
            (),
        )?;
        Ok(conn)
    }
}

/// Reads every row of a settings group.
pub fn load_records(config: &AppConfig, group: &str) -> SqliteResult<Vec<SettingRecord>> {
    let conn = config.connect()?;
    let mut stmt = conn.prepare(
        "SELECT group_name, name, value, value_type FROM settings WHERE group_name = ?1",
    )?;
    let rows = stmt.query_map([group], |row| {
        Ok(SettingRecord {
            group_name: row.get(0)?,
            name: row.get(1)?,
            value: row.get(2)?,
            value_type: row.get(3)?,
        })
    })?;
    let records = rows.collect::<SqliteResult<Vec<_>>>()?;
    Ok(records)
}

/// Reads a settings group as typed values.  Rows whose value does not
/// decode as their recorded type are skipped with a warning.
pub fn load_group(config: &AppConfig, group: &str) -> SqliteResult<HashMap<String, SettingValue>> {
    let mut values = HashMap::new();
    for record in load_records(config, group)? {
        match SettingValue::deserialize(&record.value_type, &record.value) {
            Some(value) => {
                values.insert(record.name, value);
            }
            None => warn!(
                "Ignoring setting {}.{}: {:?} is not a valid {}",
                record.group_name, record.name, record.value, record.value_type
            ),
        }
    }
    Ok(values)
}

pub fn save_record_to_db(
    config: &AppConfig,
    group: &str,
    name: &str,
    value: &SettingValue,
) -> SqliteResult<()> {
    let conn = config.connect()?;
    conn.execute(
        "INSERT OR REPLACE INTO settings (group_name, name, value, value_type) VALUES (?1, ?2, ?3, ?4)",
        params![group, name, value.serialize(), value.type_as_string()],
    )?;
    Ok(())
}

/// Saves several values of one group in a single transaction.
pub fn save_group(
    config: &AppConfig,
    group: &str,
    values: &[(&str, SettingValue)],
) -> SqliteResult<()> {
    let mut conn = config.connect()?;
    let tx = conn.transaction()?;
    for (name, value) in values {
        tx.execute(
            "INSERT OR REPLACE INTO settings (group_name, name, value, value_type) VALUES (?1, ?2, ?3, ?4)",
            params![group, name, value.serialize(), value.type_as_string()],
        )?;
    }
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn records_round_trip_through_sqlite() {
        let dir = tempdir().unwrap();
        let config = AppConfig::with_db_path(dir.path().join("settings.sqlite3"));

        save_record_to_db(&config, "editor", "atom_scale", &SettingValue::Float(0.5)).unwrap();
        save_record_to_db(&config, "editor", "atom_scale", &SettingValue::Float(0.75)).unwrap();
        save_record_to_db(&config, "other", "atom_scale", &SettingValue::Int(1)).unwrap();

        let group = load_group(&config, "editor").unwrap();
        assert_eq!(group.len(), 1);
        assert_eq!(group.get("atom_scale"), Some(&SettingValue::Float(0.75)));
    }

    #[test]
    fn undecodable_rows_are_skipped() {
        let dir = tempdir().unwrap();
        let config = AppConfig::with_db_path(dir.path().join("settings.sqlite3"));
        save_record_to_db(&config, "editor", "fps_cap", &SettingValue::Int(100)).unwrap();
        config
            .connect()
            .unwrap()
            .execute(
                "INSERT INTO settings VALUES ('editor', 'broken', 'abc', 'float')",
                (),
            )
            .unwrap();

        let group = load_group(&config, "editor").unwrap();
        assert_eq!(group.get("fps_cap"), Some(&SettingValue::Int(100)));
        assert!(!group.contains_key("broken"));
        assert_eq!(load_records(&config, "editor").unwrap().len(), 2);
    }

    #[test]
    fn missing_path_is_an_error() {
        let config = AppConfig::default();
        assert!(load_group(&config, "editor").is_err());
        assert!(save_record_to_db(&config, "editor", "x", &SettingValue::Bool(true)).is_err());
    }
}

// End of File
