// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use bevy::utils::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::serialization::*;

/// One row of the `settings` table.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingRecord {
    pub group_name: String,
    pub name: String,
    pub value: String,
    pub value_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    String(String),
}

impl SettingValue {
    pub fn type_as_string(&self) -> &str {
        match self {
            SettingValue::Bool(_) => "bool",
            SettingValue::Int(_) => "int",
            SettingValue::Float(_) => "float",
            SettingValue::String(_) => "string",
        }
    }

    pub fn serialize(&self) -> String {
        match self {
            SettingValue::Bool(value) => serialize_bool(*value),
            SettingValue::Int(value) => serialize_i32(*value),
            SettingValue::Float(value) => serialize_f32(*value),
            SettingValue::String(value) => serialize_string(value),
        }
    }

    /// Decodes a stored value.  Returns `None` for an unknown type tag or a
    /// value that does not parse as its tagged type.
    pub fn deserialize(value_type: &str, value: &str) -> Option<Self> {
        match value_type {
            "bool" => deserialize_bool(value).ok().map(SettingValue::Bool),
            "int" => deserialize_i32(value).ok().map(SettingValue::Int),
            "float" => deserialize_f32(value).ok().map(SettingValue::Float),
            "string" => Some(SettingValue::String(deserialize_string(value))),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            SettingValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Integers widen to floats; anything else is a type mismatch.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            SettingValue::Float(value) => Some(*value),
            SettingValue::Int(value) => Some(*value as f32),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(value) => write!(f, "{}", value),
            SettingValue::Int(value) => write!(f, "{}", value),
            SettingValue::Float(value) => write!(f, "{}", value),
            SettingValue::String(value) => write!(f, "{}", value),
        }
    }
}

/// The settings of one group, keyed by name, with typed lookups that fall
/// back to a default when a value is missing or stored with the wrong type.
#[derive(Debug, Clone, Default)]
pub struct SettingsGroup(pub HashMap<String, SettingValue>);

impl SettingsGroup {
    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        self.0.get(name).and_then(SettingValue::as_bool).unwrap_or(default)
    }

    pub fn i32_or(&self, name: &str, default: i32) -> i32 {
        self.0.get(name).and_then(SettingValue::as_i32).unwrap_or(default)
    }

    pub fn f32_or(&self, name: &str, default: f32) -> f32 {
        self.0
            .get(name)
            .and_then(SettingValue::as_f32)
            .filter(|value| value.is_finite())
            .unwrap_or(default)
    }

    pub fn string_or(&self, name: &str, default: &str) -> String {
        self.0
            .get(name)
            .and_then(SettingValue::as_str)
            .unwrap_or(default)
            .to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_their_text_encoding() {
        for value in [
            SettingValue::Bool(true),
            SettingValue::Int(-42),
            SettingValue::Float(2.5),
            SettingValue::String("molecules/water.xyz".into()),
        ] {
            let decoded = SettingValue::deserialize(value.type_as_string(), &value.serialize());
            assert_eq!(decoded, Some(value));
        }
    }

    #[test]
    fn bad_rows_do_not_decode() {
        assert_eq!(SettingValue::deserialize("int", "twelve"), None);
        assert_eq!(SettingValue::deserialize("vec3", "1 2 3"), None);
    }

    #[test]
    fn group_lookups_fall_back_on_missing_or_mistyped_values() {
        let mut map = HashMap::new();
        map.insert("speed".to_owned(), SettingValue::Int(3));
        map.insert("flag".to_owned(), SettingValue::String("yes".into()));
        let group = SettingsGroup(map);
        assert_eq!(group.f32_or("speed", 1.0), 3.0);
        assert!(!group.bool_or("flag", false));
        assert_eq!(group.i32_or("missing", 7), 7);
        assert_eq!(group.string_or("speed", "fallback"), "fallback");
    }
}

// End of File
