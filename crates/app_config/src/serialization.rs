// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Text encodings of setting values as they are stored in the `value` column.

pub fn serialize_string(value: &str) -> String {
    value.to_owned()
}

pub fn deserialize_string(value: &str) -> String {
    value.to_owned()
}

pub fn serialize_bool(value: bool) -> String {
    value.to_string()
}

pub fn deserialize_bool(value: &str) -> Result<bool, std::str::ParseBoolError> {
    value.trim().parse::<bool>()
}

pub fn serialize_i32(value: i32) -> String {
    value.to_string()
}

pub fn deserialize_i32(value: &str) -> Result<i32, std::num::ParseIntError> {
    value.trim().parse::<i32>()
}

pub fn serialize_f32(value: f32) -> String {
    value.to_string()
}

pub fn deserialize_f32(value: &str) -> Result<f32, std::num::ParseFloatError> {
    value.trim().parse::<f32>()
}

// End of File
