// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use bevy::prelude::{ButtonInput, KeyCode};
use transform::AxisKey;

use super::EditorAction;

/// The single-key shortcuts of the editor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyCommand {
    pub key: KeyCode,
    pub action: EditorAction,
    pub help: &'static str,
}

pub const KEY_COMMANDS: [KeyCommand; 12] = [
    KeyCommand {
        key: KeyCode::KeyT,
        action: EditorAction::ToggleTranslation,
        help: "T: translate",
    },
    KeyCommand {
        key: KeyCode::KeyR,
        action: EditorAction::ToggleRotation,
        help: "R: rotate",
    },
    KeyCommand {
        key: KeyCode::KeyX,
        action: EditorAction::CycleAxis(AxisKey::X),
        help: "X: X / self X axis",
    },
    KeyCommand {
        key: KeyCode::KeyY,
        action: EditorAction::CycleAxis(AxisKey::Y),
        help: "Y: Y / self Y axis",
    },
    KeyCommand {
        key: KeyCode::KeyZ,
        action: EditorAction::CycleAxis(AxisKey::Z),
        help: "Z: Z / self Z axis",
    },
    KeyCommand {
        key: KeyCode::KeyV,
        action: EditorAction::CycleAxis(AxisKey::Vector),
        help: "V: saved vector axis",
    },
    KeyCommand {
        key: KeyCode::KeyS,
        action: EditorAction::SaveVector,
        help: "S: save vector from last selection",
    },
    KeyCommand {
        key: KeyCode::KeyC,
        action: EditorAction::ClearVectors,
        help: "C: clear vectors",
    },
    KeyCommand {
        key: KeyCode::KeyQ,
        action: EditorAction::AlignVectors,
        help: "Q: align the two saved vectors",
    },
    KeyCommand {
        key: KeyCode::KeyO,
        action: EditorAction::MoveToOrigin,
        help: "O: move to origin",
    },
    KeyCommand {
        key: KeyCode::Backspace,
        action: EditorAction::RemoveSelected,
        help: "Backspace: remove",
    },
    KeyCommand {
        key: KeyCode::ControlLeft,
        action: EditorAction::MoveToVectorStart,
        help: "Left Ctrl: move to vector start",
    },
];

/// Actions whose keys went down this frame, in table order.
pub fn just_pressed_actions(input: &ButtonInput<KeyCode>) -> impl Iterator<Item = EditorAction> + '_ {
    KEY_COMMANDS
        .iter()
        .filter(|command| input.just_pressed(command.key))
        .map(|command| command.action)
}


// End of File
