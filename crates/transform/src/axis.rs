// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::fmt;

use bevy::math::{Quat, Vec3};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TransformMode {
    #[default]
    None,
    Translation,
    Rotation,
}

impl TransformMode {
    /// Pressing a mode's key a second time turns it back off.
    pub fn toggled(self, mode: TransformMode) -> TransformMode {
        if self == mode {
            TransformMode::None
        } else {
            mode
        }
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransformMode::None => "None",
            TransformMode::Translation => "Translation",
            TransformMode::Rotation => "Rotation",
        })
    }
}

/// The key that was pressed to change the constraint axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AxisKey {
    X,
    Y,
    Z,
    Vector,
}

/// Direction a transform is constrained to.  `Self*` axes follow the
/// selected object's own orientation.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    #[default]
    None,
    X,
    SelfX,
    Y,
    SelfY,
    Z,
    SelfZ,
    Vector,
}

impl Axis {
    /// World axis, then the object's own axis, then unconstrained again.
    /// Pressing a different key always starts at that key's world axis.
    pub fn cycled(self, key: AxisKey) -> Axis {
        let (world, local) = match key {
            AxisKey::X => (Axis::X, Axis::SelfX),
            AxisKey::Y => (Axis::Y, Axis::SelfY),
            AxisKey::Z => (Axis::Z, Axis::SelfZ),
            AxisKey::Vector => {
                return match self {
                    Axis::Vector => Axis::None,
                    _ => Axis::Vector,
                };
            }
        };
        if self == world {
            local
        } else if self == local {
            Axis::None
        } else {
            world
        }
    }

    /// Unit direction of the constraint, or `None` when unconstrained.
    ///
    /// `saved_vector` is the most recent alignment vector; the vector axis is
    /// unconstrained while there is none (or it has zero length).
    pub fn direction(self, object_rotation: Quat, saved_vector: Option<Vec3>) -> Option<Vec3> {
        match self {
            Axis::None => None,
            Axis::X => Some(Vec3::X),
            Axis::Y => Some(Vec3::Y),
            Axis::Z => Some(Vec3::Z),
            Axis::SelfX => (object_rotation * Vec3::X).try_normalize(),
            Axis::SelfY => (object_rotation * Vec3::Y).try_normalize(),
            Axis::SelfZ => (object_rotation * Vec3::Z).try_normalize(),
            Axis::Vector => saved_vector.and_then(Vec3::try_normalize),
        }
    }

    /// Axis to spin around: the constraint, or the view axis when there is
    /// none.
    pub fn rotation_axis(
        self,
        view_forward: Vec3,
        object_rotation: Quat,
        saved_vector: Option<Vec3>,
    ) -> Vec3 {
        self.direction(object_rotation, saved_vector)
            .unwrap_or(-view_forward)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::None => "None",
            Axis::X => "X",
            Axis::SelfX => "Self X",
            Axis::Y => "Y",
            Axis::SelfY => "Self Y",
            Axis::Z => "Z",
            Axis::SelfZ => "Self Z",
            Axis::Vector => "Vector",
        })
    }
}


// End of File
