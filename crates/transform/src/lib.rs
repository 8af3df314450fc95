// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Engine-independent state for the interactive move/rotate gizmo.
//!
//! Objects are referred to by an opaque, copyable `Id` so the same state
//! machine can be driven by ECS entities or by plain integers in tests.

mod axis;
mod manager;
pub mod math;
mod vectors;

pub use axis::{Axis, AxisKey, TransformMode};
pub use manager::{DragState, TransformError, TransformManager};
pub use vectors::{AlignmentVector, SavedVectors};

// End of File
