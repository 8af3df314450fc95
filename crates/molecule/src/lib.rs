// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

pub use crate::molecule::{Atom, Molecule};
pub use crate::xyz::{parse_xyz, read_xyz_file, write_xyz, write_xyz_file, XyzError};

mod molecule;
pub mod overlap;
mod xyz;

// End of File
