// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Reading and writing the plain-text XYZ structure format:
//!
//! ```text
//! 3
//! water
//! O 0.000000 0.000000 0.000000
//! H 0.960000 0.000000 0.000000
//! H -0.240000 0.930000 0.000000
//! ```
//!
//! The first line holds the atom count, the second the structure's name, and
//! every following line one atom: its element symbol and three coordinates.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::num::ParseFloatError;
use std::path::Path;

use bevy::math::Vec3;
use thiserror::Error;

use crate::molecule::{Atom, Molecule};

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Missing number of atoms")]
    MissingAtomCount,

    #[error("Invalid number of atoms: {0:?}")]
    InvalidAtomCount(String),

    #[error("Missing structure name")]
    MissingName,

    #[error("Invalid atom format on line {line}: {content:?}")]
    InvalidAtomLine { line: usize, content: String },

    #[error("Invalid coordinate on line {line}: {source}")]
    InvalidCoordinate {
        line: usize,
        #[source]
        source: ParseFloatError,
    },

    #[error("Coordinate on line {line} is not finite: {token:?}")]
    NonFiniteCoordinate { line: usize, token: String },

    #[error("Expected {expected} atoms, but found {found}")]
    AtomCountMismatch { expected: usize, found: usize },
}

/// Parses the contents of an XYZ file.
///
/// Exactly as many atom lines as the header announces are read; anything
/// after them is ignored.  Tokens after the third coordinate are ignored too.
pub fn parse_xyz(content: &str) -> Result<Molecule, XyzError> {
    let mut lines = content.lines().map(|line| line.trim_end_matches('\r'));

    let count_line = lines.next().ok_or(XyzError::MissingAtomCount)?;
    let expected: usize = count_line
        .trim()
        .parse()
        .map_err(|_| XyzError::InvalidAtomCount(count_line.to_owned()))?;

    let name = lines.next().ok_or(XyzError::MissingName)?.trim().to_owned();

    // The header is untrusted, so it only bounds the read.
    let mut atoms = Vec::with_capacity(expected.min(1024));
    for (index, line) in lines.take(expected).enumerate() {
        // 1-based, after the count and name lines.
        let line_number = index + 3;
        atoms.push(parse_atom_line(line, line_number)?);
    }

    if atoms.len() != expected {
        return Err(XyzError::AtomCountMismatch {
            expected,
            found: atoms.len(),
        });
    }

    Ok(Molecule::new(name, atoms))
}

fn parse_atom_line(line: &str, line_number: usize) -> Result<Atom, XyzError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(XyzError::InvalidAtomLine {
            line: line_number,
            content: line.to_owned(),
        });
    }

    let coordinate = |token: &str| {
        let value = token
            .parse::<f32>()
            .map_err(|source| XyzError::InvalidCoordinate {
                line: line_number,
                source,
            })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(XyzError::NonFiniteCoordinate {
                line: line_number,
                token: token.to_owned(),
            })
        }
    };

    Ok(Atom::new(
        parts[0],
        Vec3::new(
            coordinate(parts[1])?,
            coordinate(parts[2])?,
            coordinate(parts[3])?,
        ),
    ))
}

/// Serializes a molecule in XYZ format, six decimal places per coordinate.
pub fn write_xyz(molecule: &Molecule) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = writeln!(out, "{}", molecule.atoms.len());
    let _ = writeln!(out, "{}", molecule.name.lines().collect::<Vec<_>>().join(" "));
    for atom in &molecule.atoms {
        let _ = writeln!(
            out,
            "{} {:.6} {:.6} {:.6}",
            atom.symbol, atom.position.x, atom.position.y, atom.position.z
        );
    }
    out
}

pub fn read_xyz_file(path: impl AsRef<Path>) -> Result<Molecule, XyzError> {
    let content = fs::read_to_string(path)?;
    parse_xyz(&content)
}

pub fn write_xyz_file(path: impl AsRef<Path>, molecule: &Molecule) -> Result<(), XyzError> {
    fs::write(path, write_xyz(molecule))?;
    Ok(())
}


// End of File
