// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use bevy::{math::Vec3, transform::components::Transform};
use common::BoundingBox;
use periodic_table::{Element, PeriodicTable};

/// A single atom as it appears in a structure file.
///
/// The symbol is kept exactly as written so that structures containing
/// symbols we don't recognize still survive an import/export cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    pub symbol: String,
    pub position: Vec3,
}

impl Atom {
    pub fn new(symbol: impl Into<String>, position: Vec3) -> Self {
        Self {
            symbol: symbol.into(),
            position,
        }
    }

    pub fn element(&self) -> Option<Element> {
        Element::from_symbol(&self.symbol)
    }
}

/// A named, ordered list of atoms.
///
/// Atom order is significant: it is the order in which atoms were read and
/// the order in which they are written back out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Molecule {
    pub name: String,
    pub atoms: Vec<Atom>,
}

impl Molecule {
    pub fn new(name: impl Into<String>, atoms: Vec<Atom>) -> Self {
        Self {
            name: name.into(),
            atoms,
        }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Mean atom position, or the origin for an empty molecule.
    pub fn centroid(&self) -> Vec3 {
        if self.atoms.is_empty() {
            return Vec3::ZERO;
        }
        let sum: Vec3 = self.atoms.iter().map(|atom| atom.position).sum();
        sum / self.atoms.len() as f32
    }

    /// The bounding volume of the molecule, treating every atom as a sphere of
    /// its van der Waals radius multiplied by `scale`.
    pub fn bounding_box(&self, periodic_table: &PeriodicTable, scale: f32) -> BoundingBox {
        let mut bb = BoundingBox::empty();
        for atom in &self.atoms {
            let radius = periodic_table.repr_for_symbol(&atom.symbol).radius * scale;
            bb.enclose_sphere(atom.position, radius);
        }
        bb
    }

    /// Splits the molecule into its centroid and a copy whose atoms are
    /// expressed relative to that centroid.  Adding the centroid back to each
    /// atom yields the original positions.
    pub fn recentered(&self) -> (Vec3, Molecule) {
        let centroid = self.centroid();
        let atoms = self
            .atoms
            .iter()
            .map(|atom| Atom::new(atom.symbol.clone(), atom.position - centroid))
            .collect();
        (centroid, Molecule::new(self.name.clone(), atoms))
    }

    /// Bakes `transform` into the atom positions.
    pub fn transformed(&self, transform: &Transform) -> Molecule {
        let atoms = self
            .atoms
            .iter()
            .map(|atom| Atom::new(atom.symbol.clone(), transform.transform_point(atom.position)))
            .collect();
        Molecule::new(self.name.clone(), atoms)
    }

    /// Merges several placed molecules into one, in iteration order.
    pub fn combine<'a>(
        name: impl Into<String>,
        parts: impl IntoIterator<Item = (Transform, &'a Molecule)>,
    ) -> Molecule {
        let mut atoms = Vec::new();
        for (transform, molecule) in parts {
            atoms.extend(molecule.transformed(&transform).atoms);
        }
        Molecule::new(name, atoms)
    }
}


// End of File
