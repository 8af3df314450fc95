// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use bevy::{ecs::system::Resource, math::Vec3};
use serde::{Deserialize, Serialize};
use std::{fmt, mem};

#[allow(dead_code)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Element {
    Hydrogen = 1,
    Helium,
    Lithium,
    Beryllium,
    Boron,
    Carbon,
    Nitrogen,
    Oxygen,
    Fluorine,
    Neon,
    Sodium,
    Magnesium,
    Aluminium,
    Silicon,
    Phosphorus,
    Sulfur,
    Chlorine,
    Argon,
    Potassium,
    Calcium,
    Scandium,
    Titanium,
    Vanadium,
    Chromium,
    Manganese,
    Iron,
    Cobalt,
    Nickel,
    Copper,
    Zinc,
    Gallium,
    Germanium,
    Arsenic,
    Selenium,
    Bromine,
    Krypton,
    Rubidium,
    Strontium,
    Yttrium,
    Zirconium,
    Niobium,
    Molybdenum,
    Technetium,
    Ruthenium,
    Rhodium,
    Palladium,
    Silver,
    Cadmium,
    Indium,
    Tin,
    Antimony,
    Tellurium,
    Iodine,
    Xenon,
    Cesium,
    Barium,
    Lanthanum,
    Cerium,
    Praseodymium,
    Neodymium,
    Promethium,
    Samarium,
    Europium,
    Gadolinium,
    Terbium,
    Dysprosium,
    Holmium,
    Erbium,
    Thulium,
    Ytterbium,
    Lutetium,
    Hafnium,
    Tantalum,
    Tungsten,
    Rhenium,
    Osmium,
    Iridium,
    Platinum,
    Gold,
    Mercury,
    Thallium,
    Lead,
    Bismuth,
    Polonium,
    Astatine,
    Radon,
    Francium,
    Radium,
    Actinium,
    Thorium,
    Protactinium,
    Uranium,
    Neptunium,
    Plutonium,
    Americium,
    Curium,
    Berkelium,
    Californium,
    Einsteinium,
    Fermium,
    Mendelevium,
    Nobelium,
    Lawrencium,
    Rutherfordium,
    Dubnium,
    Seaborgium,
    Bohrium,
    Hassium,
    Meitnerium,
    Darmstadtium,
    Roentgenium,
    Copernicium,
    Nihonium,
    Flerovium,
    Moscovium,
    Livermorium,
    Tennessine,
    Oganesson,
}

/// Chemical symbols indexed by `atomic number - 1`.
const SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

impl Element {
    pub const MIN: Self = Element::Hydrogen;
    pub const MAX: Self = Element::Oganesson;

    pub fn from_atomic_number(n: u8) -> Option<Self> {
        if n >= 1 && n <= Self::MAX as u8 {
            // SAFETY: `Element` is `repr(u8)` with contiguous discriminants 1..=118.
            Some(unsafe { mem::transmute::<u8, Element>(n) })
        } else {
            None
        }
    }

    /// Looks up an element by its chemical symbol, ignoring case ("Si", "SI"
    /// and "si" all resolve to silicon).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let symbol = symbol.trim();
        SYMBOLS
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(symbol))
            .and_then(|index| Self::from_atomic_number(index as u8 + 1))
    }

    pub fn atomic_number(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> &'static str {
        SYMBOLS[self as usize - 1]
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// How an element is drawn in the scene, and how much room its atoms take up
/// when checking for overlap.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ElementRepr {
    /// sRGB colour, CPK convention.
    pub color: Vec3,
    /// Van der Waals radius in ångströms.
    pub radius: f32,
}

impl ElementRepr {
    pub const DEFAULT: Self = Self {
        color: Vec3::new(1.0, 0.078, 0.576), // pink
        radius: 1.5,
    };
}

#[derive(Resource)]
pub struct PeriodicTable {
    pub element_reprs: Vec<ElementRepr>,
}

impl Default for PeriodicTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodicTable {
    pub fn new() -> Self {
        let mut element_reprs = vec![ElementRepr::DEFAULT; 118];

        let mut set = |element: Element, color: Vec3, radius: f32| {
            element_reprs[element as usize - 1] = ElementRepr { color, radius };
        };

        set(Element::Hydrogen, Vec3::new(1.0, 1.0, 1.0), 1.10); // white
        set(Element::Helium, Vec3::new(0.851, 1.0, 1.0), 1.40);
        set(Element::Lithium, Vec3::new(0.8, 0.502, 1.0), 1.82);
        set(Element::Boron, Vec3::new(1.0, 0.710, 0.710), 1.92);
        set(Element::Carbon, Vec3::new(0.565, 0.565, 0.565), 1.70); // grey
        set(Element::Nitrogen, Vec3::new(0.188, 0.314, 0.973), 1.55); // blue
        set(Element::Oxygen, Vec3::new(1.0, 0.051, 0.051), 1.52); // red
        set(Element::Fluorine, Vec3::new(0.565, 0.878, 0.314), 1.47);
        set(Element::Neon, Vec3::new(0.702, 0.890, 0.961), 1.54);
        set(Element::Sodium, Vec3::new(0.671, 0.361, 0.949), 2.27);
        set(Element::Magnesium, Vec3::new(0.541, 1.0, 0.0), 1.73);
        set(Element::Aluminium, Vec3::new(0.749, 0.651, 0.651), 1.84);
        set(Element::Silicon, Vec3::new(0.941, 0.784, 0.627), 2.10);
        set(Element::Phosphorus, Vec3::new(1.0, 0.502, 0.0), 1.80); // orange
        set(Element::Sulfur, Vec3::new(1.0, 1.0, 0.188), 1.80); // yellow
        set(Element::Chlorine, Vec3::new(0.122, 0.941, 0.122), 1.75);
        set(Element::Argon, Vec3::new(0.502, 0.820, 0.890), 1.88);
        set(Element::Potassium, Vec3::new(0.561, 0.251, 0.831), 2.75);
        set(Element::Calcium, Vec3::new(0.239, 1.0, 0.0), 2.31);
        set(Element::Iron, Vec3::new(0.878, 0.4, 0.2), 2.04);
        set(Element::Copper, Vec3::new(0.784, 0.502, 0.2), 1.40);
        set(Element::Zinc, Vec3::new(0.490, 0.502, 0.690), 1.39);
        set(Element::Germanium, Vec3::new(0.4, 0.561, 0.561), 2.11);
        set(Element::Bromine, Vec3::new(0.651, 0.161, 0.161), 1.85);
        set(Element::Silver, Vec3::new(0.753, 0.753, 0.753), 1.72);
        set(Element::Iodine, Vec3::new(0.580, 0.0, 0.580), 1.98);
        set(Element::Gold, Vec3::new(1.0, 0.820, 0.137), 1.66);

        Self { element_reprs }
    }

    pub fn repr(&self, element: Element) -> &ElementRepr {
        &self.element_reprs[element as usize - 1]
    }

    /// Unknown symbols are drawn like hydrogen but keep the default radius.
    pub fn repr_for_symbol(&self, symbol: &str) -> ElementRepr {
        match Element::from_symbol(symbol) {
            Some(element) => *self.repr(element),
            None => ElementRepr {
                color: self.repr(Element::Hydrogen).color,
                radius: ElementRepr::DEFAULT.radius,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_line_up_with_atomic_numbers() {
        assert_eq!(Element::Hydrogen.symbol(), "H");
        assert_eq!(Element::Carbon.symbol(), "C");
        assert_eq!(Element::Silicon.symbol(), "Si");
        assert_eq!(Element::Gold.symbol(), "Au");
        assert_eq!(Element::Oganesson.symbol(), "Og");
        for n in 1..=118u8 {
            let element = Element::from_atomic_number(n).unwrap();
            assert_eq!(element.atomic_number(), n);
            assert_eq!(Element::from_symbol(element.symbol()), Some(element));
        }
    }

    #[test]
    fn from_symbol_ignores_case_and_whitespace() {
        assert_eq!(Element::from_symbol("SI"), Some(Element::Silicon));
        assert_eq!(Element::from_symbol("si"), Some(Element::Silicon));
        assert_eq!(Element::from_symbol(" O "), Some(Element::Oxygen));
        assert_eq!(Element::from_symbol("NE"), Some(Element::Neon));
        assert_eq!(Element::from_symbol("Xx"), None);
        assert_eq!(Element::from_symbol(""), None);
    }

    #[test]
    fn atomic_number_bounds() {
        assert_eq!(Element::from_atomic_number(0), None);
        assert_eq!(Element::from_atomic_number(119), None);
        assert_eq!(Element::from_atomic_number(1), Some(Element::MIN));
        assert_eq!(Element::from_atomic_number(118), Some(Element::MAX));
    }

    #[test]
    fn unknown_symbols_fall_back_to_hydrogen_colour() {
        let table = PeriodicTable::new();
        let repr = table.repr_for_symbol("Q");
        assert_eq!(repr.color, table.repr(Element::Hydrogen).color);
        assert_eq!(repr.radius, ElementRepr::DEFAULT.radius);
        assert_eq!(table.repr_for_symbol("c").radius, 1.70);
    }
}

// End of File
