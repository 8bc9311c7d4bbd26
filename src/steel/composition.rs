//! Alloying elements and composition vectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Number of alloying elements in a composition.
pub const ELEMENT_COUNT: usize = 6;

/// Lower bound of every composition component.
pub const LOWER_BOUND: f64 = 0.01;

/// Upper bound of every composition component.
pub const UPPER_BOUND: f64 = 1.0;

/// Search box shared by every element.
pub const BOUNDS: [(f64, f64); ELEMENT_COUNT] = [(LOWER_BOUND, UPPER_BOUND); ELEMENT_COUNT];

/// An alloying element. Declaration order is the component order of a
/// [`Composition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Carbon,
    Manganese,
    Silicon,
    Chromium,
    Nickel,
    Molybdenum,
}

impl Element {
    /// All elements in component order.
    pub const ALL: [Element; ELEMENT_COUNT] = [
        Element::Carbon,
        Element::Manganese,
        Element::Silicon,
        Element::Chromium,
        Element::Nickel,
        Element::Molybdenum,
    ];

    /// Position of this element in a composition vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Chemical symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Element::Carbon => "C",
            Element::Manganese => "Mn",
            Element::Silicon => "Si",
            Element::Chromium => "Cr",
            Element::Nickel => "Ni",
            Element::Molybdenum => "Mo",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Proportions of the six alloying elements, `[C, Mn, Si, Cr, Ni, Mo]`.
///
/// Components are not required to sum to one. Serializes as a plain array
/// of six numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Composition([f64; ELEMENT_COUNT]);

impl Composition {
    /// Creates a composition from component values in element order.
    pub fn new(values: [f64; ELEMENT_COUNT]) -> Self {
        Self(values)
    }

    /// Creates a composition from a decision vector.
    ///
    /// Returns `None` unless the slice has exactly [`ELEMENT_COUNT`] values.
    pub fn from_genes(genes: &[f64]) -> Option<Self> {
        <[f64; ELEMENT_COUNT]>::try_from(genes).ok().map(Self)
    }

    /// Component values in element order.
    pub fn values(&self) -> &[f64; ELEMENT_COUNT] {
        &self.0
    }

    /// Whether every component lies within `[LOWER_BOUND, UPPER_BOUND]`.
    pub fn is_within_bounds(&self) -> bool {
        self.0
            .iter()
            .all(|x| (LOWER_BOUND..=UPPER_BOUND).contains(x))
    }
}

impl Index<Element> for Composition {
    type Output = f64;

    fn index(&self, element: Element) -> &f64 {
        &self.0[element.index()]
    }
}
