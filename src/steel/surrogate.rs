//! Linear surrogate for alloy properties and the constrained problem built
//! on it.
//!
//! ```text
//! strength  = 250 + 700·C + 120·Mn + 80·Cr + 250·Mo
//! cost      = 180 + 5·C + 15·Mn + 180·Cr + 450·Ni + 600·Mo
//! ductility = 35 − 25·C − 8·Mn
//! stability = 0.98 − 0.05·C
//! ```
//!
//! Silicon is a decision variable but enters no formula.

use super::composition::{Composition, Element, BOUNDS};
use crate::nsga2::{ConstrainedProblem, Evaluation, GenerationStats};
use serde::Serialize;
use tracing::debug;

/// Minimum ductility (percent elongation) every composition must reach.
pub const MIN_DUCTILITY: f64 = 12.0;

/// Surrogate material properties of a composition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Properties {
    /// Tensile strength (MPa).
    pub strength: f64,

    /// Relative production cost.
    pub cost: f64,

    /// Elongation at break (%).
    pub ductility: f64,
}

impl Properties {
    /// Evaluates the surrogate for a composition.
    pub fn of(composition: &Composition) -> Self {
        properties(composition.values())
    }
}

/// Reported metrics of a solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    /// Tensile strength (MPa).
    pub strength: f64,

    /// Relative production cost.
    pub cost: f64,

    /// Phase stability score, `0.98 − 0.05·C`.
    pub stability: f64,
}

impl Metrics {
    /// Recomputes the reporting metrics from a composition.
    pub fn of(composition: &Composition) -> Self {
        let p = Properties::of(composition);
        Self {
            strength: p.strength,
            cost: p.cost,
            stability: 0.98 - 0.05 * composition[Element::Carbon],
        }
    }
}

fn properties(x: &[f64]) -> Properties {
    let c = x[Element::Carbon.index()];
    let mn = x[Element::Manganese.index()];
    let cr = x[Element::Chromium.index()];
    let ni = x[Element::Nickel.index()];
    let mo = x[Element::Molybdenum.index()];

    Properties {
        strength: 250.0 + 700.0 * c + 120.0 * mn + 80.0 * cr + 250.0 * mo,
        cost: 180.0 + 5.0 * c + 15.0 * mn + 180.0 * cr + 450.0 * ni + 600.0 * mo,
        ductility: 35.0 - 25.0 * c - 8.0 * mn,
    }
}

/// Maximize strength and minimize cost subject to a minimum strength and
/// [`MIN_DUCTILITY`].
///
/// Objectives are `(−strength, cost)`; violations are
/// `(min_strength − strength, MIN_DUCTILITY − ductility)`.
///
/// `max_cost` is carried for reporting only and never constrains the search.
#[derive(Debug, Clone, PartialEq)]
pub struct SteelProblem {
    min_strength: f64,
    max_cost: f64,
}

impl SteelProblem {
    pub fn new(min_strength: f64, max_cost: f64) -> Self {
        Self {
            min_strength,
            max_cost,
        }
    }

    pub fn min_strength(&self) -> f64 {
        self.min_strength
    }

    pub fn max_cost(&self) -> f64 {
        self.max_cost
    }

    /// Objective vector `[−strength, cost]`.
    pub fn objectives(&self, composition: &Composition) -> [f64; 2] {
        let p = Properties::of(composition);
        [-p.strength, p.cost]
    }

    /// Constraint violation vector `[g1, g2]`; feasible iff both are `<= 0`.
    pub fn violations(&self, composition: &Composition) -> [f64; 2] {
        let p = Properties::of(composition);
        self.violations_of(&p)
    }

    fn violations_of(&self, p: &Properties) -> [f64; 2] {
        [self.min_strength - p.strength, MIN_DUCTILITY - p.ductility]
    }
}

impl ConstrainedProblem for SteelProblem {
    fn bounds(&self) -> &[(f64, f64)] {
        &BOUNDS
    }

    fn evaluate(&self, genes: &[f64]) -> Evaluation {
        let p = properties(genes);
        Evaluation::new(
            vec![-p.strength, p.cost],
            self.violations_of(&p).to_vec(),
        )
    }

    fn on_generation(&self, stats: &GenerationStats) {
        debug!(
            generation = stats.generation,
            feasible = stats.feasible_count,
            front = stats.front_size,
            best = ?stats.best_objectives,
            "generation complete"
        );
    }
}
