//! Core type definitions for the NSGA-II engine.
//!
//! [`ConstrainedProblem`] is the contract between the generic engine and a
//! domain problem. [`Candidate`] is one evaluated member of a population.

use super::dominance::{is_feasible, total_violation};
use super::runner::GenerationStats;

/// Output of a single evaluation: objective values and constraint violations.
///
/// All objectives are **minimized**. A constraint is satisfied when its
/// violation value is `<= 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Objective values, one per objective.
    pub objectives: Vec<f64>,

    /// Constraint violation values, one per constraint.
    pub violations: Vec<f64>,
}

impl Evaluation {
    /// Creates an evaluation from objective and violation vectors.
    pub fn new(objectives: Vec<f64>, violations: Vec<f64>) -> Self {
        Self {
            objectives,
            violations,
        }
    }

    /// Creates an evaluation for an unconstrained problem.
    pub fn unconstrained(objectives: Vec<f64>) -> Self {
        Self::new(objectives, Vec::new())
    }
}

/// Defines a box-constrained, multi-objective problem with inequality
/// constraints.
///
/// The engine owns population management and variation; an implementation
/// only declares the search box and maps a decision vector to an
/// [`Evaluation`].
///
/// # Thread Safety
///
/// `ConstrainedProblem` must be `Send + Sync` because the runner may
/// evaluate candidates in parallel using rayon.
///
/// # Example
///
/// ```
/// use steel_solver::nsga2::{ConstrainedProblem, Evaluation};
///
/// struct Schaffer {
///     bounds: Vec<(f64, f64)>,
/// }
///
/// impl ConstrainedProblem for Schaffer {
///     fn bounds(&self) -> &[(f64, f64)] {
///         &self.bounds
///     }
///
///     fn evaluate(&self, genes: &[f64]) -> Evaluation {
///         let x = genes[0];
///         Evaluation::unconstrained(vec![x * x, (x - 2.0) * (x - 2.0)])
///     }
/// }
/// ```
pub trait ConstrainedProblem: Send + Sync {
    /// Lower and upper bound of every decision variable.
    ///
    /// The length of this slice is the problem dimension.
    fn bounds(&self) -> &[(f64, f64)];

    /// Number of decision variables.
    fn dimension(&self) -> usize {
        self.bounds().len()
    }

    /// Evaluates a decision vector.
    ///
    /// Must be pure and deterministic: the runner relies on this for
    /// reproducible runs and for parallel evaluation.
    fn evaluate(&self, genes: &[f64]) -> Evaluation;

    /// Called after every generation transition.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _stats: &GenerationStats) {}
}

/// An evaluated member of a population.
///
/// `rank` and `crowding` are bookkeeping written by the runner: `rank` is
/// the index of the non-dominated front the candidate belongs to and
/// `crowding` its crowding distance within that front.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Decision vector.
    pub genes: Vec<f64>,

    /// Objective values (minimized).
    pub objectives: Vec<f64>,

    /// Constraint violations (`<= 0` means satisfied).
    pub violations: Vec<f64>,

    /// Front index, `0` for the non-dominated front.
    pub rank: usize,

    /// Crowding distance within the candidate's front.
    pub crowding: f64,
}

impl Candidate {
    /// Wraps a decision vector with its evaluation. The candidate is unranked.
    pub fn new(genes: Vec<f64>, evaluation: Evaluation) -> Self {
        Self {
            genes,
            objectives: evaluation.objectives,
            violations: evaluation.violations,
            rank: usize::MAX,
            crowding: 0.0,
        }
    }

    /// Whether every constraint is satisfied.
    pub fn is_feasible(&self) -> bool {
        is_feasible(&self.violations)
    }

    /// Sum of the positive parts of the constraint violations.
    pub fn total_violation(&self) -> f64 {
        total_violation(&self.violations)
    }
}
