//! Alloy composition search.
//!
//! Binds the generic [`nsga2`](crate::nsga2) engine to six-element steel
//! compositions evaluated by a linear surrogate:
//!
//! - [`composition`]: elements, composition vectors and the search box
//! - [`surrogate`]: strength/cost/ductility formulas and [`SteelProblem`]
//! - [`solver`]: per-request [`RunConfig`], [`optimize`] and the
//!   [`ConvergenceCheck`] applied to its front

pub mod composition;
pub mod solver;
pub mod surrogate;

pub use composition::{Composition, Element};
pub use solver::{optimize, optimize_with_cancel, ConvergenceCheck, RunConfig, RunReport, Solution};
pub use surrogate::{Metrics, Properties, SteelProblem};
