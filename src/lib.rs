//! Steel composition search.
//!
//! Finds trade-offs between strength and cost of a six-element alloy under
//! minimum strength and ductility constraints.
//!
//! - [`nsga2`]: Domain-agnostic constrained NSGA-II engine. Problems
//!   implement [`nsga2::ConstrainedProblem`]; the engine owns sorting,
//!   crowding, selection and variation.
//! - [`steel`]: The alloy model. Linear property surrogate, the
//!   constrained problem built on it, and per-run orchestration.
//! - [`api`]: HTTP front end (`GET /`, `POST /optimize`).
//! - [`config`]: Environment-driven server settings.
//!
//! # Example
//!
//! ```
//! use steel_solver::steel::{optimize, RunConfig};
//!
//! let config = RunConfig::default().with_generation_count(10);
//! let report = optimize(&config).unwrap();
//! assert!(!report.solutions.is_empty());
//! ```

pub mod api;
pub mod config;
pub mod nsga2;
pub mod steel;
