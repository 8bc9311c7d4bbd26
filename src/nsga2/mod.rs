//! Constrained multi-objective evolutionary engine (NSGA-II).
//!
//! A generic, domain-agnostic NSGA-II built on a trait-based abstraction.
//! Users define their problem by implementing [`ConstrainedProblem`], which
//! declares the search box and maps a decision vector to objective values
//! and constraint violations. Everything else is owned by the engine.
//!
//! # Core Traits
//!
//! - [`ConstrainedProblem`]: Problem definition (bounds and evaluation)
//!
//! # Key Types
//!
//! - [`Nsga2Config`]: Algorithm parameters (population size, operator rates)
//! - [`Nsga2Runner`]: Executes the generational loop
//! - [`Nsga2Result`]: Final front, population and per-generation statistics
//! - [`Candidate`]: An evaluated decision vector with rank and crowding
//!
//! # Submodules
//!
//! - [`dominance`]: Constrained dominance and fast non-dominated sorting
//! - [`crowding`]: Crowding distance assignment
//! - [`operators`]: SBX crossover and polynomial mutation under box constraints
//! - [`selection`]: Crowded tournament selection
//!
//! # References
//!
//! - Deb et al. (2002), *A Fast and Elitist Multiobjective GA: NSGA-II*
//! - Deb (2000), *An efficient constraint handling method for genetic algorithms*
//! - Deb & Agrawal (1995), *Simulated Binary Crossover for Continuous Search Space*

mod config;
pub mod crowding;
pub mod dominance;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use config::{ConfigError, Nsga2Config};
pub use runner::{GenerationStats, Nsga2Result, Nsga2Runner};
pub use types::{Candidate, ConstrainedProblem, Evaluation};
