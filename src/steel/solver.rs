//! Per-request optimization runs and their reporting.
//!
//! Each call to [`optimize`] builds its own [`SteelProblem`], engine
//! configuration and seeded RNG; nothing is shared between runs.

use super::composition::Composition;
use super::surrogate::{Metrics, SteelProblem};
use crate::nsga2::{Candidate, ConfigError, GenerationStats, Nsga2Config, Nsga2Runner};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

/// Configuration of one optimization run.
///
/// # Defaults
///
/// ```
/// use steel_solver::steel::RunConfig;
///
/// let config = RunConfig::default();
/// assert_eq!(config.min_strength, 600.0);
/// assert_eq!(config.max_cost, 400.0);
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.generation_count, 40);
/// assert_eq!(config.seed, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Required minimum strength.
    pub min_strength: f64,

    /// Cost ceiling accepted from callers. Not enforced by the search.
    pub max_cost: f64,

    /// Candidates per generation.
    pub population_size: usize,

    /// Number of generation transitions.
    pub generation_count: usize,

    /// Seed of the run's random stream.
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            min_strength: 600.0,
            max_cost: 400.0,
            population_size: 50,
            generation_count: 40,
            seed: 1,
        }
    }
}

impl RunConfig {
    /// Sets the required minimum strength.
    pub fn with_min_strength(mut self, value: f64) -> Self {
        self.min_strength = value;
        self
    }

    /// Sets the cost ceiling.
    pub fn with_max_cost(mut self, value: f64) -> Self {
        self.max_cost = value;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generation_count(mut self, n: usize) -> Self {
        self.generation_count = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Engine configuration for this run.
    pub fn engine_config(&self) -> Nsga2Config {
        Nsga2Config::default()
            .with_population_size(self.population_size)
            .with_generation_count(self.generation_count)
            .with_seed(self.seed)
            // The surrogate is cheaper to evaluate than a rayon dispatch.
            .with_parallel(false)
    }
}

/// One entry of the result front.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    /// Element proportions of this solution.
    pub composition: Composition,

    /// `[−strength, cost]` as seen by the engine.
    pub objectives: [f64; 2],

    /// `[g1, g2]`; feasible iff both are `<= 0`.
    #[serde(skip)]
    pub violations: [f64; 2],

    /// Reporting metrics recomputed from `composition`.
    pub metrics: Metrics,
}

impl Solution {
    fn from_candidate(candidate: &Candidate) -> Option<Self> {
        let composition = Composition::from_genes(&candidate.genes)?;
        Some(Self {
            composition,
            objectives: [*candidate.objectives.first()?, *candidate.objectives.get(1)?],
            violations: [*candidate.violations.first()?, *candidate.violations.get(1)?],
            metrics: Metrics::of(&composition),
        })
    }

    /// Whether both constraints are satisfied.
    pub fn is_feasible(&self) -> bool {
        self.violations.iter().all(|&g| g <= 0.0)
    }
}

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Rank-0 candidates of the final population.
    pub solutions: Vec<Solution>,

    /// Generation transitions executed.
    pub generations: usize,

    /// Whether the run was cancelled.
    pub cancelled: bool,

    /// Per-generation statistics.
    pub history: Vec<GenerationStats>,
}

impl RunReport {
    /// Number of feasible solutions in the front.
    pub fn feasible_count(&self) -> usize {
        self.solutions.iter().filter(|s| s.is_feasible()).count()
    }
}

/// Predicate deciding whether a run's front counts as converged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvergenceCheck {
    /// Any non-empty front is a success, feasible or not.
    NonEmpty,
    /// The front must contain at least one feasible solution.
    #[default]
    AnyFeasible,
}

impl ConvergenceCheck {
    pub fn accepts(self, solutions: &[Solution]) -> bool {
        match self {
            ConvergenceCheck::NonEmpty => !solutions.is_empty(),
            ConvergenceCheck::AnyFeasible => solutions.iter().any(Solution::is_feasible),
        }
    }
}

impl fmt::Display for ConvergenceCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConvergenceCheck::NonEmpty => "non-empty",
            ConvergenceCheck::AnyFeasible => "feasible",
        })
    }
}

impl FromStr for ConvergenceCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "non-empty" | "nonempty" | "empty" => Ok(ConvergenceCheck::NonEmpty),
            "feasible" | "any-feasible" => Ok(ConvergenceCheck::AnyFeasible),
            other => Err(format!(
                "unknown convergence check '{other}' (expected 'feasible' or 'non-empty')"
            )),
        }
    }
}

/// Runs one optimization.
pub fn optimize(config: &RunConfig) -> Result<RunReport, ConfigError> {
    optimize_with_cancel(config, None)
}

/// Runs one optimization with an optional cancellation token checked
/// between generations.
pub fn optimize_with_cancel(
    config: &RunConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<RunReport, ConfigError> {
    let problem = SteelProblem::new(config.min_strength, config.max_cost);
    let result = Nsga2Runner::run_with_cancel(&problem, &config.engine_config(), cancel)?;

    let solutions: Vec<Solution> = result
        .front
        .iter()
        .filter_map(|candidate| {
            let solution = Solution::from_candidate(candidate);
            if solution.is_none() {
                warn!(
                    genes = candidate.genes.len(),
                    objectives = candidate.objectives.len(),
                    violations = candidate.violations.len(),
                    "skipping candidate with unexpected shape"
                );
            }
            solution
        })
        .collect();

    let report = RunReport {
        solutions,
        generations: result.generations,
        cancelled: result.cancelled,
        history: result.history,
    };

    info!(
        min_strength = config.min_strength,
        max_cost = config.max_cost,
        generations = report.generations,
        front = report.solutions.len(),
        feasible = report.feasible_count(),
        "optimization finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nsga2::dominance::{pareto_cmp, Dominance};
    use crate::nsga2::Evaluation;
    use std::collections::HashSet;

    #[test]
    fn test_default_run_finds_feasible_front() {
        let report = optimize(&RunConfig::default()).unwrap();

        assert_eq!(report.generations, 40);
        assert!(!report.solutions.is_empty());
        assert_eq!(report.feasible_count(), report.solutions.len());
        for s in &report.solutions {
            assert!(s.metrics.strength >= 600.0 - 1e-9, "{s:?}");
            assert!(s.composition.is_within_bounds());
        }
    }

    #[test]
    fn test_front_is_pareto_consistent() {
        let report = optimize(&RunConfig::default()).unwrap();
        for a in &report.solutions {
            for b in &report.solutions {
                assert_ne!(pareto_cmp(&a.objectives, &b.objectives), Dominance::Left);
            }
        }
    }

    #[test]
    fn test_metrics_agree_with_objectives() {
        let report = optimize(&RunConfig::default()).unwrap();
        for s in &report.solutions {
            assert!((s.metrics.strength + s.objectives[0]).abs() < 1e-9);
            assert!((s.metrics.cost - s.objectives[1]).abs() < 1e-9);
            assert!(s.metrics.stability <= 0.98 && s.metrics.stability >= 0.93);
        }
    }

    #[test]
    fn test_same_seed_same_front() {
        let a = optimize(&RunConfig::default()).unwrap();
        let b = optimize(&RunConfig::default()).unwrap();
        assert_eq!(a.solutions, b.solutions);
    }

    #[test]
    fn test_front_trades_strength_for_cost() {
        let report = optimize(&RunConfig::default()).unwrap();
        let strengths: Vec<f64> = report.solutions.iter().map(|s| s.metrics.strength).collect();
        let max = strengths.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = strengths.iter().cloned().fold(f64::INFINITY, f64::min);
        assert!(report.solutions.len() > 1);
        assert!(max > min);
    }

    #[test]
    fn test_front_has_no_repeated_compositions() {
        for config in [
            RunConfig::default().with_min_strength(800.0),
            RunConfig::default().with_seed(7),
        ] {
            let report = optimize(&config).unwrap();
            let keys: HashSet<Vec<u64>> = report
                .solutions
                .iter()
                .map(|s| s.composition.values().iter().map(|x| x.to_bits()).collect())
                .collect();
            assert_eq!(keys.len(), report.solutions.len(), "{config:?}");
        }
    }

    #[test]
    fn test_from_candidate_rejects_wrong_shape() {
        let short = Candidate::new(vec![0.5; 5], Evaluation::new(vec![-500.0, 200.0], vec![0.0, 0.0]));
        assert!(Solution::from_candidate(&short).is_none());

        let one_objective = Candidate::new(vec![0.5; 6], Evaluation::new(vec![-500.0], vec![0.0, 0.0]));
        assert!(Solution::from_candidate(&one_objective).is_none());

        let ok = Candidate::new(vec![0.5; 6], Evaluation::new(vec![-500.0, 200.0], vec![1.0, -1.0]));
        let solution = Solution::from_candidate(&ok).unwrap();
        assert_eq!(solution.objectives, [-500.0, 200.0]);
        assert!(!solution.is_feasible());
    }

    #[test]
    fn test_unreachable_strength_yields_infeasible_front() {
        // Maximum attainable strength is 1400.
        let config = RunConfig::default().with_min_strength(5000.0);
        let report = optimize(&config).unwrap();

        assert!(!report.solutions.is_empty());
        assert_eq!(report.feasible_count(), 0);
        assert!(ConvergenceCheck::NonEmpty.accepts(&report.solutions));
        assert!(!ConvergenceCheck::AnyFeasible.accepts(&report.solutions));
    }

    #[test]
    fn test_invalid_population_is_config_error() {
        let config = RunConfig::default().with_population_size(0);
        assert!(matches!(
            optimize(&config),
            Err(ConfigError::PopulationTooSmall(0))
        ));
    }

    #[test]
    fn test_cancelled_run_still_reports() {
        let cancel = Arc::new(AtomicBool::new(true));
        let report = optimize_with_cancel(&RunConfig::default(), Some(cancel)).unwrap();
        assert!(report.cancelled);
        assert_eq!(report.generations, 0);
        assert!(!report.solutions.is_empty());
    }

    #[test]
    fn test_convergence_check_parsing() {
        assert_eq!("feasible".parse::<ConvergenceCheck>(), Ok(ConvergenceCheck::AnyFeasible));
        assert_eq!(" Non-Empty ".parse::<ConvergenceCheck>(), Ok(ConvergenceCheck::NonEmpty));
        assert!("sometimes".parse::<ConvergenceCheck>().is_err());
        assert_eq!(ConvergenceCheck::default(), ConvergenceCheck::AnyFeasible);
        assert_eq!(ConvergenceCheck::NonEmpty.to_string(), "non-empty");
    }

    #[test]
    fn test_convergence_check_empty_front() {
        assert!(!ConvergenceCheck::NonEmpty.accepts(&[]));
        assert!(!ConvergenceCheck::AnyFeasible.accepts(&[]));
    }

    #[test]
    fn test_run_config_deserializes_with_defaults() {
        let config: RunConfig = serde_json::from_str(r#"{"min_strength": 700}"#).unwrap();
        assert_eq!(config.min_strength, 700.0);
        assert_eq!(config.population_size, 50);
        assert_eq!(config.seed, 1);
    }
}
