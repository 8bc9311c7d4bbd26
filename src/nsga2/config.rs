//! NSGA-II configuration.
//!
//! [`Nsga2Config`] holds all parameters that control the generational loop.

/// Configuration errors reported by [`Nsga2Config::validate`] and the runner.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("population_size must be at least 2 (got {0})")]
    PopulationTooSmall(usize),
    #[error("generation_count must be at least 1")]
    NoGenerations,
    #[error("tournament_size must be at least 1")]
    EmptyTournament,
    #[error("{name} must be within [0, 1] (got {value})")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error("{name} must be a finite, non-negative distribution index (got {value})")]
    InvalidDistributionIndex { name: &'static str, value: f64 },
    #[error("problem must declare at least one decision variable")]
    NoVariables,
    #[error("invalid bounds for variable {index}: [{lower}, {upper}]")]
    InvalidBounds { index: usize, lower: f64, upper: f64 },
}

/// Configuration for the NSGA-II runner.
///
/// # Defaults
///
/// ```
/// use steel_solver::nsga2::Nsga2Config;
///
/// let config = Nsga2Config::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generation_count, 100);
/// assert_eq!(config.tournament_size, 2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use steel_solver::nsga2::Nsga2Config;
///
/// let config = Nsga2Config::default()
///     .with_population_size(50)
///     .with_generation_count(40)
///     .with_crossover_eta(15.0)
///     .with_seed(1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Nsga2Config {
    /// Number of candidates in every generation.
    pub population_size: usize,

    /// Number of generation transitions to execute.
    pub generation_count: usize,

    /// Number of draws per tournament. NSGA-II uses 2 (binary tournament).
    pub tournament_size: usize,

    /// Probability of applying SBX to a parent pair (0.0–1.0).
    ///
    /// When crossover is not applied, the children are copies of the parents.
    pub crossover_rate: f64,

    /// SBX distribution index. Larger values keep children closer to
    /// their parents.
    pub crossover_eta: f64,

    /// Per-component mutation probability (0.0–1.0).
    ///
    /// `None` uses `1 / dimension`.
    pub mutation_rate: Option<f64>,

    /// Polynomial mutation distribution index.
    pub mutation_eta: f64,

    /// Whether offspring identical to a current member or to an earlier
    /// sibling are discarded and redrawn.
    pub eliminate_duplicates: bool,

    /// Whether to evaluate candidates in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature. Results are identical
    /// either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            population_size: 100,
            generation_count: 100,
            tournament_size: 2,
            crossover_rate: 0.9,
            crossover_eta: 15.0,
            mutation_rate: None,
            mutation_eta: 20.0,
            eliminate_duplicates: true,
            parallel: true,
            seed: None,
        }
    }
}

impl Nsga2Config {
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

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the SBX distribution index.
    pub fn with_crossover_eta(mut self, eta: f64) -> Self {
        self.crossover_eta = eta;
        self
    }

    /// Sets the per-component mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = Some(rate.clamp(0.0, 1.0));
        self
    }

    /// Sets the polynomial mutation distribution index.
    pub fn with_mutation_eta(mut self, eta: f64) -> Self {
        self.mutation_eta = eta;
        self
    }

    /// Enables or disables duplicate elimination among offspring.
    pub fn with_eliminate_duplicates(mut self, eliminate: bool) -> Self {
        self.eliminate_duplicates = eliminate;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Mutation rate to use for a problem with `dimension` variables.
    pub fn mutation_rate_for(&self, dimension: usize) -> f64 {
        self.mutation_rate
            .unwrap_or_else(|| 1.0 / dimension.max(1) as f64)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.generation_count == 0 {
            return Err(ConfigError::NoGenerations);
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::EmptyTournament);
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        if let Some(rate) = self.mutation_rate {
            check_rate("mutation_rate", rate)?;
        }
        check_eta("crossover_eta", self.crossover_eta)?;
        check_eta("mutation_eta", self.mutation_eta)?;
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { name, value })
    }
}

fn check_eta(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDistributionIndex { name, value })
    }
}

/// Validates problem bounds: at least one variable, finite, `lower <= upper`.
pub(crate) fn validate_bounds(bounds: &[(f64, f64)]) -> Result<(), ConfigError> {
    if bounds.is_empty() {
        return Err(ConfigError::NoVariables);
    }
    for (index, &(lower, upper)) in bounds.iter().enumerate() {
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(ConfigError::InvalidBounds {
                index,
                lower,
                upper,
            });
        }
    }
    Ok(())
}
