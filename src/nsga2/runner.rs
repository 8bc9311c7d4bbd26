//! NSGA-II generational loop execution.
//!
//! [`Nsga2Runner`] orchestrates the complete evolutionary process:
//! initialization → ranking → selection → variation → evaluation →
//! environmental selection → repeat.

use super::config::{validate_bounds, ConfigError, Nsga2Config};
use super::crowding::assign_crowding;
use super::dominance::{non_dominated_sort, NondominatedSortResult};
use super::operators::{polynomial_mutation, random_genes, sbx_crossover};
use super::selection::tournament;
use super::types::{Candidate, ConstrainedProblem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Snapshot of one generation, recorded after ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Generation index (0 = initial population).
    pub generation: usize,

    /// Number of candidates in the population.
    pub population_size: usize,

    /// Number of feasible candidates in the population.
    pub feasible_count: usize,

    /// Number of rank-0 candidates.
    pub front_size: usize,

    /// Best (minimum) value of each objective over the rank-0 front.
    pub best_objectives: Vec<f64>,
}

impl GenerationStats {
    fn collect(generation: usize, population: &[Candidate]) -> Self {
        let front: Vec<&Candidate> = population.iter().filter(|c| c.rank == 0).collect();
        let objective_count = front.first().map_or(0, |c| c.objectives.len());
        let best_objectives = (0..objective_count)
            .map(|k| {
                front
                    .iter()
                    .map(|c| c.objectives[k])
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();

        Self {
            generation,
            population_size: population.len(),
            feasible_count: population.iter().filter(|c| c.is_feasible()).count(),
            front_size: front.len(),
            best_objectives,
        }
    }
}

/// Result of an NSGA-II run.
#[derive(Debug, Clone)]
pub struct Nsga2Result {
    /// Rank-0 candidates of the final population.
    ///
    /// Contains only feasible candidates whenever the final population has
    /// at least one; otherwise the least-infeasible ones.
    pub front: Vec<Candidate>,

    /// The full final population.
    pub population: Vec<Candidate>,

    /// Number of generation transitions executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Statistics for the initial population and after every transition.
    pub history: Vec<GenerationStats>,
}

impl Nsga2Result {
    /// Whether the returned front holds feasible candidates.
    pub fn has_feasible(&self) -> bool {
        self.front.iter().any(Candidate::is_feasible)
    }
}

/// Executes the NSGA-II loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = Nsga2Config::default().with_seed(42);
/// let result = Nsga2Runner::run(&problem, &config)?;
/// println!("front size: {}", result.front.len());
/// ```
pub struct Nsga2Runner;

impl Nsga2Runner {
    /// Runs the optimization for the configured number of generations.
    pub fn run<P: ConstrainedProblem>(
        problem: &P,
        config: &Nsga2Config,
    ) -> Result<Nsga2Result, ConfigError> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the optimization with an optional cancellation token.
    ///
    /// The flag is checked before every generation transition. When set, the
    /// run stops and returns the front of the last completed generation.
    pub fn run_with_cancel<P: ConstrainedProblem>(
        problem: &P,
        config: &Nsga2Config,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Nsga2Result, ConfigError> {
        config.validate()?;
        let bounds = problem.bounds();
        validate_bounds(bounds)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let mutation_rate = config.mutation_rate_for(bounds.len());

        // 1. Initialize and rank generation 0
        let initial: Vec<Vec<f64>> = (0..config.population_size)
            .map(|_| random_genes(bounds, &mut rng))
            .collect();
        let mut population = evaluate_all(problem, initial, config.parallel);
        rank_population(&mut population);

        let mut history = Vec::with_capacity(config.generation_count + 1);
        history.push(GenerationStats::collect(0, &population));

        let mut generations = 0usize;
        let mut cancelled = false;

        // 2. Generational loop
        for gen in 0..config.generation_count {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let offspring_genes =
                make_offspring(&population, bounds, config, mutation_rate, &mut rng);
            let offspring = evaluate_all(problem, offspring_genes, config.parallel);

            population.extend(offspring);
            population = survive(population, config.population_size);
            generations = gen + 1;

            let stats = GenerationStats::collect(generations, &population);
            problem.on_generation(&stats);
            history.push(stats);
        }

        let front: Vec<Candidate> = population
            .iter()
            .filter(|c| c.rank == 0)
            .cloned()
            .collect();

        debug!(
            generations,
            cancelled,
            front_size = front.len(),
            "nsga2 run finished"
        );

        Ok(Nsga2Result {
            front,
            population,
            generations,
            cancelled,
            history,
        })
    }
}

/// Sorts the population into fronts and writes rank and crowding distance
/// onto every candidate.
fn rank_population(population: &mut [Candidate]) -> NondominatedSortResult {
    let sorted = non_dominated_sort(population);
    for (candidate, &rank) in population.iter_mut().zip(&sorted.ranks) {
        candidate.rank = rank;
    }
    for front in &sorted.fronts {
        assign_crowding(population, front);
    }
    sorted
}

/// Environmental selection: keeps exactly `size` candidates from the merged
/// parent + offspring pool, front by front, truncating the last admitted
/// front by descending crowding distance.
fn survive(mut merged: Vec<Candidate>, size: usize) -> Vec<Candidate> {
    let sorted = rank_population(&mut merged);

    let mut keep: Vec<usize> = Vec::with_capacity(size);
    for front in &sorted.fronts {
        let remaining = size - keep.len();
        if front.len() <= remaining {
            keep.extend_from_slice(front);
        } else {
            let mut last = front.clone();
            // Stable sort: equal distances keep pool order.
            last.sort_by(|&a, &b| merged[b].crowding.total_cmp(&merged[a].crowding));
            keep.extend_from_slice(&last[..remaining]);
        }
        if keep.len() == size {
            break;
        }
    }

    let mut slots: Vec<Option<Candidate>> = merged.into_iter().map(Some).collect();
    keep.iter().filter_map(|&i| slots[i].take()).collect()
}

/// Mating rounds allowed per offspring slot before the remaining slots are
/// filled by uniform sampling.
const MAX_MATING_ROUNDS: usize = 100;

/// Produces `population_size` offspring decision vectors.
///
/// With `eliminate_duplicates` set, a child equal to a current member or to
/// an already accepted sibling is discarded and mating is repeated.
fn make_offspring<R: Rng>(
    population: &[Candidate],
    bounds: &[(f64, f64)],
    config: &Nsga2Config,
    mutation_rate: f64,
    rng: &mut R,
) -> Vec<Vec<f64>> {
    let n = config.population_size;
    let max_attempts = n * MAX_MATING_ROUNDS;
    let mut offspring = Vec::with_capacity(n);
    let mut seen: Option<HashSet<Vec<u64>>> = config
        .eliminate_duplicates
        .then(|| population.iter().map(|c| gene_key(&c.genes)).collect());

    let mut rounds = 0usize;
    while offspring.len() < n && rounds < max_attempts {
        rounds += 1;
        let p1 = &population[tournament(population, config.tournament_size, rng)];
        let p2 = &population[tournament(population, config.tournament_size, rng)];

        let (mut c1, mut c2) = if rng.random::<f64>() < config.crossover_rate {
            sbx_crossover(&p1.genes, &p2.genes, bounds, config.crossover_eta, rng)
        } else {
            (p1.genes.clone(), p2.genes.clone())
        };

        polynomial_mutation(&mut c1, bounds, config.mutation_eta, mutation_rate, rng);
        polynomial_mutation(&mut c2, bounds, config.mutation_eta, mutation_rate, rng);

        for child in [c1, c2] {
            if offspring.len() < n && admit(&mut seen, &child) {
                offspring.push(child);
            }
        }
    }

    // Variation kept reproducing existing vectors.
    if offspring.len() < n {
        debug!(
            missing = n - offspring.len(),
            "mating exhausted; sampling remaining offspring uniformly"
        );
    }
    let mut fills = 0usize;
    while offspring.len() < n {
        fills += 1;
        let child = random_genes(bounds, rng);
        if admit(&mut seen, &child) || fills > max_attempts {
            offspring.push(child);
        }
    }

    offspring
}

/// Records `genes` in `seen` and reports whether they were new. Always
/// true when duplicates are not tracked.
fn admit(seen: &mut Option<HashSet<Vec<u64>>>, genes: &[f64]) -> bool {
    match seen {
        Some(set) => set.insert(gene_key(genes)),
        None => true,
    }
}

/// Bitwise identity of a decision vector; `-0.0` and `0.0` compare equal.
fn gene_key(genes: &[f64]) -> Vec<u64> {
    genes.iter().map(|&x| (x + 0.0).to_bits()).collect()
}

/// Evaluates decision vectors into candidates, preserving order.
#[cfg(feature = "parallel")]
fn evaluate_all<P: ConstrainedProblem>(
    problem: &P,
    genes: Vec<Vec<f64>>,
    parallel: bool,
) -> Vec<Candidate> {
    if parallel {
        genes
            .into_par_iter()
            .map(|g| {
                let evaluation = problem.evaluate(&g);
                Candidate::new(g, evaluation)
            })
            .collect()
    } else {
        evaluate_sequential(problem, genes)
    }
}

/// Evaluates decision vectors into candidates, preserving order.
#[cfg(not(feature = "parallel"))]
fn evaluate_all<P: ConstrainedProblem>(
    problem: &P,
    genes: Vec<Vec<f64>>,
    _parallel: bool,
) -> Vec<Candidate> {
    evaluate_sequential(problem, genes)
}

fn evaluate_sequential<P: ConstrainedProblem>(problem: &P, genes: Vec<Vec<f64>>) -> Vec<Candidate> {
    genes
        .into_iter()
        .map(|g| {
            let evaluation = problem.evaluate(&g);
            Candidate::new(g, evaluation)
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
