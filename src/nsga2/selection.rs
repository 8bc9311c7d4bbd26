//! Crowded tournament selection.
//!
//! Parents are compared with the crowded-comparison operator: lower front
//! rank wins, and within a front the larger crowding distance wins.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Candidate;
use rand::Rng;
use std::cmp::Ordering;

/// Crowded comparison: `Less` means `a` is preferred over `b`.
pub fn crowded_cmp(a: &Candidate, b: &Candidate) -> Ordering {
    a.rank
        .cmp(&b.rank)
        .then_with(|| b.crowding.total_cmp(&a.crowding))
}

/// Tournament selection: draw `k` candidates uniformly with replacement and
/// return the index of the crowded-comparison winner.
///
/// `k = 2` is the binary tournament used by NSGA-II. On a full tie the
/// first draw wins.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[Candidate], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );

    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if crowded_cmp(&population[idx], &population[best_idx]) == Ordering::Less {
            best_idx = idx;
        }
    }
    best_idx
}
