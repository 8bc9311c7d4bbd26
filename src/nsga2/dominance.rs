//! Constraint-aware Pareto dominance and non-dominated sorting.
//!
//! # Constrained dominance (Deb, 2000)
//!
//! For two candidates `a` and `b`:
//!
//! 1. A feasible candidate dominates an infeasible one.
//! 2. Between two infeasible candidates, the one with the smaller total
//!    constraint violation dominates.
//! 3. Between two feasible candidates, ordinary Pareto dominance on the
//!    objective vectors applies.
//!
//! # References
//!
//! - Deb (2000), "An efficient constraint handling method for genetic
//!   algorithms", *Computer Methods in Applied Mechanics and Engineering*
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

use super::types::Candidate;

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the front index of the candidate
/// at the same position. Rank 0 is the non-dominated front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NondominatedSortResult {
    /// Front index for each candidate (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Dominance comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other.
    Neither,
}

/// Whether every constraint violation is `<= 0`.
///
/// An empty violation vector (unconstrained problem) is feasible.
pub fn is_feasible(violations: &[f64]) -> bool {
    violations.iter().all(|&g| g <= 0.0)
}

/// Sum of the positive parts of the constraint violations.
pub fn total_violation(violations: &[f64]) -> f64 {
    violations.iter().map(|&g| g.max(0.0)).sum()
}

/// Plain Pareto comparison of two objective vectors (minimization).
///
/// ```
/// use steel_solver::nsga2::dominance::{pareto_cmp, Dominance};
///
/// assert_eq!(pareto_cmp(&[1.0, 2.0], &[2.0, 2.0]), Dominance::Left);
/// assert_eq!(pareto_cmp(&[1.0, 3.0], &[2.0, 2.0]), Dominance::Neither);
/// assert_eq!(pareto_cmp(&[2.0, 2.0], &[2.0, 2.0]), Dominance::Neither);
/// ```
pub fn pareto_cmp(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Constrained dominance comparison of two candidates.
pub fn constrained_cmp(a: &Candidate, b: &Candidate) -> Dominance {
    match (a.is_feasible(), b.is_feasible()) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        (false, false) => {
            let va = a.total_violation();
            let vb = b.total_violation();
            if va < vb {
                Dominance::Left
            } else if vb < va {
                Dominance::Right
            } else {
                Dominance::Neither
            }
        }
        (true, true) => pareto_cmp(&a.objectives, &b.objectives),
    }
}

/// Whether `a` constrained-dominates `b`.
pub fn dominates(a: &Candidate, b: &Candidate) -> bool {
    constrained_cmp(a, b) == Dominance::Left
}

/// Fast non-dominated sorting under constrained dominance.
///
/// Partitions the candidates into fronts: front 0 is the set no other
/// candidate dominates, front 1 the non-dominated set of the remainder,
/// and so on until every candidate is assigned.
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of candidates
///
/// An empty slice yields an empty result.
pub fn non_dominated_sort(candidates: &[Candidate]) -> NondominatedSortResult {
    let n = candidates.len();
    if n == 0 {
        return NondominatedSortResult::default();
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];
    let mut front_0 = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            match constrained_cmp(&candidates[i], &candidates[j]) {
                Dominance::Left => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }

        // All pairs involving i have been compared at this point.
        if domination_count[i] == 0 {
            front_0.push(i);
        }
    }

    let mut fronts = Vec::new();
    let mut current = front_0;
    while !current.is_empty() {
        let mut next_front = Vec::new();
        for &i in &current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = fronts.len() + 1;
                    next_front.push(j);
                }
            }
        }
        fronts.push(current);
        current = next_front;
    }

    NondominatedSortResult { ranks, fronts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nsga2::Evaluation;
    use proptest::prelude::*;

    fn feasible(objectives: &[f64]) -> Candidate {
        Candidate::new(vec![], Evaluation::new(objectives.to_vec(), vec![-1.0]))
    }

    fn infeasible(objectives: &[f64], violation: f64) -> Candidate {
        Candidate::new(vec![], Evaluation::new(objectives.to_vec(), vec![violation, -1.0]))
    }

    // ---- Dominance ----

    #[test]
    fn test_feasible_beats_infeasible() {
        // Infeasible candidate has strictly better objectives.
        let a = feasible(&[10.0, 10.0]);
        let b = infeasible(&[0.0, 0.0], 0.5);
        assert_eq!(constrained_cmp(&a, &b), Dominance::Left);
        assert_eq!(constrained_cmp(&b, &a), Dominance::Right);
    }

    #[test]
    fn test_smaller_violation_wins() {
        let a = infeasible(&[5.0, 5.0], 1.0);
        let b = infeasible(&[0.0, 0.0], 3.0);
        assert!(dominates(&a, &b));
        assert!(!dominates(&b, &a));
    }

    #[test]
    fn test_equal_violation_is_neither() {
        let a = infeasible(&[1.0, 1.0], 2.0);
        let b = infeasible(&[5.0, 5.0], 2.0);
        assert_eq!(constrained_cmp(&a, &b), Dominance::Neither);
    }

    #[test]
    fn test_only_positive_violations_count() {
        // -10 must not offset the +2.
        let a = Candidate::new(vec![], Evaluation::new(vec![0.0], vec![2.0, -10.0]));
        let b = Candidate::new(vec![], Evaluation::new(vec![0.0], vec![1.0, 1.0]));
        assert_eq!(constrained_cmp(&a, &b), Dominance::Neither);
    }

    #[test]
    fn test_pareto_between_feasible() {
        assert!(dominates(&feasible(&[1.0, 1.0]), &feasible(&[1.0, 2.0])));
        assert!(!dominates(&feasible(&[1.0, 3.0]), &feasible(&[2.0, 2.0])));
        assert!(!dominates(&feasible(&[2.0, 2.0]), &feasible(&[2.0, 2.0])));
    }

    // ---- Non-dominated sort ----

    #[test]
    fn test_empty() {
        let result = non_dominated_sort(&[]);
        assert!(result.ranks.is_empty());
        assert!(result.fronts.is_empty());
    }

    #[test]
    fn test_single_candidate() {
        let result = non_dominated_sort(&[feasible(&[1.0, 2.0])]);
        assert_eq!(result.ranks, vec![0]);
        assert_eq!(result.fronts, vec![vec![0]]);
    }

    #[test]
    fn test_mixed_fronts() {
        let pop = vec![
            feasible(&[1.0, 5.0]), // front 0
            feasible(&[3.0, 3.0]), // front 0
            feasible(&[5.0, 1.0]), // front 0
            feasible(&[4.0, 4.0]), // dominated by [1]
            feasible(&[6.0, 6.0]), // dominated by [3]
        ];
        let result = non_dominated_sort(&pop);
        assert_eq!(result.ranks, vec![0, 0, 0, 1, 2]);
        assert_eq!(result.fronts.len(), 3);
        assert_eq!(result.fronts[0], vec![0, 1, 2]);
    }

    #[test]
    fn test_infeasible_layers_below_feasible() {
        let pop = vec![
            infeasible(&[0.0, 0.0], 1.0),
            feasible(&[9.0, 9.0]),
            infeasible(&[0.0, 0.0], 4.0),
            feasible(&[1.0, 20.0]),
        ];
        let result = non_dominated_sort(&pop);
        assert_eq!(result.ranks[1], 0);
        assert_eq!(result.ranks[3], 0);
        assert_eq!(result.ranks[0], 1);
        assert_eq!(result.ranks[2], 2);
    }

    #[test]
    fn test_all_infeasible_front_is_least_violating() {
        let pop = vec![
            infeasible(&[0.0, 0.0], 3.0),
            infeasible(&[1.0, 1.0], 0.5),
            infeasible(&[2.0, 2.0], 0.5),
        ];
        let result = non_dominated_sort(&pop);
        assert_eq!(result.fronts[0], vec![1, 2]);
        assert_eq!(result.ranks[0], 1);
    }

    #[test]
    fn test_all_equal() {
        let pop = vec![feasible(&[2.0, 2.0]); 3];
        let result = non_dominated_sort(&pop);
        assert!(result.ranks.iter().all(|&r| r == 0));
    }

    fn arb_candidate() -> impl Strategy<Value = Candidate> {
        (
            prop::collection::vec(-10.0f64..10.0, 2),
            prop::collection::vec(-5.0f64..5.0, 2),
        )
            .prop_map(|(objectives, violations)| {
                Candidate::new(vec![], Evaluation::new(objectives, violations))
            })
    }

    proptest! {
        #[test]
        fn prop_feasible_never_ranked_below_infeasible(
            pop in prop::collection::vec(arb_candidate(), 1..40)
        ) {
            let result = non_dominated_sort(&pop);
            for (a, ra) in pop.iter().zip(&result.ranks) {
                for (b, rb) in pop.iter().zip(&result.ranks) {
                    if a.is_feasible() && !b.is_feasible() {
                        prop_assert!(ra < rb);
                    }
                }
            }
        }

        #[test]
        fn prop_fronts_partition_population(
            pop in prop::collection::vec(arb_candidate(), 1..40)
        ) {
            let result = non_dominated_sort(&pop);
            let mut seen: Vec<usize> = result.fronts.iter().flatten().copied().collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..pop.len()).collect::<Vec<_>>());
            for front in &result.fronts {
                for &i in front {
                    for &j in front {
                        prop_assert!(!dominates(&pop[i], &pop[j]));
                    }
                }
            }
        }
    }
}
