//! Crowding distance for diversity preservation along a front.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

use super::types::Candidate;

/// Crowding distance assignment for diversity preservation.
///
/// Computes the crowding distance for each objective vector, measuring how
/// isolated it is from its neighbours in objective space. Higher distance
/// means the solution is more isolated (more diverse).
///
/// Boundary solutions (min/max for any objective) receive `f64::INFINITY`.
/// Sets of two or fewer solutions are all boundary.
///
/// # Algorithm (Deb et al., 2002)
///
/// For each objective:
/// 1. Sort solutions by objective value
/// 2. Assign infinity to boundary solutions
/// 3. For interior solutions, add normalized distance to neighbors
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use steel_solver::nsga2::crowding::crowding_distance;
///
/// let objectives = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
/// ];
///
/// let distances = crowding_distance(&objectives);
///
/// assert!(distances[0].is_infinite());
/// assert!(distances[2].is_infinite());
/// assert!(distances[1].is_finite());
/// ```
pub fn crowding_distance<T: AsRef<[f64]>>(objectives: &[T]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives[0].as_ref().len();
    let mut distances = vec![0.0f64; n];
    let value = |i: usize, k: usize| objectives[i].as_ref()[k];

    for obj_idx in 0..m {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| value(a, obj_idx).total_cmp(&value(b, obj_idx)));

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let range = value(indices[n - 1], obj_idx) - value(indices[0], obj_idx);
        if range > 0.0 && range.is_finite() {
            for i in 1..(n - 1) {
                let prev = value(indices[i - 1], obj_idx);
                let next = value(indices[i + 1], obj_idx);
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

/// Computes crowding distances for one front and stores them on the
/// candidates at the given indices.
pub fn assign_crowding(candidates: &mut [Candidate], front: &[usize]) {
    let distances = {
        let objectives: Vec<&[f64]> = front
            .iter()
            .map(|&i| candidates[i].objectives.as_slice())
            .collect();
        crowding_distance(&objectives)
    };

    for (&i, d) in front.iter().zip(distances) {
        candidates[i].crowding = d;
    }
}
