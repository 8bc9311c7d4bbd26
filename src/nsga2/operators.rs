//! Real-coded variation operators under box constraints.
//!
//! These operate on `&[f64]` decision vectors with per-variable
//! `(lower, upper)` bounds and are domain-agnostic.
//!
//! # Operators
//!
//! - [`sbx_crossover`]: Simulated Binary Crossover, bounded variant
//! - [`polynomial_mutation`]: Polynomial mutation, bounded variant
//! - [`random_genes`]: Uniform sampling inside the box
//!
//! Every operator returns vectors that lie inside the bounds.
//!
//! # References
//!
//! - Deb & Agrawal (1995), "Simulated Binary Crossover for Continuous Search Space"
//! - Deb & Goyal (1996), "A Combined Genetic Adaptive Search (GeneAS) for
//!   Engineering Design"

use rand::Rng;

/// Parent components closer than this are copied unchanged by SBX.
const SBX_EPSILON: f64 = 1e-14;

/// Samples a decision vector uniformly inside the box.
pub fn random_genes<R: Rng>(bounds: &[(f64, f64)], rng: &mut R) -> Vec<f64> {
    bounds
        .iter()
        .map(|&(lo, hi)| if hi > lo { rng.random_range(lo..=hi) } else { lo })
        .collect()
}

/// Simulated Binary Crossover (SBX), bounded variant.
///
/// Each component pair is recombined with probability 0.5. The spread of
/// the children around the parents is controlled by the distribution index
/// `eta`: larger values keep children closer to their parents.
///
/// # Algorithm (Deb & Agrawal, 1995)
///
/// For each component with distinct parent values `y1 < y2`:
/// 1. Compute the spread factor `beta` limited by the distance to each bound
/// 2. Draw `betaq` from the polynomial distribution with index `eta`
/// 3. Children are `0.5 * ((y1 + y2) ∓ betaq * (y2 - y1))`, clipped to bounds
/// 4. Children swap sides with probability 0.5
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or do not match `bounds`.
pub fn sbx_crossover<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    bounds: &[(f64, f64)],
    eta: f64,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert_eq!(n, bounds.len(), "parents must match bounds");

    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();

    for i in 0..n {
        if !rng.random_bool(0.5) {
            continue;
        }

        let (a, b) = (parent1[i], parent2[i]);
        if (a - b).abs() <= SBX_EPSILON {
            continue;
        }

        let (lo, hi) = bounds[i];
        let y1 = a.min(b);
        let y2 = a.max(b);
        let gap = y2 - y1;
        let u: f64 = rng.random();

        let beta_low = 1.0 + 2.0 * (y1 - lo) / gap;
        let c1 = 0.5 * ((y1 + y2) - spread(beta_low, u, eta) * gap);

        let beta_high = 1.0 + 2.0 * (hi - y2) / gap;
        let c2 = 0.5 * ((y1 + y2) + spread(beta_high, u, eta) * gap);

        let (c1, c2) = (c1.clamp(lo, hi), c2.clamp(lo, hi));
        if rng.random_bool(0.5) {
            child1[i] = c2;
            child2[i] = c1;
        } else {
            child1[i] = c1;
            child2[i] = c2;
        }
    }

    (child1, child2)
}

/// Draws the SBX spread `betaq` for a bound-limited `beta`.
fn spread(beta: f64, u: f64, eta: f64) -> f64 {
    let alpha = 2.0 - beta.powf(-(eta + 1.0));
    let exponent = 1.0 / (eta + 1.0);
    if u <= 1.0 / alpha {
        (u * alpha).powf(exponent)
    } else {
        (1.0 / (2.0 - u * alpha)).powf(exponent)
    }
}

/// Polynomial mutation, bounded variant.
///
/// Each component is perturbed independently with probability `rate`.
/// The perturbation is drawn from a polynomial distribution with index
/// `eta` and scaled so the result never leaves `[lower, upper]`.
///
/// With `rate = 0.0` the vector is left untouched.
///
/// # Complexity
/// O(n)
pub fn polynomial_mutation<R: Rng>(
    genes: &mut [f64],
    bounds: &[(f64, f64)],
    eta: f64,
    rate: f64,
    rng: &mut R,
) {
    let exponent = 1.0 / (eta + 1.0);

    for (x, &(lo, hi)) in genes.iter_mut().zip(bounds) {
        if rng.random::<f64>() >= rate {
            continue;
        }

        let span = hi - lo;
        if span <= 0.0 {
            continue;
        }

        let y = *x;
        let delta1 = (y - lo) / span;
        let delta2 = (hi - y) / span;
        let u: f64 = rng.random();

        let deltaq = if u < 0.5 {
            let xy = 1.0 - delta1;
            let val = 2.0 * u + (1.0 - 2.0 * u) * xy.powf(eta + 1.0);
            val.powf(exponent) - 1.0
        } else {
            let xy = 1.0 - delta2;
            let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * xy.powf(eta + 1.0);
            1.0 - val.powf(exponent)
        };

        *x = (y + deltaq * span).clamp(lo, hi);
    }
}
