//! Random-proportional transition rule.
//!
//! From node `u`, candidate `v` is weighted by
//!
//! ```text
//! w(u, v) = τ(u, v)^α · (1 / (d(u, v) + ε))^β
//! ```
//!
//! and drawn with probability `w(u, v) / Σ w(u, ·)` over the unvisited
//! candidates. `ε` keeps coincident locations finite for moderate `β`; a
//! weight that still overflows to `+∞` takes the whole probability mass,
//! shared evenly with any other overflowed candidate.
//!
//! # Reference
//!
//! Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant system: optimization
//! by a colony of cooperating agents", *IEEE Trans. SMC-B* 26(1), 29-41.

use rand::Rng;

use super::PheromoneMatrix;
use crate::distance::DistanceMatrix;

/// Added to every distance before inversion.
pub const DISTANCE_EPSILON: f64 = 1e-10;

/// Read-only view over pheromone and distances for one iteration.
///
/// Holds shared references only, so one policy can serve every agent of an
/// iteration, including agents running on other threads.
///
/// # Examples
///
/// ```
/// use u_colony::aco::{PheromoneMatrix, TransitionPolicy};
/// use u_colony::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 1.0],
///     vec![2.0, 1.0, 0.0],
/// ])
/// .unwrap();
/// let tau = PheromoneMatrix::new(3, 0.1);
/// let policy = TransitionPolicy::new(&tau, &dm, 1.0, 1.0);
///
/// let p = policy.probabilities(0, &[1, 2]);
/// // weights 1/1 and 1/2 → 2/3 and 1/3
/// assert!((p[0] - 2.0 / 3.0).abs() < 1e-6);
/// assert!((p[1] - 1.0 / 3.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TransitionPolicy<'a> {
    pheromone: &'a PheromoneMatrix,
    distances: &'a DistanceMatrix,
    alpha: f64,
    beta: f64,
}

impl<'a> TransitionPolicy<'a> {
    /// Creates a policy over the given matrices.
    pub fn new(
        pheromone: &'a PheromoneMatrix,
        distances: &'a DistanceMatrix,
        alpha: f64,
        beta: f64,
    ) -> Self {
        Self {
            pheromone,
            distances,
            alpha,
            beta,
        }
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.distances.size()
    }

    /// The distance matrix this policy reads.
    pub fn distances(&self) -> &'a DistanceMatrix {
        self.distances
    }

    /// Unnormalized weight of moving from `from` to `to`.
    pub fn desirability(&self, from: usize, to: usize) -> f64 {
        let tau = self.pheromone.get(from, to).powf(self.alpha);
        let eta = (1.0 / (self.distances.get(from, to) + DISTANCE_EPSILON)).powf(self.beta);
        tau * eta
    }

    /// Probability of each candidate, in the order given.
    ///
    /// When the weights cannot be normalized, the mass goes uniformly to the
    /// candidates whose weight overflowed to `+∞`, or to every candidate if
    /// none did (all-zero or NaN weights). Empty input gives an empty vector.
    pub fn probabilities(&self, from: usize, candidates: &[usize]) -> Vec<f64> {
        let weights = self.weights(from, candidates);
        let total: f64 = weights.iter().sum();
        if total > 0.0 && total.is_finite() {
            return weights.into_iter().map(|w| w / total).collect();
        }

        let eligible = fallback_indices(&weights);
        let share = 1.0 / eligible.len() as f64;
        let mut p = vec![0.0; candidates.len()];
        for i in eligible {
            p[i] = share;
        }
        p
    }

    /// Draws the next node among `candidates` (roulette wheel).
    ///
    /// Returns `None` only when `candidates` is empty. Degenerate weights
    /// fall back the same way as [`probabilities`](Self::probabilities).
    pub fn select_next<R: Rng + ?Sized>(
        &self,
        from: usize,
        candidates: &[usize],
        rng: &mut R,
    ) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }
        if candidates.len() == 1 {
            return Some(candidates[0]);
        }

        let weights = self.weights(from, candidates);
        let total: f64 = weights.iter().sum();
        if !(total > 0.0 && total.is_finite()) {
            let eligible = fallback_indices(&weights);
            return Some(candidates[eligible[rng.random_range(0..eligible.len())]]);
        }

        let r = rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        let mut last_positive = candidates[0];
        for (&to, &w) in candidates.iter().zip(&weights) {
            if w <= 0.0 {
                continue;
            }
            cumulative += w;
            last_positive = to;
            if r < cumulative {
                return Some(to);
            }
        }
        // Rounding left r at or past the final boundary
        Some(last_positive)
    }

    fn weights(&self, from: usize, candidates: &[usize]) -> Vec<f64> {
        candidates
            .iter()
            .map(|&to| self.desirability(from, to))
            .collect()
    }
}

/// Positions eligible when weights cannot be normalized: those at `+∞`, or
/// all of them if none overflowed. Non-empty for non-empty `weights`.
fn fallback_indices(weights: &[f64]) -> Vec<usize> {
    let saturated: Vec<usize> = weights
        .iter()
        .enumerate()
        .filter(|&(_, &w)| w == f64::INFINITY)
        .map(|(i, _)| i)
        .collect();
    if saturated.is_empty() {
        (0..weights.len()).collect()
    } else {
        saturated
    }
}
