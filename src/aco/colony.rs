//! Iteration controller.
//!
//! # Algorithm
//!
//! Each iteration:
//!
//! 1. `agent_count` agents build closed tours from the depot, reading the
//!    current pheromone and distance matrices.
//! 2. The global best is replaced on strict improvement only, scanning
//!    agents in order, so the earliest of several equal tours is kept. The
//!    first tour ever built is always taken, even if its length overflowed.
//! 3. Pheromone evaporates once, then every tour deposits `Q / L` on its
//!    edges.
//! 4. The iteration's shortest length is appended to the convergence log.
//!
//! Step 3 starts only after every agent of step 1 has returned.
//!
//! [`AntColony::step`] and [`AntColony::run`] share one `iteration_count`
//! budget: `run` only performs the iterations not already stepped.
//!
//! # Reproducibility
//!
//! The colony owns one master [`StdRng`]. Before step 1 it draws one `u64`
//! per agent and each agent walks with its own generator seeded from it.
//! Sequential and parallel runs with the same seed produce identical results.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{construct_tour, AcoConfig, DepositMode, PheromoneMatrix, TransitionPolicy};
use crate::distance::DistanceMatrix;
use crate::error::AcoError;
use crate::models::Tour;

/// Tolerance used by [`DepositMode::Auto`] to decide symmetry.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Summary of one completed iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationStats {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Shortest tour built in this iteration.
    pub iteration_best: f64,
    /// Best length found so far, this iteration included.
    pub best_length: f64,
}

/// Outcome of a full run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcoResult {
    /// Shortest tour found.
    pub best_tour: Tour,
    /// Its length.
    pub best_length: f64,
    /// Shortest length of each iteration, in order.
    pub convergence: Vec<f64>,
}

/// Ant colony optimizer for a single-depot closed tour.
///
/// # Examples
///
/// ```
/// use u_colony::aco::{AcoConfig, AntColony};
/// use u_colony::distance::DistanceMatrix;
///
/// let s = std::f64::consts::SQRT_2;
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, s, 1.0],
///     vec![1.0, 0.0, 1.0, s],
///     vec![s, 1.0, 0.0, 1.0],
///     vec![1.0, s, 1.0, 0.0],
/// ])
/// .unwrap();
/// let config = AcoConfig::default()
///     .with_agent_count(10)
///     .with_iteration_count(20)
///     .with_seed(42);
///
/// let result = AntColony::new(&dm, config).unwrap().run();
/// assert_eq!(result.best_length, 4.0);
/// assert_eq!(result.convergence.len(), 20);
/// ```
pub struct AntColony<'a> {
    distances: &'a DistanceMatrix,
    config: AcoConfig,
    symmetric_deposit: bool,
    pheromone: PheromoneMatrix,
    rng: StdRng,
    best_tour: Option<Tour>,
    best_length: f64,
    convergence: Vec<f64>,
}

impl<'a> AntColony<'a> {
    /// Validates inputs and creates a colony with fresh pheromone.
    pub fn new(distances: &'a DistanceMatrix, config: AcoConfig) -> Result<Self, AcoError> {
        distances.validate()?;
        config.validate(distances.size())?;

        let symmetric_deposit = match config.deposit_mode {
            DepositMode::Directed => false,
            DepositMode::Symmetric => true,
            DepositMode::Auto => distances.is_symmetric(SYMMETRY_TOLERANCE),
        };
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            distances,
            symmetric_deposit,
            pheromone: PheromoneMatrix::new(distances.size(), config.initial_pheromone),
            rng,
            best_tour: None,
            best_length: f64::INFINITY,
            convergence: Vec::with_capacity(config.iteration_count),
            config,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Current pheromone levels.
    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    /// Best tour so far, if any iteration has run.
    pub fn best_tour(&self) -> Option<&Tour> {
        self.best_tour.as_ref()
    }

    /// Best length so far (`+∞` before the first iteration).
    pub fn best_length(&self) -> f64 {
        self.best_length
    }

    /// Per-iteration best lengths recorded so far.
    pub fn convergence(&self) -> &[f64] {
        &self.convergence
    }

    /// Whether deposits reinforce both edge directions.
    pub fn deposits_symmetric(&self) -> bool {
        self.symmetric_deposit
    }

    /// Runs one iteration and returns its summary.
    pub fn step(&mut self) -> IterationStats {
        let seeds: Vec<u64> = (0..self.config.agent_count)
            .map(|_| self.rng.random())
            .collect();
        let tours = self.construct_tours(&seeds);

        for (tour, length) in &tours {
            if self.best_tour.is_none() || *length < self.best_length {
                self.best_length = *length;
                self.best_tour = Some(tour.clone());
            }
        }

        self.pheromone.evaporate(self.config.evaporation_rate);
        let q = self.config.deposit_constant;
        for (tour, length) in &tours {
            if self.symmetric_deposit {
                self.pheromone.deposit_symmetric(tour, *length, q);
            } else {
                self.pheromone.deposit(tour, *length, q);
            }
        }

        let iteration_best = tours
            .iter()
            .map(|(_, length)| *length)
            .fold(f64::INFINITY, f64::min);
        self.convergence.push(iteration_best);

        let stats = IterationStats {
            iteration: self.convergence.len() - 1,
            iteration_best,
            best_length: self.best_length,
        };
        debug!(
            iteration = stats.iteration,
            iteration_best,
            best_length = self.best_length,
            "iteration complete"
        );
        stats
    }

    /// Runs the iterations left of `iteration_count` and returns the best
    /// tour found.
    ///
    /// Iterations already driven through [`step`](Self::step) count toward
    /// the budget, so the convergence log never exceeds `iteration_count`
    /// unless `step` alone was called more often.
    pub fn run(self) -> AcoResult {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), calling `observer` after every iteration.
    pub fn run_with<F>(mut self, mut observer: F) -> AcoResult
    where
        F: FnMut(&IterationStats),
    {
        info!(
            locations = self.distances.size(),
            agents = self.config.agent_count,
            iterations = self.config.iteration_count,
            already_run = self.convergence.len(),
            symmetric_deposit = self.symmetric_deposit,
            parallel = self.config.parallel,
            "starting ant colony run"
        );

        let remaining = self
            .config
            .iteration_count
            .saturating_sub(self.convergence.len());
        for _ in 0..remaining {
            let stats = self.step();
            observer(&stats);
        }

        let best_tour = self
            .best_tour
            .expect("a validated configuration builds at least one tour");
        info!(best_length = self.best_length, "ant colony run finished");

        AcoResult {
            best_tour,
            best_length: self.best_length,
            convergence: self.convergence,
        }
    }

    fn construct_tours(&self, seeds: &[u64]) -> Vec<(Tour, f64)> {
        let policy = TransitionPolicy::new(
            &self.pheromone,
            self.distances,
            self.config.alpha,
            self.config.beta,
        );
        let depot = self.config.depot_index;
        let walk = |&seed: &u64| construct_tour(&policy, depot, &mut StdRng::seed_from_u64(seed));

        if self.config.parallel {
            seeds.par_iter().map(walk).collect()
        } else {
            seeds.iter().map(walk).collect()
        }
    }
}

/// Builds a colony for `distances` and runs it to completion.
///
/// # Examples
///
/// ```
/// use u_colony::aco::{solve, AcoConfig};
/// use u_colony::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::new(1);
/// let result = solve(&dm, AcoConfig::default().with_seed(1)).unwrap();
/// assert_eq!(result.best_tour.path(), &[0, 0]);
/// assert_eq!(result.best_length, 0.0);
/// ```
pub fn solve(distances: &DistanceMatrix, config: AcoConfig) -> Result<AcoResult, AcoError> {
    Ok(AntColony::new(distances, config)?.run())
}
