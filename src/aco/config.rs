//! Colony configuration.

use serde::{Deserialize, Serialize};

use crate::error::AcoError;

/// Which pheromone entries a tour reinforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositMode {
    /// Only the traversed direction `u → v`.
    Directed,
    /// Both `u → v` and `v → u`.
    Symmetric,
    /// `Symmetric` when the distance matrix is symmetric, `Directed` otherwise.
    #[default]
    Auto,
}

/// Parameters for an [`AntColony`](super::AntColony) run.
///
/// Missing fields take their [`Default`] values when deserialized, so a
/// configuration file only needs to list what it overrides.
///
/// # Examples
///
/// ```
/// use u_colony::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_agent_count(10)
///     .with_iteration_count(20)
///     .with_seed(42);
/// assert_eq!(config.agent_count, 10);
/// assert!(config.validate(4).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcoConfig {
    /// Tours built per iteration.
    pub agent_count: usize,
    /// Iterations to run.
    pub iteration_count: usize,
    /// Pheromone exponent (α).
    pub alpha: f64,
    /// Inverse-distance exponent (β).
    pub beta: f64,
    /// Fraction of pheromone removed per iteration (ρ), in `(0, 1]`.
    pub evaporation_rate: f64,
    /// Deposit constant (Q); a tour of length `L` adds `Q / L` per edge.
    pub deposit_constant: f64,
    /// Start and end of every tour.
    pub depot_index: usize,
    /// Value every pheromone entry starts at.
    pub initial_pheromone: f64,
    /// Deposit direction.
    pub deposit_mode: DepositMode,
    /// Master seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// Build the agents of an iteration on the rayon thread pool.
    pub parallel: bool,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            agent_count: 50,
            iteration_count: 100,
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.5,
            deposit_constant: 100.0,
            depot_index: 0,
            initial_pheromone: 0.1,
            deposit_mode: DepositMode::Auto,
            seed: None,
            parallel: false,
        }
    }
}

impl AcoConfig {
    /// Sets the number of agents per iteration.
    pub fn with_agent_count(mut self, n: usize) -> Self {
        self.agent_count = n;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iteration_count(mut self, n: usize) -> Self {
        self.iteration_count = n;
        self
    }

    /// Sets the pheromone exponent (α).
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the inverse-distance exponent (β).
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate (ρ).
    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    /// Sets the deposit constant (Q).
    pub fn with_deposit_constant(mut self, q: f64) -> Self {
        self.deposit_constant = q;
        self
    }

    /// Sets the depot index.
    pub fn with_depot_index(mut self, depot: usize) -> Self {
        self.depot_index = depot;
        self
    }

    /// Sets the initial pheromone level.
    pub fn with_initial_pheromone(mut self, tau0: f64) -> Self {
        self.initial_pheromone = tau0;
        self
    }

    /// Sets the deposit direction.
    pub fn with_deposit_mode(mut self, mode: DepositMode) -> Self {
        self.deposit_mode = mode;
        self
    }

    /// Fixes the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel agent construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration for a problem with `size` locations.
    pub fn validate(&self, size: usize) -> Result<(), AcoError> {
        if self.agent_count == 0 {
            return Err(AcoError::ZeroAgents);
        }
        if self.iteration_count == 0 {
            return Err(AcoError::ZeroIterations);
        }
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !value.is_finite() || value < 0.0 {
                return Err(AcoError::InvalidWeight { name, value });
            }
        }
        // NaN fails both comparisons
        if !(self.evaporation_rate > 0.0 && self.evaporation_rate <= 1.0) {
            return Err(AcoError::InvalidEvaporationRate(self.evaporation_rate));
        }
        if !(self.deposit_constant.is_finite() && self.deposit_constant > 0.0) {
            return Err(AcoError::InvalidDepositConstant(self.deposit_constant));
        }
        if !(self.initial_pheromone.is_finite() && self.initial_pheromone > 0.0) {
            return Err(AcoError::InvalidInitialPheromone(self.initial_pheromone));
        }
        if self.depot_index >= size {
            return Err(AcoError::DepotOutOfRange {
                depot: self.depot_index,
                size,
            });
        }
        Ok(())
    }
}
