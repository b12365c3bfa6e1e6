//! Ant colony optimization for a single-depot closed tour.
//!
//! - [`PheromoneMatrix`] — Dense pheromone levels with in-place evaporation and deposit
//! - [`TransitionPolicy`] — Random-proportional choice of the next location
//! - [`construct_tour`] — One agent's walk from the depot and back
//! - [`AntColony`] — Iteration loop, global best and convergence log
//! - [`AcoConfig`] — Run parameters and validation
//!
//! # Reference
//!
//! Dorigo, M. & Stützle, T. (2004). *Ant Colony Optimization*. MIT Press.

mod ant;
mod colony;
mod config;
mod pheromone;
mod transition;

pub use ant::construct_tour;
pub use colony::{solve, AcoResult, AntColony, IterationStats, SYMMETRY_TOLERANCE};
pub use config::{AcoConfig, DepositMode};
pub use pheromone::PheromoneMatrix;
pub use transition::{TransitionPolicy, DISTANCE_EPSILON};
