//! # u-colony
//!
//! Single-depot closed-tour optimization with ant colony optimization:
//! pheromone model, stochastic tour construction, and convergence tracking.
//!
//! ## Modules
//!
//! - [`aco`] — Pheromone matrix, transition rule, tour construction, colony loop
//! - [`distance`] — Distance matrix and distance providers (great-circle fallback)
//! - [`models`] — Tours, locations, and location sources
//! - [`error`] — Configuration and input errors

pub mod aco;
pub mod distance;
pub mod error;
pub mod models;

pub use aco::{solve, AcoConfig, AcoResult, AntColony};
pub use distance::DistanceMatrix;
pub use error::AcoError;
pub use models::Tour;
