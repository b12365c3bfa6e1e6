//! Error types for colony construction.
//!
//! Every check here runs before the first iteration. Nothing inside the
//! iteration loop returns an error.

use thiserror::Error;

/// A configuration or input error detected before a run starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// A distance matrix row does not have `expected` entries.
    #[error("distance matrix is not square: row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix {
        /// Offending row index.
        row: usize,
        /// Actual row length.
        len: usize,
        /// Number of rows in the matrix.
        expected: usize,
    },

    /// A distance entry is negative, NaN, or infinite.
    #[error("invalid distance {value} from {from} to {to}")]
    InvalidDistance {
        /// Origin index.
        from: usize,
        /// Destination index.
        to: usize,
        /// The rejected value.
        value: f64,
    },

    /// The depot index is not a valid location.
    #[error("depot index {depot} out of range for {size} locations")]
    DepotOutOfRange {
        /// Requested depot.
        depot: usize,
        /// Number of locations.
        size: usize,
    },

    /// `agent_count` is zero.
    #[error("agent count must be positive")]
    ZeroAgents,

    /// `iteration_count` is zero.
    #[error("iteration count must be positive")]
    ZeroIterations,

    /// `alpha` or `beta` is negative or non-finite.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidWeight {
        /// Parameter name (`alpha` or `beta`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Evaporation rate outside `(0, 1]`.
    #[error("evaporation rate must be in (0, 1], got {0}")]
    InvalidEvaporationRate(f64),

    /// Deposit constant `Q` not strictly positive.
    #[error("deposit constant must be positive, got {0}")]
    InvalidDepositConstant(f64),

    /// Initial pheromone not strictly positive.
    #[error("initial pheromone must be positive, got {0}")]
    InvalidInitialPheromone(f64),
}
