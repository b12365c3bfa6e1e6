//! Domain model types.
//!
//! Provides closed tours over a distance matrix, plus named geographic
//! locations and the source abstraction that supplies them.

mod location;
mod tour;

pub use location::{
    load_or_synthetic, synthetic_locations, Location, LocationSource, SourceError,
    SYNTHETIC_CENTER_LAT, SYNTHETIC_CENTER_LON, SYNTHETIC_SPREAD_DEG,
};
pub use tour::Tour;
