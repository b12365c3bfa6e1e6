//! Distance matrices and distance providers.
//!
//! Provides a dense distance matrix plus the boundary types that build one
//! from geographic locations.

mod haversine;
mod matrix;
mod provider;

pub use haversine::{haversine_km, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;
pub use provider::{
    DistanceProvider, FallbackProvider, HaversineProvider, RoutingService, ServiceError,
    SERVICE_BATCH_SIZE,
};
