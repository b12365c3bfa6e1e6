//! Distance providers.
//!
//! A provider turns a list of locations into a [`DistanceMatrix`]. The
//! optimizer never talks to a provider; callers build the matrix first.
//!
//! [`FallbackProvider`] wraps an external [`RoutingService`] (road network,
//! mapping API) and fills anything the service cannot answer with the
//! great-circle distance, so callers always receive a complete matrix.

use thiserror::Error;
use tracing::warn;

use super::{haversine_km, DistanceMatrix};
use crate::models::Location;

/// Maximum origins (and destinations) per service request.
pub const SERVICE_BATCH_SIZE: usize = 25;

/// Failure reported by a [`RoutingService`].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("routing service error: {message}")]
pub struct ServiceError {
    /// Human-readable cause.
    pub message: String,
}

impl ServiceError {
    /// Creates a new service error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Builds a distance matrix for a set of locations.
pub trait DistanceProvider {
    /// Returns the n×n matrix for `locations`, in the same order.
    fn distance_matrix(&self, locations: &[Location]) -> DistanceMatrix;
}

/// Closed-form great-circle distances in kilometres.
///
/// # Examples
///
/// ```
/// use u_colony::models::Location;
/// use u_colony::distance::{DistanceProvider, HaversineProvider};
///
/// let locations = vec![
///     Location::new("depot", 36.8841, 30.7056),
///     Location::new("store", 36.9000, 30.7200),
/// ];
/// let dm = HaversineProvider.distance_matrix(&locations);
/// assert_eq!(dm.size(), 2);
/// assert_eq!(dm.get(0, 0), 0.0);
/// assert!(dm.get(0, 1) > 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineProvider;

impl DistanceProvider for HaversineProvider {
    fn distance_matrix(&self, locations: &[Location]) -> DistanceMatrix {
        let n = locations.len();
        let mut dm = DistanceMatrix::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine_km(&locations[i], &locations[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }
}

/// An external source of travel distances (e.g. a road-network API).
pub trait RoutingService {
    /// Returns distances in kilometres for every (origin, destination) pair.
    ///
    /// The outer vector follows `origins`, the inner one `destinations`.
    /// A `None` cell means the service had no answer for that pair.
    fn distances(
        &self,
        origins: &[Location],
        destinations: &[Location],
    ) -> Result<Vec<Vec<Option<f64>>>, ServiceError>;
}

/// Queries a [`RoutingService`] and falls back to great-circle distances.
///
/// Requests are issued in blocks of at most [`SERVICE_BATCH_SIZE`] origins
/// by [`SERVICE_BATCH_SIZE`] destinations. A block that fails as a whole, or
/// an individual cell that is missing, negative or non-finite, is filled
/// with [`haversine_km`]. Diagonal entries are always zero.
pub struct FallbackProvider<S> {
    service: Option<S>,
}

impl<S: RoutingService> FallbackProvider<S> {
    /// Creates a provider backed by `service`.
    pub fn new(service: S) -> Self {
        Self {
            service: Some(service),
        }
    }

    /// Creates a provider with no service (e.g. missing credentials).
    ///
    /// Every cell is computed with the haversine formula.
    pub fn without_service() -> Self {
        Self { service: None }
    }

    fn fill_block(
        &self,
        service: &S,
        locations: &[Location],
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
        dm: &mut DistanceMatrix,
    ) {
        let block = match service.distances(&locations[rows.clone()], &locations[cols.clone()]) {
            Ok(block) => block,
            Err(e) => {
                warn!(
                    rows = ?rows,
                    cols = ?cols,
                    error = %e,
                    "routing service failed, using great-circle distances for block"
                );
                Vec::new()
            }
        };

        for (bi, i) in rows.enumerate() {
            for (bj, j) in cols.clone().enumerate() {
                if i == j {
                    dm.set(i, j, 0.0);
                    continue;
                }
                let cell = block.get(bi).and_then(|r| r.get(bj)).copied().flatten();
                let d = match cell {
                    Some(d) if d.is_finite() && d >= 0.0 => d,
                    _ => haversine_km(&locations[i], &locations[j]),
                };
                dm.set(i, j, d);
            }
        }
    }
}

impl<S: RoutingService> DistanceProvider for FallbackProvider<S> {
    fn distance_matrix(&self, locations: &[Location]) -> DistanceMatrix {
        let service = match &self.service {
            Some(s) => s,
            None => {
                warn!("no routing service configured, using great-circle distances");
                return HaversineProvider.distance_matrix(locations);
            }
        };

        let n = locations.len();
        let mut dm = DistanceMatrix::new(n);
        for row_start in (0..n).step_by(SERVICE_BATCH_SIZE) {
            let rows = row_start..(row_start + SERVICE_BATCH_SIZE).min(n);
            for col_start in (0..n).step_by(SERVICE_BATCH_SIZE) {
                let cols = col_start..(col_start + SERVICE_BATCH_SIZE).min(n);
                self.fill_block(service, locations, rows.clone(), cols, &mut dm);
            }
        }
        dm
    }
}
