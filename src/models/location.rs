//! Named geographic locations and location sources.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Latitude of the default synthetic depot.
pub const SYNTHETIC_CENTER_LAT: f64 = 36.8841;
/// Longitude of the default synthetic depot.
pub const SYNTHETIC_CENTER_LON: f64 = 30.7056;
/// Half-width, in degrees, of the box synthetic stores are drawn from.
pub const SYNTHETIC_SPREAD_DEG: f64 = 0.05;

/// A named point given in decimal degrees.
///
/// # Examples
///
/// ```
/// use u_colony::models::Location;
///
/// let depot = Location::new("Depot", 36.8841, 30.7056);
/// assert_eq!(depot.name(), "Depot");
/// assert_eq!(depot.coordinates(), (36.8841, 30.7056));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Creates a new location.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// `(latitude, longitude)` pair.
    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// Failure to load locations from a [`LocationSource`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// The backing store could not be reached or authenticated.
    #[error("location source unavailable: {0}")]
    Unavailable(String),
    /// The store was reached but held no usable records.
    #[error("location source returned no locations")]
    Empty,
}

/// A provider of named locations (remote storage, file, database).
pub trait LocationSource {
    /// Loads the locations; index 0 is treated as the depot by convention.
    fn load(&self) -> Result<Vec<Location>, SourceError>;
}

/// Generates a deterministic synthetic instance.
///
/// Index 0 is a depot at ([`SYNTHETIC_CENTER_LAT`], [`SYNTHETIC_CENTER_LON`]);
/// indices `1..=count` are stores named `"Store i"` drawn uniformly within
/// ±[`SYNTHETIC_SPREAD_DEG`] of the depot. The same `seed` always yields the
/// same locations.
///
/// # Examples
///
/// ```
/// use u_colony::models::synthetic_locations;
///
/// let locations = synthetic_locations(20, 42);
/// assert_eq!(locations.len(), 21);
/// assert_eq!(locations[0].name(), "Depot");
/// assert_eq!(locations, synthetic_locations(20, 42));
/// ```
pub fn synthetic_locations(count: usize, seed: u64) -> Vec<Location> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut locations = Vec::with_capacity(count + 1);
    locations.push(Location::new(
        "Depot",
        SYNTHETIC_CENTER_LAT,
        SYNTHETIC_CENTER_LON,
    ));
    for i in 1..=count {
        let lat = SYNTHETIC_CENTER_LAT
            + rng.random_range(-SYNTHETIC_SPREAD_DEG..SYNTHETIC_SPREAD_DEG);
        let lon = SYNTHETIC_CENTER_LON
            + rng.random_range(-SYNTHETIC_SPREAD_DEG..SYNTHETIC_SPREAD_DEG);
        locations.push(Location::new(format!("Store {i}"), lat, lon));
    }
    locations
}

/// Loads from `source`, falling back to [`synthetic_locations`] on failure.
///
/// An empty result from the source counts as a failure.
pub fn load_or_synthetic<S: LocationSource + ?Sized>(
    source: &S,
    fallback_count: usize,
    fallback_seed: u64,
) -> Vec<Location> {
    match source.load() {
        Ok(locations) if !locations.is_empty() => locations,
        Ok(_) => {
            warn!(error = %SourceError::Empty, "using synthetic locations");
            synthetic_locations(fallback_count, fallback_seed)
        }
        Err(e) => {
            warn!(error = %e, "using synthetic locations");
            synthetic_locations(fallback_count, fallback_seed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<Location>);

    impl LocationSource for Fixed {
        fn load(&self) -> Result<Vec<Location>, SourceError> {
            Ok(self.0.clone())
        }
    }

    struct Offline;

    impl LocationSource for Offline {
        fn load(&self) -> Result<Vec<Location>, SourceError> {
            Err(SourceError::Unavailable("no credentials".into()))
        }
    }

    #[test]
    fn test_synthetic_within_box() {
        let locs = synthetic_locations(50, 7);
        assert_eq!(locs.len(), 51);
        for loc in &locs[1..] {
            assert!((loc.latitude() - SYNTHETIC_CENTER_LAT).abs() <= SYNTHETIC_SPREAD_DEG);
            assert!((loc.longitude() - SYNTHETIC_CENTER_LON).abs() <= SYNTHETIC_SPREAD_DEG);
        }
        assert_eq!(locs[3].name(), "Store 3");
    }

    #[test]
    fn test_synthetic_seed_changes_output() {
        assert_ne!(synthetic_locations(5, 1), synthetic_locations(5, 2));
    }

    #[test]
    fn test_synthetic_zero_count() {
        let locs = synthetic_locations(0, 42);
        assert_eq!(locs.len(), 1);
    }

    #[test]
    fn test_load_prefers_source() {
        let fixed = Fixed(vec![Location::new("A", 1.0, 2.0)]);
        let locs = load_or_synthetic(&fixed, 20, 42);
        assert_eq!(locs, vec![Location::new("A", 1.0, 2.0)]);
    }

    #[test]
    fn test_load_falls_back_on_error() {
        let locs = load_or_synthetic(&Offline, 20, 42);
        assert_eq!(locs, synthetic_locations(20, 42));
    }

    #[test]
    fn test_load_falls_back_on_empty() {
        let locs = load_or_synthetic(&Fixed(Vec::new()), 3, 42);
        assert_eq!(locs.len(), 4);
    }
}
