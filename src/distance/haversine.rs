//! Great-circle distance between geographic coordinates.

use crate::models::Location;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two locations (haversine formula).
///
/// # Examples
///
/// ```
/// use u_colony::models::Location;
/// use u_colony::distance::haversine_km;
///
/// let a = Location::new("a", 0.0, 0.0);
/// let b = Location::new("b", 0.0, 1.0);
/// // One degree of longitude on the equator is about 111.19 km
/// assert!((haversine_km(&a, &b) - 111.19).abs() < 0.01);
/// ```
pub fn haversine_km(a: &Location, b: &Location) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude() - a.longitude()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
