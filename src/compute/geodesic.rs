//! Great-circle distance between grid cells.
//!
//! A grid unit spans a fixed angle, so its length on the ground shrinks with
//! latitude. Every "how far" question in the engine goes through
//! [`haversine_distance`] instead of grid-space Euclidean distance.

use regionmap_types::GridPoint;
use std::f64::consts::PI;

/// Twice the mean Earth radius, in meters.
pub const EARTH_DIAMETER_METERS: f64 = 12_742_000.0;

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Haversine distance in meters between the corners of two grid cells.
///
/// # Examples
///
/// ```rust
/// use regionmap::compute::geodesic::haversine_distance;
/// use regionmap_types::GridPoint;
///
/// let base = GridPoint::from_lat_long(50.0, 4.0);
/// let north = base.offset(100, 0);
/// let meters = haversine_distance(&base, &north);
/// assert!((meters - 111_195.0).abs() < 1.0); // one degree of latitude
/// ```
pub fn haversine_distance(point1: &GridPoint, point2: &GridPoint) -> f64 {
    let p1 = point1.to_lat_long();
    let p2 = point2.to_lat_long();

    let d_lat = degrees_to_radians(p2.lat - p1.lat);
    let d_lon = degrees_to_radians(p2.long - p1.long);

    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + degrees_to_radians(p1.lat).cos()
            * degrees_to_radians(p2.lat).cos()
            * (d_lon / 2.0).sin()
            * (d_lon / 2.0).sin();

    EARTH_DIAMETER_METERS * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Radius of the circle whose surface equals `surface`.
pub fn circle_surface_to_radius(surface: f64) -> f64 {
    (surface / PI).sqrt()
}
