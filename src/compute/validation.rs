//! Validation for raw geographic input before it is projected onto the grid.

use crate::error::{RegionError, Result};
use regionmap_types::GridPoint;

/// Validates a latitude/longitude pair.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use regionmap::compute::validation::validate_lat_long;
///
/// assert!(validate_lat_long(50.85, 4.35).is_ok());
/// assert!(validate_lat_long(95.0, 4.35).is_err());
/// assert!(validate_lat_long(50.85, f64::NAN).is_err());
/// ```
pub fn validate_lat_long(lat: f64, long: f64) -> Result<()> {
    if !lat.is_finite() {
        return Err(RegionError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    if !long.is_finite() {
        return Err(RegionError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            long
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(RegionError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    if !(-180.0..=180.0).contains(&long) {
        return Err(RegionError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            long
        )));
    }

    Ok(())
}

/// Validates a latitude/longitude pair and projects it onto the grid.
pub fn grid_point(lat: f64, long: f64) -> Result<GridPoint> {
    validate_lat_long(lat, long)?;
    Ok(GridPoint::from_lat_long(lat, long))
}

/// Validates a scalar quantity (population, area, density).
pub fn validate_quantity(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(RegionError::InvalidInput(format!(
            "{} must be finite, got: {}",
            name, value
        )));
    }
    Ok(())
}
