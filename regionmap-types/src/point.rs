use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid units per degree of latitude/longitude.
pub const PRECISION: i32 = 100;

/// Margin, in grid units, added around an observed data extent so that
/// kernels centered near the edge stay inside the region.
pub const REGION_PADDING: i32 = PRECISION / 10;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLong {
    pub lat: f64,
    pub long: f64,
}

impl LatLong {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }
}

impl fmt::Display for LatLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.long)
    }
}

/// A cell address on the fixed-point grid.
///
/// `x` is the latitude axis and `y` the longitude axis, both expressed in
/// units of `1 / PRECISION` degrees. The projection floors, so converting
/// back with [`GridPoint::to_lat_long`] yields the south-west corner of the
/// cell and is within `1 / PRECISION` degrees of the original coordinate.
///
/// # Examples
///
/// ```
/// use regionmap_types::point::{GridPoint, PRECISION};
///
/// let p = GridPoint::from_lat_long(51.0543, 3.7174);
/// let back = p.to_lat_long();
/// assert!((back.lat - 51.0543).abs() < 1.0 / PRECISION as f64);
/// assert!((back.long - 3.7174).abs() < 1.0 / PRECISION as f64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Project a latitude/longitude pair onto the grid.
    pub fn from_lat_long(lat: f64, long: f64) -> Self {
        let scale = PRECISION as f64;
        Self {
            x: (lat * scale).floor() as i32,
            y: (long * scale).floor() as i32,
        }
    }

    /// Recover a cell from coordinates that were produced by
    /// [`GridPoint::to_lat_long`], such as a previously exported region.
    ///
    /// Snaps to the nearest grid unit instead of flooring, since
    /// `x / PRECISION * PRECISION` can land just below `x`.
    pub fn from_cell_corner(lat: f64, long: f64) -> Self {
        let scale = PRECISION as f64;
        Self {
            x: (lat * scale).round() as i32,
            y: (long * scale).round() as i32,
        }
    }

    /// Approximate inverse of [`GridPoint::from_lat_long`].
    pub fn to_lat_long(&self) -> LatLong {
        let scale = PRECISION as f64;
        LatLong {
            lat: self.x as f64 / scale,
            long: self.y as f64 / scale,
        }
    }

    /// Project a `geo::Point` (x = longitude, y = latitude).
    pub fn from_geo(point: &Point<f64>) -> Self {
        Self::from_lat_long(point.y(), point.x())
    }

    /// The cell corner as a `geo::Point` (x = longitude, y = latitude).
    pub fn to_geo(&self) -> Point<f64> {
        let LatLong { lat, long } = self.to_lat_long();
        Point::new(long, lat)
    }

    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Component-wise minimum.
    pub fn component_min(&self, other: &GridPoint) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// Component-wise maximum.
    pub fn component_max(&self, other: &GridPoint) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }
}

impl From<LatLong> for GridPoint {
    fn from(value: LatLong) -> Self {
        Self::from_lat_long(value.lat, value.long)
    }
}

impl From<GridPoint> for Point<f64> {
    fn from(value: GridPoint) -> Self {
        value.to_geo()
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
