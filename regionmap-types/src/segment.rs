use crate::point::GridPoint;
use serde::{Deserialize, Serialize};

/// One leg of a transit trip between two resolved stop locations.
///
/// # Examples
///
/// ```
/// use regionmap_types::{GridPoint, TripSegment};
///
/// let leg = TripSegment::new(GridPoint::new(5085, 435), GridPoint::new(5105, 371));
/// assert!(!leg.is_stationary());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TripSegment {
    pub from: GridPoint,
    pub to: GridPoint,
}

impl TripSegment {
    pub fn new(from: GridPoint, to: GridPoint) -> Self {
        Self { from, to }
    }

    /// Both endpoints fall in the same grid cell.
    pub fn is_stationary(&self) -> bool {
        self.from == self.to
    }

    /// The same leg travelled in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}
