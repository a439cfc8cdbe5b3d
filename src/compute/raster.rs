//! Disk rasterization over the fixed-point grid.
//!
//! The footprint of a disk on the grid depends on latitude, so there is no
//! precomputed stencil. Instead the plane around the origin is split into
//! four quadrants and each one is swept row by row: a row is extended away
//! from the origin until a cell falls outside the radius, then the sweep
//! moves one row further out and restarts at the origin's column. A quadrant
//! ends when the first cell of a new row is already out of range.
//!
//! The origin row is shared by the two quadrants stepping along `y`, and the
//! origin column by the two stepping along `x`. The quadrant stepping in the
//! negative direction on a shared axis walks it without emitting, so every
//! cell is produced once. The result is close to, but not exactly, a disk;
//! the kernel's population totals depend on this exact cell set.

use crate::compute::geodesic::haversine_distance;
use regionmap_types::GridPoint;
use std::iter::FusedIterator;

/// Step direction `(dx, dy)` of each quadrant, in sweep order.
const QUADRANTS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    /// The origin has not been emitted yet
    Origin,
    /// Sweeping `quadrant`; `cursor` is the last cell tested in the current row
    Sweep { quadrant: usize, cursor: GridPoint },
    Done,
}

/// Iterator over the cells within `radius` meters of an origin.
///
/// Yields `(cell, distance_meters)`, the origin first with distance 0, then
/// every other cell whose haversine distance is strictly below the radius,
/// each exactly once.
///
/// # Examples
///
/// ```rust
/// use regionmap::compute::raster::DiskRaster;
/// use regionmap_types::GridPoint;
///
/// let origin = GridPoint::new(0, 0);
/// let cells: Vec<_> = DiskRaster::new(origin, 1_700.0).map(|(p, _)| p).collect();
/// assert_eq!(cells[0], origin);
/// assert_eq!(cells.len(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct DiskRaster {
    origin: GridPoint,
    radius: f64,
    state: WalkState,
}

impl DiskRaster {
    pub fn new(origin: GridPoint, radius_meters: f64) -> Self {
        let radius = if radius_meters.is_finite() {
            radius_meters
        } else {
            log::warn!(
                "Non-finite raster radius {} around {}, emitting origin only",
                radius_meters,
                origin
            );
            0.0
        };
        Self {
            origin,
            radius,
            state: WalkState::Origin,
        }
    }

    pub fn origin(&self) -> GridPoint {
        self.origin
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Iterator for DiskRaster {
    type Item = (GridPoint, f64);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (quadrant, cursor) = match self.state {
                WalkState::Done => return None,
                WalkState::Origin => {
                    self.state = WalkState::Sweep {
                        quadrant: 0,
                        cursor: self.origin,
                    };
                    return Some((self.origin, 0.0));
                }
                WalkState::Sweep { quadrant, cursor } => (quadrant, cursor),
            };
            let (dx, dy) = QUADRANTS[quadrant];

            // Extend the current row.
            let next = GridPoint::new(cursor.x + dx, cursor.y);
            let distance = haversine_distance(&self.origin, &next);
            if distance < self.radius {
                self.state = WalkState::Sweep {
                    quadrant,
                    cursor: next,
                };
                if dy > 0 || next.y != self.origin.y {
                    return Some((next, distance));
                }
                continue;
            }

            // Row exhausted, start the next one at the origin's column.
            let row_start = GridPoint::new(self.origin.x, cursor.y + dy);
            let distance = haversine_distance(&self.origin, &row_start);
            if distance < self.radius {
                self.state = WalkState::Sweep {
                    quadrant,
                    cursor: row_start,
                };
                if dx > 0 || row_start.x != self.origin.x {
                    return Some((row_start, distance));
                }
                continue;
            }

            self.state = if quadrant + 1 < QUADRANTS.len() {
                WalkState::Sweep {
                    quadrant: quadrant + 1,
                    cursor: self.origin,
                }
            } else {
                WalkState::Done
            };
        }
    }
}

impl FusedIterator for DiskRaster {}

/// Call `visit` for every cell of [`DiskRaster`] around `origin`.
pub fn rasterize<F>(origin: GridPoint, radius_meters: f64, mut visit: F)
where
    F: FnMut(GridPoint, f64),
{
    for (point, distance) in DiskRaster::new(origin, radius_meters) {
        visit(point, distance);
    }
}
