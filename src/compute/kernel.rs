//! Mass-conserving spread of a point quantity over its surroundings.
//!
//! A source such as a town carries a quantity `Q` and a surface area. The
//! area is turned into the radius of a circle with the same surface, and the
//! cells the disk rasterizer yields for that radius receive a share of `Q`
//! proportional to `w(d) = (r - d) / r`. Shares are normalized by the summed
//! weight, so the cells always add up to `Q` and the density decays linearly
//! from the center like a cone.

use crate::compute::geodesic::circle_surface_to_radius;
use crate::compute::raster::DiskRaster;
use crate::compute::validation::validate_quantity;
use crate::error::Result;
use crate::region::Region;
use regionmap_types::GridPoint;

/// What a call to [`spread`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelOutcome {
    /// Equivalent circle radius in meters, 0 for a degenerate kernel
    pub radius: f64,
    /// Number of cells that received a share
    pub cells: usize,
    /// Sum of the falloff weights over those cells
    pub total_weight: f64,
    /// The radius was not positive and `Q` went to the origin cell only
    pub degenerate: bool,
}

/// Spread `quantity` around `origin` into `region`.
///
/// `area` is the source's surface; the kernel radius is `sqrt(area / PI)`.
/// A zero, negative or otherwise degenerate radius puts the whole quantity
/// in the origin cell.
///
/// The footprint is walked twice: once to bounds-check every cell and sum
/// the weights, once to write. An `OutOfBounds` error therefore leaves the
/// region untouched, and a radius larger than the region fails as soon as
/// the walk leaves it.
///
/// # Examples
///
/// ```rust
/// use regionmap::Region;
/// use regionmap::compute::kernel::spread;
/// use regionmap_types::GridPoint;
///
/// let mut region = Region::new(GridPoint::new(5060, 410), GridPoint::new(5110, 460))?;
/// let outcome = spread(&mut region, GridPoint::new(5085, 435), 12_000.0, 2.0e8)?;
/// assert!(outcome.cells > 1);
/// assert!((region.stats().total - 12_000.0).abs() < 1e-6);
/// # Ok::<(), regionmap::RegionError>(())
/// ```
pub fn spread(
    region: &mut Region,
    origin: GridPoint,
    quantity: f64,
    area: f64,
) -> Result<KernelOutcome> {
    validate_quantity("quantity", quantity)?;
    validate_quantity("area", area)?;

    let radius = circle_surface_to_radius(area);
    if radius.is_nan() || radius <= 0.0 {
        log::debug!(
            "Degenerate kernel at {} (area {}), assigning {} to a single cell",
            origin,
            area,
            quantity
        );
        region.add_value(origin, quantity)?;
        return Ok(KernelOutcome {
            radius: 0.0,
            cells: 1,
            total_weight: 1.0,
            degenerate: true,
        });
    }

    let weight = |distance: f64| (radius - distance) / radius;

    // First pass: bounds and normalization. The region is finite, so this
    // stops at the first cell outside it even when the walk would not.
    let mut cells = 0;
    let mut total_weight = 0.0;
    for (point, distance) in DiskRaster::new(origin, radius) {
        if !region.contains(&point) {
            return Err(region.out_of_bounds(point));
        }
        cells += 1;
        total_weight += weight(distance);
    }

    let share = quantity / total_weight;
    for (point, distance) in DiskRaster::new(origin, radius) {
        region.add_value(point, share * weight(distance))?;
    }

    Ok(KernelOutcome {
        radius,
        cells,
        total_weight,
        degenerate: false,
    })
}
