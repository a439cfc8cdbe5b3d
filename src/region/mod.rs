//! The bounded density grid.
//!
//! A [`Region`] owns a dense rectangle of scalar cells, a stop-flag overlay
//! with the same layout, and a sparse registry mapping symbolic codes
//! (administrative identifiers, stop ids) to the cell they were seen in.
//!
//! Bounds are inclusive on both axes and fixed at construction. Writes to
//! cells and codes outside them fail with [`RegionError::OutOfBounds`];
//! stop flags outside them are dropped.

mod builder;
pub mod export;
pub mod import;

pub use builder::RegionBuilder;
pub use import::DensityMode;

use crate::compute::kernel::{self, KernelOutcome};
use crate::compute::validation::validate_quantity;
use crate::config::Config;
use crate::error::{RegionError, Result};
use regionmap_types::{GridPoint, TripSegment};
use rustc_hash::FxHashMap;
use std::fmt;

/// Summary of cell values, empty cells counted as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub total: f64,
    /// Number of cells holding a non-zero value
    pub nonzero: usize,
}

/// A single cell as seen by exporters and renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub index: usize,
    pub point: GridPoint,
    pub value: f64,
    pub has_stop: bool,
}

#[derive(Debug, Clone)]
pub struct Region {
    min: GridPoint,
    max: GridPoint,
    width: usize,
    height: usize,
    cells: Vec<f64>,
    stops: Vec<bool>,
    codes: FxHashMap<String, GridPoint>,
    warn_on_code_overwrite: bool,
}

impl Region {
    /// Create an empty region covering `min..=max` on both axes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use regionmap::Region;
    /// use regionmap_types::GridPoint;
    ///
    /// let region = Region::new(GridPoint::new(0, 0), GridPoint::new(10, 10))?;
    /// assert_eq!(region.len(), 121);
    /// # Ok::<(), regionmap::RegionError>(())
    /// ```
    pub fn new(min: GridPoint, max: GridPoint) -> Result<Self> {
        Self::with_config(min, max, &Config::default())
    }

    pub fn with_config(min: GridPoint, max: GridPoint, config: &Config) -> Result<Self> {
        if min.x > max.x || min.y > max.y {
            return Err(RegionError::InvalidInput(format!(
                "Region minimum {} must not exceed maximum {}",
                min, max
            )));
        }

        let width = (max.x as i64 - min.x as i64 + 1) as usize;
        let height = (max.y as i64 - min.y as i64 + 1) as usize;
        let len = width.checked_mul(height).ok_or_else(|| {
            RegionError::InvalidInput(format!("Region {} {} is too large", min, max))
        })?;

        log::debug!("region cells: {} ({}x{})", len, width, height);

        Ok(Self {
            min,
            max,
            width,
            height,
            cells: vec![0.0; len],
            stops: vec![false; len],
            codes: FxHashMap::default(),
            warn_on_code_overwrite: config.warn_on_code_overwrite,
        })
    }

    pub fn builder() -> RegionBuilder {
        RegionBuilder::new()
    }

    pub fn min(&self) -> GridPoint {
        self.min
    }

    pub fn max(&self) -> GridPoint {
        self.max
    }

    /// Number of cells along the `x` (latitude) axis.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells along the `y` (longitude) axis.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, point: &GridPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Linear cell index of `point`, or `None` when it lies outside.
    pub fn index_of(&self, point: &GridPoint) -> Option<usize> {
        if !self.contains(point) {
            return None;
        }
        let dx = (point.x - self.min.x) as usize;
        let dy = (point.y - self.min.y) as usize;
        Some(dx + self.width * dy)
    }

    /// Grid coordinate of a linear cell index, or `None` past the end.
    pub fn point_of(&self, index: usize) -> Option<GridPoint> {
        if index >= self.cells.len() {
            return None;
        }
        Some(GridPoint::new(
            self.min.x + (index % self.width) as i32,
            self.min.y + (index / self.width) as i32,
        ))
    }

    pub(crate) fn out_of_bounds(&self, point: GridPoint) -> RegionError {
        RegionError::OutOfBounds {
            point,
            min: self.min,
            max: self.max,
        }
    }

    fn checked_index(&self, point: &GridPoint) -> Result<usize> {
        self.index_of(point).ok_or_else(|| self.out_of_bounds(*point))
    }

    /// Register `code` at `point`, replacing any earlier registration.
    ///
    /// Returns the previous location of the code, if any.
    pub fn add_code(
        &mut self,
        point: GridPoint,
        code: impl Into<String>,
    ) -> Result<Option<GridPoint>> {
        self.checked_index(&point)?;
        let code = code.into();
        let previous = self.codes.insert(code.clone(), point);
        if let Some(old) = previous
            && old != point
            && self.warn_on_code_overwrite
        {
            log::warn!(
                "Code {} moved from {} to {}; duplicate codes usually mean a bad join",
                code,
                old,
                point
            );
        }
        Ok(previous)
    }

    /// Location registered for `code`, if any.
    pub fn get_point(&self, code: &str) -> Option<GridPoint> {
        self.codes.get(code).copied()
    }

    pub fn code_count(&self) -> usize {
        self.codes.len()
    }

    pub fn codes(&self) -> impl Iterator<Item = (&str, GridPoint)> {
        self.codes.iter().map(|(code, point)| (code.as_str(), *point))
    }

    /// Add `amount` to the cell at `point`. Non-finite amounts are rejected.
    pub fn add_value(&mut self, point: GridPoint, amount: f64) -> Result<()> {
        validate_quantity("amount", amount)?;
        let index = self.checked_index(&point)?;
        self.cells[index] += amount;
        Ok(())
    }

    pub fn value_at(&self, point: &GridPoint) -> Option<f64> {
        self.index_of(point).map(|index| self.cells[index])
    }

    /// Flag the cell at `point` as holding a transit stop.
    ///
    /// Points outside the region are ignored; returns whether a cell was
    /// flagged.
    pub fn add_stop(&mut self, point: GridPoint) -> bool {
        match self.index_of(&point) {
            Some(index) => {
                self.stops[index] = true;
                true
            }
            None => {
                log::debug!("Ignoring stop at {} outside of region", point);
                false
            }
        }
    }

    pub fn has_stop(&self, point: &GridPoint) -> bool {
        self.index_of(point).is_some_and(|index| self.stops[index])
    }

    pub fn stop_count(&self) -> usize {
        self.stops.iter().filter(|flag| **flag).count()
    }

    /// Flag a stop and register it under `stop_<id>`.
    ///
    /// A stop outside the region is not registered; that is logged and
    /// reported through the return value rather than failing the batch.
    pub fn tag_stop(&mut self, point: GridPoint, stop_id: &str) -> bool {
        self.add_stop(point);
        match self.add_code(point, format!("stop_{}", stop_id)) {
            Ok(_) => true,
            Err(e) => {
                log::debug!("Stop {} not registered: {}", stop_id, e);
                false
            }
        }
    }

    /// Resolve a leg between two registered codes.
    ///
    /// Returns `None` when either code is unknown so the caller can drop the
    /// record and keep going.
    pub fn resolve_segment(&self, from_code: &str, to_code: &str) -> Option<TripSegment> {
        match (self.get_point(from_code), self.get_point(to_code)) {
            (Some(from), Some(to)) => Some(TripSegment::new(from, to)),
            (from, to) => {
                log::debug!(
                    "Dropping segment {} -> {}: unresolved {}",
                    from_code,
                    to_code,
                    match (from, to) {
                        (None, None) => "both endpoints",
                        (None, _) => "origin",
                        _ => "destination",
                    }
                );
                None
            }
        }
    }

    /// Spread `quantity` around `origin` with the linear falloff kernel.
    ///
    /// See [`kernel::spread`].
    pub fn spread_at(
        &mut self,
        origin: GridPoint,
        quantity: f64,
        area: f64,
    ) -> Result<KernelOutcome> {
        kernel::spread(self, origin, quantity, area)
    }

    /// Spread `quantity` around the location registered for `code`.
    ///
    /// Unknown codes are skipped with `Ok(None)`.
    pub fn spread_at_code(
        &mut self,
        code: &str,
        quantity: f64,
        area: f64,
    ) -> Result<Option<KernelOutcome>> {
        let Some(origin) = self.get_point(code) else {
            log::warn!("No location registered for code {}, skipping", code);
            return Ok(None);
        };
        kernel::spread(self, origin, quantity, area).map(Some)
    }

    /// Cell values in linear index order.
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    /// Stop flags in linear index order.
    pub fn stops(&self) -> &[bool] {
        &self.stops
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .zip(self.stops.iter())
            .enumerate()
            .map(|(index, (value, has_stop))| Cell {
                index,
                point: GridPoint::new(
                    self.min.x + (index % self.width) as i32,
                    self.min.y + (index / self.width) as i32,
                ),
                value: *value,
                has_stop: *has_stop,
            })
    }

    pub fn stats(&self) -> CellStats {
        let mut stats = CellStats {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            ..CellStats::default()
        };
        for &value in &self.cells {
            stats.min = stats.min.min(value);
            stats.max = stats.max.max(value);
            stats.total += value;
            if value != 0.0 {
                stats.nonzero += 1;
            }
        }
        stats.avg = stats.total / self.cells.len() as f64;
        stats
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region {} {} ({}x{} cells, {} codes, {} stops)",
            self.min,
            self.max,
            self.width,
            self.height,
            self.codes.len(),
            self.stop_count()
        )
    }
}
