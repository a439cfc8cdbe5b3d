//! Region builder for bounds discovery.
//!
//! Ingestion usually makes one pass over the input to find the data extent
//! before any cell is written. The builder collects that extent and pads it
//! so kernels centered near the edge stay inside the region.

use crate::compute::validation;
use crate::config::Config;
use crate::error::{RegionError, Result};
use crate::region::Region;
use regionmap_types::GridPoint;

/// Builder for a [`Region`] sized to the points it has seen.
#[derive(Debug, Clone)]
pub struct RegionBuilder {
    extent: Option<(GridPoint, GridPoint)>,
    config: Config,
}

impl RegionBuilder {
    /// Create a builder with the default configuration and no extent.
    pub fn new() -> Self {
        Self {
            extent: None,
            config: Config::default(),
        }
    }

    /// Grow the extent to include `point`.
    pub fn include(mut self, point: GridPoint) -> Self {
        self.extent = Some(match self.extent {
            Some((min, max)) => (min.component_min(&point), max.component_max(&point)),
            None => (point, point),
        });
        self
    }

    /// Validate and project a latitude/longitude pair, then include it.
    pub fn include_lat_long(self, lat: f64, long: f64) -> Result<Self> {
        let point = validation::grid_point(lat, long)?;
        Ok(self.include(point))
    }

    /// Set the padding added on every side of the extent.
    pub fn padding(mut self, padding: i32) -> Self {
        self.config.padding = padding;
        self
    }

    /// Set the region configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Observed extent before padding.
    pub fn extent(&self) -> Option<(GridPoint, GridPoint)> {
        self.extent
    }

    /// Build the padded region.
    pub fn build(self) -> Result<Region> {
        self.config.validate().map_err(RegionError::InvalidConfig)?;

        let Some((min, max)) = self.extent else {
            return Err(RegionError::InvalidInput(
                "Cannot build a region without any points".to_string(),
            ));
        };

        let pad = self.config.padding;
        Region::with_config(min.offset(-pad, -pad), max.offset(pad, pad), &self.config)
    }
}

impl Extend<GridPoint> for RegionBuilder {
    fn extend<I: IntoIterator<Item = GridPoint>>(&mut self, iter: I) {
        for point in iter {
            *self = std::mem::take(self).include(point);
        }
    }
}

impl Default for RegionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
