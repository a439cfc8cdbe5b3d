//! Rasterized density grids built from point-sampled geographic data.
//!
//! Town populations are spread over a bounded grid with a mass-conserving
//! kernel, transit stops are flagged on an overlay, and the finished grid is
//! exported to flat CSV files or rendered as a heatmap.
//!
//! ```rust
//! use regionmap::{HeatmapRenderer, Region};
//! use regionmap_types::GridPoint;
//!
//! let town = GridPoint::from_lat_long(50.8503, 4.3517);
//! let mut region = Region::builder().include(town).build()?;
//! region.add_code(town, "21004")?;
//! region.spread_at_code("21004", 185_000.0, 3.2e7)?;
//! region.tag_stop(town.offset(1, 2), "8813003");
//!
//! let image = HeatmapRenderer::default().render(&region);
//! assert_eq!(image.width() as usize, region.width());
//! # Ok::<(), regionmap::RegionError>(())
//! ```

pub mod compute;
pub mod config;
pub mod error;
pub mod region;
pub mod render;

pub use config::{Color, Config, RenderConfig, StopHighlight};
pub use error::{RegionError, Result};
pub use region::{Cell, CellStats, DensityMode, Region, RegionBuilder};
pub use render::HeatmapRenderer;

pub use compute::geodesic::haversine_distance;
pub use compute::kernel::KernelOutcome;
pub use compute::raster::{DiskRaster, rasterize};

pub use regionmap_types::{GridPoint, LatLong, PRECISION, REGION_PADDING, TripSegment};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, Region, RegionBuilder, RegionError, RenderConfig, Result};

    pub use crate::{DensityMode, HeatmapRenderer, StopHighlight};

    pub use crate::{DiskRaster, haversine_distance, rasterize};

    pub use regionmap_types::{GridPoint, LatLong, TripSegment};
}
