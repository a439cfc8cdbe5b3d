//! Compute layer for the density engine.
//!
//! This module holds the pure algorithms the region is built with:
//! - Geodesic distance between grid cells
//! - Disk rasterization driven by that distance
//! - The mass-conserving kernel used to spread a point quantity
//! - Validation of raw geographic input
//!
//! None of these own state; the kernel writes through the region's
//! mutation API.

pub mod geodesic;
pub mod kernel;
pub mod raster;
pub mod validation;
