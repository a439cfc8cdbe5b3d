//! # regionmap-types
//!
//! Value types shared by the regionmap engine:
//!
//! - **Grid coordinates**: `GridPoint`, the fixed-point projection of a
//!   latitude/longitude pair at `PRECISION` units per degree
//! - **Geographic coordinates**: `LatLong`
//! - **Transit legs**: `TripSegment`
//!
//! All types are serializable with Serde and convert to and from the `geo`
//! crate's `Point`.
//!
//! ## Examples
//!
//! ```rust
//! use regionmap_types::point::GridPoint;
//!
//! let brussels = GridPoint::from_lat_long(50.8503, 4.3517);
//! assert_eq!((brussels.x, brussels.y), (5085, 435));
//! ```

pub mod point;
pub mod segment;

pub use point::{GridPoint, LatLong, PRECISION, REGION_PADDING};
pub use segment::TripSegment;
