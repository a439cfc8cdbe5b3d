//! Error types for region construction, mutation, export and rendering.

use regionmap_types::GridPoint;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegionError {
    /// A mutating operation addressed a cell outside the region.
    ///
    /// Fatal for a batch: it means the bounds computed up front do not
    /// match the data being loaded.
    #[error("Point {point} was outside of bounds {min} {max}")]
    OutOfBounds {
        point: GridPoint,
        min: GridPoint,
        max: GridPoint,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RegionError>;
