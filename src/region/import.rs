//! Rebuild a region from a previously exported `region.csv`.
//!
//! The file carries no bounds, so they are inferred from the smallest and
//! largest coordinates seen.

use crate::compute::validation::{validate_lat_long, validate_quantity};
use crate::error::{RegionError, Result};
use crate::region::Region;
use regionmap_types::GridPoint;
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// How a row's density becomes a cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DensityMode {
    /// Every non-zero row counts as 1
    #[default]
    Presence,
    /// Keep the exported density
    Density,
}

impl DensityMode {
    fn cell_value(self, density: f64) -> f64 {
        match self {
            DensityMode::Presence if density != 0.0 => 1.0,
            DensityMode::Presence => 0.0,
            DensityMode::Density => density,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DensityRecord {
    lat: f64,
    long: f64,
    density: f64,
    #[serde(deserialize_with = "deserialize_flag", default)]
    hasstop: bool,
}

/// Accepts `true`/`false`, `1`/`0` and an empty field.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean flag, got {:?}",
            other
        ))),
    }
}

impl Region {
    /// Read `region.csv` rows from `reader` into a new region.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use regionmap::{DensityMode, Region};
    /// use regionmap_types::GridPoint;
    ///
    /// let data = "lat,long,density,hasstop\n50.85,4.35,0,false\n50.86,4.36,7.5,true\n";
    /// let region = Region::read_density_csv(data.as_bytes(), DensityMode::Density)?;
    /// assert_eq!(region.len(), 4);
    /// assert_eq!(region.value_at(&GridPoint::new(5086, 436)), Some(7.5));
    /// # Ok::<(), regionmap::RegionError>(())
    /// ```
    pub fn read_density_csv<R: Read>(reader: R, mode: DensityMode) -> Result<Region> {
        let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut rows = Vec::new();
        let mut extent: Option<(GridPoint, GridPoint)> = None;
        for record in csv.deserialize() {
            let record: DensityRecord = record?;
            validate_lat_long(record.lat, record.long)?;
            validate_quantity("density", record.density)?;

            let point = GridPoint::from_cell_corner(record.lat, record.long);
            extent = Some(match extent {
                Some((min, max)) => (min.component_min(&point), max.component_max(&point)),
                None => (point, point),
            });
            rows.push((point, record.density, record.hasstop));
        }

        let Some((min, max)) = extent else {
            return Err(RegionError::InvalidInput(
                "Density file contains no rows".to_string(),
            ));
        };

        let mut region = Region::new(min, max)?;
        for (point, density, has_stop) in rows {
            let value = mode.cell_value(density);
            if value != 0.0 {
                region.add_value(point, value)?;
            }
            if has_stop {
                region.add_stop(point);
            }
        }
        Ok(region)
    }

    /// Read a `region.csv` file into a new region.
    pub fn from_density_file<P: AsRef<Path>>(path: P, mode: DensityMode) -> Result<Region> {
        let path = path.as_ref();
        let region = Self::read_density_csv(BufReader::new(File::open(path)?), mode)?;
        log::info!("Loaded {} from {}", region, path.display());
        Ok(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::export::write_density_csv;

    #[test]
    fn test_presence_mode_counts_rows() {
        let data = "lat,long,density,hasstop\n\
                    1.0,2.0,250.0,false\n\
                    1.01,2.0,0.0,true\n\
                    1.0,2.01,0.25,false\n";
        let region = Region::read_density_csv(data.as_bytes(), DensityMode::Presence).unwrap();
        assert_eq!(region.min(), GridPoint::new(100, 200));
        assert_eq!(region.max(), GridPoint::new(101, 201));
        assert_eq!(region.value_at(&GridPoint::new(100, 200)), Some(1.0));
        assert_eq!(region.value_at(&GridPoint::new(101, 200)), Some(0.0));
        assert_eq!(region.value_at(&GridPoint::new(100, 201)), Some(1.0));
        assert!(region.has_stop(&GridPoint::new(101, 200)));
        assert_eq!(region.stats().total, 2.0);
    }

    #[test]
    fn test_flag_variants() {
        let data = "lat,long,density,hasstop\n\
                    0.0,0.0,1,1\n\
                    0.01,0.0,1,0\n\
                    0.02,0.0,1,\n\
                    0.03,0.0,1,TRUE\n";
        let region = Region::read_density_csv(data.as_bytes(), DensityMode::Density).unwrap();
        assert_eq!(region.stop_count(), 2);
        assert!(region.has_stop(&GridPoint::new(0, 0)));
        assert!(region.has_stop(&GridPoint::new(3, 0)));
    }

    #[test]
    fn test_bad_flag_rejected() {
        let data = "lat,long,density,hasstop\n0.0,0.0,1,maybe\n";
        let err = Region::read_density_csv(data.as_bytes(), DensityMode::Density).unwrap_err();
        assert!(matches!(err, RegionError::Csv(_)));
    }

    #[test]
    fn test_empty_file_rejected() {
        let data = "lat,long,density,hasstop\n";
        let err = Region::read_density_csv(data.as_bytes(), DensityMode::Presence).unwrap_err();
        assert!(matches!(err, RegionError::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_coordinate_rejected() {
        let data = "lat,long,density,hasstop\n91.0,0.0,1,false\n";
        assert!(Region::read_density_csv(data.as_bytes(), DensityMode::Presence).is_err());
    }

    #[test]
    fn test_export_import_preserves_cells() {
        let mut original =
            Region::new(GridPoint::new(5080, 430), GridPoint::new(5090, 440)).unwrap();
        original.add_value(GridPoint::new(5085, 435), 321.5).unwrap();
        original.add_value(GridPoint::new(5090, 440), 0.125).unwrap();
        original.add_value(GridPoint::new(5080, 430), 9.0).unwrap();
        original.add_stop(GridPoint::new(5083, 437));

        let mut buffer = Vec::new();
        write_density_csv(&original, &mut buffer).unwrap();
        let restored = Region::read_density_csv(buffer.as_slice(), DensityMode::Density).unwrap();

        assert_eq!(restored.min(), original.min());
        assert_eq!(restored.max(), original.max());
        assert_eq!(restored.cells(), original.cells());
        assert_eq!(restored.stops(), original.stops());
    }
}
