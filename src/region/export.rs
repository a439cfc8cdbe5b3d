//! Flat CSV exports of a finished region.
//!
//! - `region.csv`: `lat,long,density,hasstop`, one row per cell
//! - `region_cells.csv`: `x,y,lat,long,density,hasstop`, with `x`/`y`
//!   relative to the region's minimum corner
//! - `region_edges.csv`: `x1,y1,x2,y2`, one row per trip segment in raw
//!   grid coordinates
//!
//! Rows follow linear cell index order.

use crate::error::Result;
use crate::region::Region;
use regionmap_types::TripSegment;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const DENSITY_HEADER: [&str; 4] = ["lat", "long", "density", "hasstop"];
pub const CELLS_HEADER: [&str; 6] = ["x", "y", "lat", "long", "density", "hasstop"];
pub const EDGES_HEADER: [&str; 4] = ["x1", "y1", "x2", "y2"];

#[derive(Debug, Serialize)]
struct DensityRow {
    lat: f64,
    long: f64,
    density: f64,
    hasstop: bool,
}

#[derive(Debug, Serialize)]
struct CellRow {
    x: i32,
    y: i32,
    lat: f64,
    long: f64,
    density: f64,
    hasstop: bool,
}

#[derive(Debug, Serialize)]
struct EdgeRow {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

fn csv_writer<W: Write>(writer: W, header: &[&str]) -> Result<csv::Writer<W>> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(header)?;
    Ok(csv)
}

/// Write `region.csv` rows to `writer`.
pub fn write_density_csv<W: Write>(region: &Region, writer: W) -> Result<()> {
    let mut csv = csv_writer(writer, &DENSITY_HEADER)?;
    for cell in region.iter_cells() {
        let position = cell.point.to_lat_long();
        csv.serialize(DensityRow {
            lat: position.lat,
            long: position.long,
            density: cell.value,
            hasstop: cell.has_stop,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Write `region_cells.csv` rows to `writer`.
pub fn write_cells_csv<W: Write>(region: &Region, writer: W) -> Result<()> {
    let min = region.min();
    let mut csv = csv_writer(writer, &CELLS_HEADER)?;
    for cell in region.iter_cells() {
        let position = cell.point.to_lat_long();
        csv.serialize(CellRow {
            x: cell.point.x - min.x,
            y: cell.point.y - min.y,
            lat: position.lat,
            long: position.long,
            density: cell.value,
            hasstop: cell.has_stop,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Write `region_edges.csv` rows to `writer`.
pub fn write_edges_csv<W: Write>(segments: &[TripSegment], writer: W) -> Result<()> {
    let mut csv = csv_writer(writer, &EDGES_HEADER)?;
    for segment in segments {
        csv.serialize(EdgeRow {
            x1: segment.from.x,
            y1: segment.from.y,
            x2: segment.to.x,
            y2: segment.to.y,
        })?;
    }
    csv.flush()?;
    Ok(())
}

impl Region {
    /// Export per-cell density to `path` in the `region.csv` format.
    pub fn export_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        write_density_csv(self, BufWriter::new(File::create(path)?))?;
        log::info!("Exported {} cells to {}", self.len(), path.display());
        Ok(())
    }

    /// Export per-cell density with grid-local coordinates to `path`.
    pub fn export_cells_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        write_cells_csv(self, BufWriter::new(File::create(path)?))?;
        log::info!("Exported {} cells to {}", self.len(), path.display());
        Ok(())
    }

    /// Export trip segments to `path` in the `region_edges.csv` format.
    pub fn export_edges_to_file<P: AsRef<Path>>(
        &self,
        path: P,
        segments: &[TripSegment],
    ) -> Result<()> {
        let path = path.as_ref();
        write_edges_csv(segments, BufWriter::new(File::create(path)?))?;
        log::info!("Exported {} edges to {}", segments.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionmap_types::GridPoint;

    fn to_string<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_density_csv_rows() {
        let mut region = Region::new(GridPoint::new(5085, 435), GridPoint::new(5086, 435)).unwrap();
        region.add_value(GridPoint::new(5086, 435), 12.5).unwrap();
        region.add_stop(GridPoint::new(5085, 435));

        let text = to_string(|buf| write_density_csv(&region, buf));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "lat,long,density,hasstop",
                "50.85,4.35,0.0,true",
                "50.86,4.35,12.5,false",
            ]
        );
    }

    #[test]
    fn test_cells_csv_uses_local_coordinates() {
        let mut region = Region::new(GridPoint::new(100, 200), GridPoint::new(101, 201)).unwrap();
        region.add_value(GridPoint::new(101, 201), 3.0).unwrap();

        let text = to_string(|buf| write_cells_csv(&region, buf));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "x,y,lat,long,density,hasstop");
        assert_eq!(lines[1], "0,0,1.0,2.0,0.0,false");
        assert_eq!(lines[4], "1,1,1.01,2.01,3.0,false");
    }

    #[test]
    fn test_edges_csv() {
        let segments = [
            TripSegment::new(GridPoint::new(5085, 435), GridPoint::new(5105, 371)),
            TripSegment::new(GridPoint::new(5105, 371), GridPoint::new(5121, 422)),
        ];
        let text = to_string(|buf| write_edges_csv(&segments, buf));
        assert_eq!(
            text,
            "x1,y1,x2,y2\n5085,435,5105,371\n5105,371,5121,422\n"
        );
    }

    #[test]
    fn test_edges_header_written_when_empty() {
        let text = to_string(|buf| write_edges_csv(&[], buf));
        assert_eq!(text, "x1,y1,x2,y2\n");
    }
}
