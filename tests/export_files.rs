use regionmap::{DensityMode, GridPoint, HeatmapRenderer, Region, RenderConfig, TripSegment};
use std::f64::consts::PI;
use std::fs;
use tempfile::TempDir;

fn populated_region() -> Region {
    let mut region = Region::builder()
        .include(GridPoint::new(5080, 430))
        .include(GridPoint::new(5090, 440))
        .build()
        .unwrap();
    region.add_code(GridPoint::new(5085, 435), "21004").unwrap();
    region
        .spread_at_code("21004", 10_000.0, PI * 4_000.0 * 4_000.0)
        .unwrap();
    region.tag_stop(GridPoint::new(5086, 436), "8813003");
    region.tag_stop(GridPoint::new(5083, 433), "8814001");
    region
}

#[test]
fn test_export_files_have_headers_and_rows() {
    let region = populated_region();
    let dir = TempDir::new().unwrap();

    region.export_to_file(dir.path().join("region.csv")).unwrap();
    region.export_cells_to_file(dir.path().join("region_cells.csv")).unwrap();
    let legs = [region.resolve_segment("stop_8814001", "stop_8813003").unwrap()];
    region
        .export_edges_to_file(dir.path().join("region_edges.csv"), &legs)
        .unwrap();

    let density = fs::read_to_string(dir.path().join("region.csv")).unwrap();
    let mut lines = density.lines();
    assert_eq!(lines.next(), Some("lat,long,density,hasstop"));
    assert_eq!(lines.count(), region.len());

    let cells = fs::read_to_string(dir.path().join("region_cells.csv")).unwrap();
    assert!(cells.starts_with("x,y,lat,long,density,hasstop\n0,0,"));
    assert_eq!(cells.lines().count(), region.len() + 1);

    let edges = fs::read_to_string(dir.path().join("region_edges.csv")).unwrap();
    assert_eq!(edges, "x1,y1,x2,y2\n5083,433,5086,436\n");
}

#[test]
fn test_density_file_round_trip() {
    let region = populated_region();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("region.csv");
    region.export_to_file(&path).unwrap();

    let restored = Region::from_density_file(&path, DensityMode::Density).unwrap();
    assert_eq!(restored.min(), region.min());
    assert_eq!(restored.max(), region.max());
    assert_eq!(restored.stops(), region.stops());
    for (a, b) in restored.cells().iter().zip(region.cells()) {
        assert_eq!(a, b);
    }

    let presence = Region::from_density_file(&path, DensityMode::Presence).unwrap();
    assert_eq!(presence.stats().total, region.stats().nonzero as f64);
    assert_eq!(presence.stats().max, 1.0);
}

#[test]
fn test_render_from_exported_file() {
    let region = populated_region();
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("region.csv");
    let png_path = dir.path().join("region.png");
    region.export_to_file(&csv_path).unwrap();

    let restored = Region::from_density_file(&csv_path, DensityMode::Presence).unwrap();
    HeatmapRenderer::new(RenderConfig::default())
        .render_to_file(&restored, &png_path)
        .unwrap();

    let image = image::open(&png_path).unwrap().to_rgba8();
    assert_eq!(image.width() as usize, region.width());
    assert_eq!(image.height() as usize, region.height());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Region::from_density_file(dir.path().join("nope.csv"), DensityMode::Presence)
        .unwrap_err();
    assert!(matches!(err, regionmap::RegionError::Io(_)));
}

#[test]
fn test_segments_are_plain_values() {
    let leg = TripSegment::new(GridPoint::new(1, 2), GridPoint::new(3, 4));
    let dir = TempDir::new().unwrap();
    let region = Region::new(GridPoint::new(0, 0), GridPoint::new(4, 4)).unwrap();
    region
        .export_edges_to_file(dir.path().join("edges.csv"), &[leg, leg.reversed()])
        .unwrap();
    let text = fs::read_to_string(dir.path().join("edges.csv")).unwrap();
    assert_eq!(text, "x1,y1,x2,y2\n1,2,3,4\n3,4,1,2\n");
}
