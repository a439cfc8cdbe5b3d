//! Heatmap rendering of a finished region.
//!
//! One pixel per cell: pixel `(x, y)` is the cell at `min + (x, y)`. Empty
//! cells keep the background color, other cells are colored by
//! [`color::value_to_color`] against the grid's maximum and mean, and cells
//! flagged as stops are highlighted on top so transit corridors stand out.

pub mod color;

use crate::config::{Color, RenderConfig, StopHighlight};
use crate::error::Result;
use crate::region::Region;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Renders regions to RGBA images. Never mutates the region.
#[derive(Debug, Clone, Default)]
pub struct HeatmapRenderer {
    config: RenderConfig,
}

impl HeatmapRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `region` into an image of `width x height` pixels.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use regionmap::{HeatmapRenderer, Region};
    /// use regionmap_types::GridPoint;
    ///
    /// let mut region = Region::new(GridPoint::new(0, 0), GridPoint::new(3, 2))?;
    /// region.add_value(GridPoint::new(1, 1), 5.0)?;
    /// let image = HeatmapRenderer::default().render(&region);
    /// assert_eq!(image.dimensions(), (4, 3));
    /// assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
    /// assert_ne!(image.get_pixel(1, 1).0, [0, 0, 0, 255]);
    /// # Ok::<(), regionmap::RegionError>(())
    /// ```
    pub fn render(&self, region: &Region) -> RgbaImage {
        let stats = region.stats();
        let width = region.width();
        let background = self.config.background;
        let mut image =
            RgbaImage::from_pixel(width as u32, region.height() as u32, Rgba(background));

        for cell in region.iter_cells() {
            let mut pixel = if cell.value == 0.0 {
                background
            } else if cell.has_stop && self.config.highlight == StopHighlight::Replace {
                self.config.stop_color
            } else {
                color::hsla_to_rgba(color::value_to_color(
                    cell.value,
                    stats.max,
                    stats.avg,
                    self.config.low_emphasis,
                    self.config.high_emphasis,
                ))
            };

            if self.is_highlighted(region, cell.index, cell.has_stop) {
                pixel = color::blend(pixel, self.config.stop_color);
            }

            if pixel != background {
                let x = (cell.index % width) as u32;
                let y = (cell.index / width) as u32;
                image.put_pixel(x, y, Rgba(pixel));
            }
        }

        image
    }

    /// Render `region` and write it to `path`; the format follows the
    /// extension.
    pub fn render_to_file<P: AsRef<Path>>(&self, region: &Region, path: P) -> Result<()> {
        let path = path.as_ref();
        self.render(region).save(path)?;
        log::info!(
            "Saved {}x{} heatmap to {}",
            region.width(),
            region.height(),
            path.display()
        );
        Ok(())
    }

    fn is_highlighted(&self, region: &Region, index: usize, has_stop: bool) -> bool {
        match self.config.highlight {
            StopHighlight::Replace => false,
            StopHighlight::Blend => has_stop,
            StopHighlight::BlendWithNeighbors => has_stop || neighbor_has_stop(region, index),
        }
    }
}

/// Whether any of the four direct neighbors of cell `index` is a stop.
fn neighbor_has_stop(region: &Region, index: usize) -> bool {
    let width = region.width();
    let stops = region.stops();
    let column = index % width;

    (column > 0 && stops[index - 1])
        || (column + 1 < width && stops[index + 1])
        || (index >= width && stops[index - width])
        || (index + width < stops.len() && stops[index + width])
}

/// Render `region` with `config` straight to `path`.
pub fn render_to_file<P: AsRef<Path>>(
    region: &Region,
    config: &RenderConfig,
    path: P,
) -> Result<()> {
    HeatmapRenderer::new(config.clone()).render_to_file(region, path)
}

/// Pixel color of a single cell, as [`HeatmapRenderer::render`] would paint
/// it without stop highlighting.
pub fn cell_color(value: f64, max_value: f64, avg_value: f64, config: &RenderConfig) -> Color {
    if value == 0.0 {
        return config.background;
    }
    color::hsla_to_rgba(color::value_to_color(
        value,
        max_value,
        avg_value,
        config.low_emphasis,
        config.high_emphasis,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionmap_types::GridPoint;

    fn sample_region() -> Region {
        let mut region = Region::new(GridPoint::new(0, 0), GridPoint::new(4, 2)).unwrap();
        region.add_value(GridPoint::new(1, 1), 0.2).unwrap();
        region.add_value(GridPoint::new(2, 1), 0.8).unwrap();
        region.add_value(GridPoint::new(3, 1), 1.6).unwrap();
        region
    }

    #[test]
    fn test_dimensions_match_region() {
        let region = sample_region();
        let image = HeatmapRenderer::default().render(&region);
        assert_eq!(image.dimensions(), (5, 3));
    }

    #[test]
    fn test_background_for_empty_cells() {
        let region = sample_region();
        let config = RenderConfig::default().with_background([9, 9, 9, 255]);
        let image = HeatmapRenderer::new(config).render(&region);
        assert_eq!(image.get_pixel(0, 0).0, [9, 9, 9, 255]);
        assert_eq!(image.get_pixel(4, 2).0, [9, 9, 9, 255]);
    }

    #[test]
    fn test_brighter_cells_for_larger_values() {
        let region = sample_region();
        let image = HeatmapRenderer::default().render(&region);
        let brightness = |x, y| {
            let p = image.get_pixel(x, y).0;
            p[0] as u32 + p[1] as u32 + p[2] as u32
        };
        assert!(brightness(2, 1) >= brightness(1, 1));
        assert!(brightness(3, 1) >= brightness(2, 1));
    }

    #[test]
    fn test_pixel_matches_cell_color() {
        let region = sample_region();
        let stats = region.stats();
        let config = RenderConfig::default();
        let image = HeatmapRenderer::new(config.clone()).render(&region);
        assert_eq!(
            image.get_pixel(2, 1).0,
            cell_color(0.8, stats.max, stats.avg, &config)
        );
    }

    #[test]
    fn test_replace_highlight() {
        let mut region = sample_region();
        region.add_stop(GridPoint::new(2, 1));
        region.add_stop(GridPoint::new(0, 0));
        let config = RenderConfig::default().with_highlight(StopHighlight::Replace);
        let image = HeatmapRenderer::new(config).render(&region);
        assert_eq!(image.get_pixel(2, 1).0, [100, 255, 100, 255]);
        // empty stop cells stay background
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_blend_highlight() {
        let mut region = sample_region();
        region.add_stop(GridPoint::new(0, 0));
        region.add_stop(GridPoint::new(2, 1));
        let stats = region.stats();
        let config = RenderConfig::default();
        let image = HeatmapRenderer::new(config.clone()).render(&region);

        assert_eq!(image.get_pixel(0, 0).0, [66, 170, 66, 255]);
        let base = cell_color(0.8, stats.max, stats.avg, &config);
        assert_eq!(image.get_pixel(2, 1).0, color::blend(base, config.stop_color));
        // neighbors untouched in plain blend mode
        assert_eq!(image.get_pixel(1, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_blend_with_neighbors() {
        let mut region = Region::new(GridPoint::new(0, 0), GridPoint::new(2, 2)).unwrap();
        region.add_stop(GridPoint::new(1, 1));
        let config = RenderConfig::default().with_highlight(StopHighlight::BlendWithNeighbors);
        let image = HeatmapRenderer::new(config).render(&region);

        let lit = [66, 170, 66, 255];
        let dark = [0, 0, 0, 255];
        assert_eq!(image.get_pixel(1, 1).0, lit);
        for (x, y) in [(0, 1), (2, 1), (1, 0), (1, 2)] {
            assert_eq!(image.get_pixel(x, y).0, lit, "neighbor ({}, {})", x, y);
        }
        for (x, y) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
            assert_eq!(image.get_pixel(x, y).0, dark, "diagonal ({}, {})", x, y);
        }
    }

    #[test]
    fn test_neighbors_do_not_wrap_rows() {
        let mut region = Region::new(GridPoint::new(0, 0), GridPoint::new(2, 1)).unwrap();
        // last cell of row 0; index + 1 is the first cell of row 1
        region.add_stop(GridPoint::new(2, 0));
        assert!(!neighbor_has_stop(&region, 3));
        assert!(neighbor_has_stop(&region, 1));
        assert!(neighbor_has_stop(&region, 5));
    }

    #[test]
    fn test_render_to_file_writes_png() {
        let region = sample_region();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("region.png");
        render_to_file(&region, &RenderConfig::default(), &path).unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (5, 3));
    }
}
