//! Value-to-color mapping for the heatmap.
//!
//! Cell values become HSL colors whose lightness blends the value relative
//! to the maximum with how far the value sits above the mean; the HSL color
//! is then converted to RGB with the usual piecewise hue ramp.

use crate::config::Color;

/// A color in hue/saturation/lightness/alpha form, every channel in `[0, 1]`
/// for displayable colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

/// Map a cell value to a color given the grid's maximum and mean.
///
/// `low_emphasis` weights `value / max_value`, `high_emphasis` weights the
/// amount `value` exceeds `avg_value`. Hue stays at 1 up to the maximum.
///
/// # Examples
///
/// ```rust
/// use regionmap::render::color::value_to_color;
///
/// let dim = value_to_color(2.0, 10.0, 1.0, 0.05, 0.95);
/// let bright = value_to_color(8.0, 10.0, 1.0, 0.05, 0.95);
/// assert!(bright.l > dim.l);
/// assert_eq!(bright.h, 1.0);
/// ```
pub fn value_to_color(
    value: f64,
    max_value: f64,
    avg_value: f64,
    low_emphasis: f64,
    high_emphasis: f64,
) -> Hsla {
    let relative = if max_value > 0.0 { value / max_value } else { 0.0 };
    Hsla {
        h: 1.0 - (value - max_value).max(0.0),
        s: 1.0,
        l: relative * low_emphasis + (value - avg_value).max(0.0) * high_emphasis,
        a: 1.0,
    }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn to_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert an HSL color to RGBA bytes; channels saturate at 0 and 255.
///
/// # Examples
///
/// ```rust
/// use regionmap::render::color::{Hsla, hsla_to_rgba};
///
/// let red = Hsla { h: 1.0, s: 1.0, l: 0.5, a: 1.0 };
/// assert_eq!(hsla_to_rgba(red), [255, 0, 0, 255]);
/// ```
pub fn hsla_to_rgba(color: Hsla) -> Color {
    let Hsla { h, s, l, a } = color;
    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    };
    [to_channel(r), to_channel(g), to_channel(b), to_channel(a)]
}

/// Pull `pixel` toward `highlight`, weighting the highlight twice.
pub fn blend(pixel: Color, highlight: Color) -> Color {
    let mut out = [0u8; 4];
    for (channel, (p, h)) in out.iter_mut().zip(pixel.iter().zip(highlight.iter())) {
        *channel = ((*p as u16 + 2 * *h as u16) / 3) as u8;
    }
    out
}
