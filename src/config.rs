//! Configuration for region construction and heatmap rendering.
//!
//! Every field has a serde default so partial JSON or TOML documents load.

use regionmap_types::REGION_PADDING;
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// An RGBA color, one byte per channel.
pub type Color = [u8; 4];

/// How cells carrying a transit stop are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StopHighlight {
    /// Paint non-empty stop cells with the stop color outright
    Replace,
    /// Blend stop cells toward the stop color, `(pixel + 2 * stop) / 3`
    #[default]
    Blend,
    /// Like `Blend`, also for cells with a stop in one of their four neighbors
    BlendWithNeighbors,
}

/// Heatmap rendering options.
///
/// # Example
///
/// ```rust
/// use regionmap::{RenderConfig, StopHighlight};
///
/// let json = r#"{ "high_emphasis": 0.5, "highlight": "blend_with_neighbors" }"#;
/// let config: RenderConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.low_emphasis, 0.05);
/// assert_eq!(config.highlight, StopHighlight::BlendWithNeighbors);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Weight of `value / max` in a cell's lightness
    #[serde(default = "RenderConfig::default_low_emphasis")]
    pub low_emphasis: f64,

    /// Weight of the amount a cell exceeds the mean in its lightness
    #[serde(default = "RenderConfig::default_high_emphasis")]
    pub high_emphasis: f64,

    /// Color of empty cells
    #[serde(default = "RenderConfig::default_background")]
    pub background: Color,

    /// Color transit stops are highlighted with
    #[serde(default = "RenderConfig::default_stop_color")]
    pub stop_color: Color,

    #[serde(default)]
    pub highlight: StopHighlight,
}

impl RenderConfig {
    const fn default_low_emphasis() -> f64 {
        0.05
    }

    const fn default_high_emphasis() -> f64 {
        0.95
    }

    const fn default_background() -> Color {
        [0, 0, 0, 255]
    }

    const fn default_stop_color() -> Color {
        [100, 255, 100, 255]
    }

    pub fn with_emphasis(mut self, low: f64, high: f64) -> Self {
        self.low_emphasis = low;
        self.high_emphasis = high;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_stop_color(mut self, color: Color) -> Self {
        self.stop_color = color;
        self
    }

    pub fn with_highlight(mut self, highlight: StopHighlight) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("low_emphasis", self.low_emphasis),
            ("high_emphasis", self.high_emphasis),
        ] {
            if !value.is_finite() {
                return Err(format!("{} must be finite, got: {}", name, value));
            }
            if value < 0.0 {
                return Err(format!("{} must not be negative, got: {}", name, value));
            }
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            low_emphasis: Self::default_low_emphasis(),
            high_emphasis: Self::default_high_emphasis(),
            background: Self::default_background(),
            stop_color: Self::default_stop_color(),
            highlight: StopHighlight::default(),
        }
    }
}

/// Region configuration.
///
/// # Example
///
/// ```rust
/// use regionmap::Config;
///
/// let config = Config::from_json(r#"{ "padding": 25 }"#).unwrap();
/// assert_eq!(config.padding, 25);
/// assert!(config.warn_on_code_overwrite);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Grid units added on every side of the observed data extent
    #[serde(default = "Config::default_padding")]
    pub padding: i32,

    /// Log a warning when a code is re-registered at a different cell
    #[serde(default = "Config::default_warn_on_code_overwrite")]
    pub warn_on_code_overwrite: bool,

    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    const fn default_padding() -> i32 {
        REGION_PADDING
    }

    const fn default_warn_on_code_overwrite() -> bool {
        true
    }

    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    pub fn with_code_overwrite_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_code_overwrite = enabled;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.padding < 0 {
            return Err(format!("Padding must not be negative, got: {}", self.padding));
        }
        self.render.validate()
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            padding: Self::default_padding(),
            warn_on_code_overwrite: Self::default_warn_on_code_overwrite(),
            render: RenderConfig::default(),
        }
    }
}
