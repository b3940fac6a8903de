//! Run configuration and the capture domain.

use kurbo::{Point, Rect};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Maximum number of lines a session can hold (one per digit key).
pub const MAX_LINES: usize = 9;

/// Default canvas width.
pub const DEFAULT_WIDTH: f64 = 10.0;

/// Default canvas height.
pub const DEFAULT_HEIGHT: f64 = 10.0;

/// Default output path, also the fallback when the configured output cannot be written.
pub const DEFAULT_OUTPUT: &str = "coordinates.json";

/// Smallest accepted width or height.
pub const MIN_EXTENT: f64 = 1.0;

/// Configuration errors, detected before a session starts.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Canvas {axis} must be a finite number >= {}, got {value}", MIN_EXTENT)]
    InvalidExtent { axis: &'static str, value: f64 },
    #[error("Line count must be between 1 and {max}, got {0}", max = MAX_LINES)]
    InvalidLineCount(usize),
    #[error("Output file must be a JSON file: {0}")]
    OutputNotJson(PathBuf),
}

/// Fixed rectangular coordinate bounds of the capture surface.
///
/// Set once at session construction; there are no setters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    width: f64,
    height: f64,
}

impl Domain {
    /// Create a validated domain.
    pub fn new(width: f64, height: f64) -> Result<Self, ConfigError> {
        check_extent("width", width)?;
        check_extent("height", height)?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// The domain as a rectangle anchored at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Whether a point lies in `[0, width] x [0, height]` (edges included).
    pub fn contains(&self, point: Point) -> bool {
        point.x.is_finite()
            && point.y.is_finite()
            && (0.0..=self.width).contains(&point.x)
            && (0.0..=self.height).contains(&point.y)
    }

    /// The shorter side; drives the spline sampling density.
    pub fn min_extent(&self) -> f64 {
        self.width.min(self.height)
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

fn check_extent(axis: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= MIN_EXTENT {
        Ok(())
    } else {
        Err(ConfigError::InvalidExtent { axis, value })
    }
}

/// Validated configuration for one capture run.
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    pub domain: Domain,
    pub line_count: usize,
    /// Optional seed document to resume from.
    pub input: Option<PathBuf>,
    pub output: PathBuf,
}

impl CanvasConfig {
    /// Build and validate a configuration.
    pub fn new(
        width: f64,
        height: f64,
        line_count: usize,
        input: Option<PathBuf>,
        output: PathBuf,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            domain: Domain::new(width, height)?,
            line_count,
            input,
            output,
        };
        config.validate()?;
        Ok(config)
    }

    /// Re-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_extent("width", self.domain.width)?;
        check_extent("height", self.domain.height)?;
        if !(1..=MAX_LINES).contains(&self.line_count) {
            return Err(ConfigError::InvalidLineCount(self.line_count));
        }
        if !has_json_extension(&self.output) {
            return Err(ConfigError::OutputNotJson(self.output.clone()));
        }
        Ok(())
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            domain: Domain::default(),
            line_count: 1,
            input: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Case-insensitive `.json` extension check.
pub fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
