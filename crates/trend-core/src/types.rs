// File: crates/trend-core/src/types.rs
// Summary: Shared layout types and constants (canvas size, margins, viewport, sizing mode).

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Default fixed canvas width in pixel-equivalent units.
pub const WIDTH: f64 = 400.0;
/// Default fixed canvas height in pixel-equivalent units.
pub const HEIGHT: f64 = 300.0;

/// Margins around the plot area, in pixel-equivalent units.
pub const DEFAULT_MARGINS: Margins = Margins::new(10.0, 50.0, 30.0, 40.0);

/// Plot margins.
/// Contract: all fields are finite and non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    /// Create margins in CSS order (top, right, bottom, left).
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }
    /// Total horizontal margin (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical margin (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, v) in [("top", self.top), ("right", self.right), ("bottom", self.bottom), ("left", self.left)] {
            if !v.is_finite() || v < 0.0 {
                return Err(ChartError::Config(format!("margin `{name}` must be finite and >= 0")));
            }
        }
        Ok(())
    }
}

impl Default for Margins {
    fn default() -> Self {
        DEFAULT_MARGINS
    }
}

/// Available drawing area supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ChartError::InvalidViewport { width: self.width, height: self.height })
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

/// How the scene relates to the viewport it is shown in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SizingMode {
    /// Lay out on a fixed canvas, ignoring the viewport size.
    Fixed { width: f64, height: f64 },
    /// Lay out on the viewport and let the surface fit the scene to its box.
    FitToViewport,
}

impl SizingMode {
    /// Dimensions the scales are built against.
    pub fn layout(&self, viewport: Viewport) -> Viewport {
        match *self {
            SizingMode::Fixed { width, height } => Viewport::new(width, height),
            SizingMode::FitToViewport => viewport,
        }
    }

    pub fn fit(&self) -> Fit {
        match self {
            SizingMode::Fixed { .. } => Fit::None,
            SizingMode::FitToViewport => Fit::Contain,
        }
    }
}

impl Default for SizingMode {
    fn default() -> Self {
        SizingMode::Fixed { width: WIDTH, height: HEIGHT }
    }
}

/// Scene-to-surface fitting contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fit {
    /// Scene coordinates are surface pixels.
    None,
    /// Scale uniformly to fit the hosting box, centered.
    Contain,
}
