// File: crates/trend-core/src/lib.rs
// Summary: Core library entry point; exports the fetch-to-scene pipeline (decode, scale, regress, draw).

pub mod axis;
pub mod chart;
pub mod config;
pub mod error;
pub mod loader;
pub mod raster;
pub mod regression;
pub mod render;
pub mod scale;
pub mod scene;
pub mod series;
pub mod svg;
pub mod telemetry;
pub mod theme;
pub mod ticks;
pub mod types;

pub use chart::Chart;
pub use config::ChartConfig;
pub use error::{ChartError, ChartResult};
pub use loader::{parse_series, Columns, Parsed};
pub use raster::RasterOptions;
pub use regression::{endpoints, RegressionLine};
pub use render::{compose_scene, placeholder, render, RenderContext};
pub use scale::{build_scales, LinearScale, ScaleTransform, Scales, TimeScale};
pub use scene::{Element, Role, Scene, Shape, Style};
pub use series::{Date, Point, Series};
pub use theme::{Color, Theme};
pub use types::{Fit, Margins, SizingMode, Viewport, DEFAULT_MARGINS};
