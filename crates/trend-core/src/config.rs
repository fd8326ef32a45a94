// File: crates/trend-core/src/config.rs
// Summary: Chart configuration with serde defaults and JSON loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loader::Columns;
use crate::error::{ChartError, ChartResult};
use crate::scale::DEFAULT_TICK_COUNT;
use crate::theme::{self, Theme};
use crate::types::{Margins, SizingMode};

pub const DEFAULT_SOURCE_URL: &str = "https://gist.githubusercontent.com/Mbrownshoes/7f08c0aa283d79e096091b849dd5c03d/\
raw/b7e7ff8b2df0b463ae6165a4581807211e32b479/data700.csv";
pub const DEFAULT_Y_LABEL: &str = "Anomaly (°C) - 0-700m";
pub const DEFAULT_MARKER_RADIUS: f64 = 2.5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub source_url: String,
    pub sizing: SizingMode,
    pub margins: Margins,
    pub y_label: String,
    pub date_column: String,
    pub value_column: String,
    pub tick_count: usize,
    pub marker_radius: f64,
    pub theme: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_owned(),
            sizing: SizingMode::default(),
            margins: Margins::default(),
            y_label: DEFAULT_Y_LABEL.to_owned(),
            date_column: "year".to_owned(),
            value_column: "value".to_owned(),
            tick_count: DEFAULT_TICK_COUNT,
            marker_radius: DEFAULT_MARKER_RADIUS,
            theme: "classic".to_owned(),
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(text: &str) -> ChartResult<Self> {
        let cfg: Self = serde_json::from_str(text).map_err(|e| ChartError::Config(e.to_string()))?;
        cfg.validate()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ChartError::Config(format!("reading {}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.margins.validate()?;
        if let SizingMode::Fixed { width, height } = self.sizing {
            if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
                return Err(ChartError::Config(format!("fixed canvas must be positive, got {width}x{height}")));
            }
        }
        if self.tick_count == 0 {
            return Err(ChartError::Config("tick_count must be > 0".to_owned()));
        }
        if !self.marker_radius.is_finite() || self.marker_radius <= 0.0 {
            return Err(ChartError::Config("marker_radius must be finite and > 0".to_owned()));
        }
        if self.date_column.trim().is_empty() || self.value_column.trim().is_empty() {
            return Err(ChartError::Config("column names must not be empty".to_owned()));
        }
        Ok(self)
    }

    pub fn theme(&self) -> Theme {
        theme::find(&self.theme)
    }

    pub fn columns(&self) -> Columns {
        Columns::new(&self.date_column, &self.value_column)
    }
}
