// File: crates/trend-core/src/error.rs
// Summary: Error taxonomy shared by the loader, scale builder, regression and renderer.

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Transport failure while retrieving the CSV resource.
    #[error("fetch failed for {source_name}: {reason}")]
    Fetch { source_name: String, reason: String },

    /// The resource could not be decoded as a series at all.
    #[error("parse error: {0}")]
    Parse(String),

    /// Too few usable points for the requested operation.
    #[error("degenerate data: {0}")]
    DegenerateData(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("render failed: {0}")]
    Render(String),
}

impl ChartError {
    pub fn fetch(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch { source_name: source_name.into(), reason: reason.to_string() }
    }

    /// True for the variants a host should present as a failed load.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Parse(_))
    }
}

impl From<csv::Error> for ChartError {
    fn from(err: csv::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
