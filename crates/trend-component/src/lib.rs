// File: crates/trend-component/src/lib.rs
// Summary: Component host for the trend chart.
// Notes:
// - `ChartHandle` owns the Series, the Viewport and the current Scene; hosts
//   subscribe to scene changes instead of mutating a surface directly.
// - Sources are async; the handle itself is synchronous and never holds its
//   lock across an await point.

pub mod handle;
pub mod observer;
pub mod source;
pub mod state;

pub use handle::{ChartHandle, LoadTicket};
pub use observer::ObserverId;
pub use source::{CsvSource, FileCsvSource, HttpCsvSource, SeriesSource, StaticCsvSource};
pub use state::{ChartState, DiscardReason, LoadOutcome};
