// File: crates/trend-component/src/state.rs
// Summary: Component load states and the outcome of committing a load.

use trend_core::Series;

/// Where the component is in its load lifecycle.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ChartState {
    /// No Series yet; the scene is the "No data" placeholder.
    #[default]
    Unloaded,
    /// A Series is present and the full pipeline runs on every change.
    Loaded { series: Series },
    /// The last load failed before any Series arrived.
    Failed { reason: String },
}

impl ChartState {
    pub fn series(&self) -> Option<&Series> {
        match self {
            ChartState::Loaded { series } => Some(series),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ChartState::Loaded { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChartState::Unloaded => "unloaded",
            ChartState::Loaded { .. } => "loaded",
            ChartState::Failed { .. } => "failed",
        }
    }
}

/// Why a resolved load was dropped instead of applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscardReason {
    /// The component was unmounted before the load resolved.
    Unmounted,
    /// A newer load was issued after this one.
    Superseded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result was applied to the component.
    Committed,
    Discarded(DiscardReason),
}

impl LoadOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, LoadOutcome::Committed)
    }
}
