// File: crates/trend-component/src/observer.rs
// Summary: Scene observer registry.

use std::sync::Arc;

use trend_core::Scene;

/// Callback invoked with the freshly rebuilt scene.
pub type Observer = Arc<dyn Fn(&Scene) + Send + Sync>;

/// Token returned by `ChartHandle::subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, Observer)>,
}

impl Observers {
    pub(crate) fn insert(&mut self, observer: Observer) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Cloned callbacks, so they can be invoked after the component lock is released.
    pub(crate) fn snapshot(&self) -> Vec<Observer> {
        self.entries.iter().map(|(_, o)| Arc::clone(o)).collect()
    }
}
