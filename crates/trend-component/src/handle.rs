// File: crates/trend-component/src/handle.rs
// Summary: ChartHandle, the mounted chart: owns Series, Viewport and Scene and
// notifies observers whenever either input changes.
// Notes:
// - Every `begin_load` bumps a generation; only the latest ticket may commit.
// - Commits after `unmount` are discarded.
// - Observers are invoked after the lock is released, so they may call back
//   into the handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};
use trend_core::render::{placeholder, RenderContext, NO_DATA_MESSAGE};
use trend_core::{compose_scene, parse_series, ChartConfig, ChartError, ChartResult, Scene, Series, Viewport};

use crate::observer::{ObserverId, Observers};
use crate::source::SeriesSource;
use crate::state::{ChartState, DiscardReason, LoadOutcome};

/// Proof that a load was issued; carries the generation it was issued at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

struct Inner {
    config: ChartConfig,
    viewport: Viewport,
    state: ChartState,
    scene: Scene,
    generation: u64,
    mounted: bool,
    observers: Observers,
}

impl Inner {
    fn build_scene(&self) -> ChartResult<Scene> {
        build_scene(&self.config, self.viewport, &self.state)
    }
}

/// Scene for `state`, laid out for `viewport`.
fn build_scene(config: &ChartConfig, viewport: Viewport, state: &ChartState) -> ChartResult<Scene> {
    let ctx = RenderContext::from_config(config, viewport);
    match state {
        ChartState::Unloaded => Ok(placeholder(&ctx, NO_DATA_MESSAGE)),
        ChartState::Failed { reason } => Ok(placeholder(&ctx, reason)),
        ChartState::Loaded { series } => compose_scene(series, viewport, config),
    }
}

/// Cloneable handle to one mounted chart.
#[derive(Clone)]
pub struct ChartHandle {
    inner: Arc<Mutex<Inner>>,
}

impl ChartHandle {
    /// Mount an `Unloaded` chart showing the placeholder.
    pub fn mount(config: ChartConfig, viewport: Viewport) -> ChartResult<Self> {
        let config = config.validate()?;
        let viewport = viewport.validate()?;
        let state = ChartState::Unloaded;
        let scene = build_scene(&config, viewport, &state)?;
        let inner = Inner {
            config,
            viewport,
            state,
            scene,
            generation: 0,
            mounted: true,
            observers: Observers::default(),
        };
        info!(width = viewport.width, height = viewport.height, "chart mounted");
        Ok(Self { inner: Arc::new(Mutex::new(inner)) })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `observer`; it is called with every rebuilt scene.
    pub fn subscribe(&self, observer: impl Fn(&Scene) + Send + Sync + 'static) -> ObserverId {
        self.lock().observers.insert(Arc::new(observer))
    }

    /// Returns whether `id` was registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.lock().observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }

    /// Replace the viewport and rebuild. Ignored once unmounted.
    pub fn resize(&self, viewport: Viewport) -> ChartResult<()> {
        let viewport = viewport.validate()?;
        let mut inner = self.lock();
        if !inner.mounted {
            debug!("resize after unmount ignored");
            return Ok(());
        }
        if inner.viewport == viewport {
            return Ok(());
        }
        let previous = inner.viewport;
        inner.viewport = viewport;
        let built = inner.build_scene();
        match built {
            Ok(scene) => {
                debug!(width = viewport.width, height = viewport.height, "viewport resized");
                self.publish(inner, scene);
                Ok(())
            }
            Err(err) => {
                inner.viewport = previous;
                Err(err)
            }
        }
    }

    /// Issue a new load; any earlier ticket is superseded from here on.
    pub fn begin_load(&self) -> LoadTicket {
        let mut inner = self.lock();
        inner.generation += 1;
        debug!(generation = inner.generation, "load issued");
        LoadTicket { generation: inner.generation }
    }

    /// Apply the result of the load `ticket` was issued for.
    ///
    /// Stale or post-unmount results are reported as discarded and never
    /// touch the component. A failed or empty result is returned as `Err`
    /// after the state transition has been applied.
    pub fn commit(&self, ticket: LoadTicket, result: ChartResult<Series>) -> ChartResult<LoadOutcome> {
        let mut inner = self.lock();
        if !inner.mounted {
            debug!(generation = ticket.generation, "load resolved after unmount; discarded");
            return Ok(LoadOutcome::Discarded(DiscardReason::Unmounted));
        }
        if ticket.generation != inner.generation {
            debug!(
                generation = ticket.generation,
                latest = inner.generation,
                "load superseded; discarded"
            );
            return Ok(LoadOutcome::Discarded(DiscardReason::Superseded));
        }

        let (next, err) = match result {
            Ok(series) if !series.points().iter().any(|p| p.is_finite()) => {
                let err = ChartError::DegenerateData("loaded series has no usable points".to_owned());
                let next = match inner.state {
                    ChartState::Loaded { .. } => None,
                    _ => Some(ChartState::Unloaded),
                };
                (next, Some(err))
            }
            Ok(series) => (Some(ChartState::Loaded { series }), None),
            Err(err) => {
                let next = match inner.state {
                    ChartState::Loaded { .. } => None,
                    _ => Some(ChartState::Failed { reason: err.to_string() }),
                };
                (next, Some(err))
            }
        };

        if let Some(state) = next {
            let previous = std::mem::replace(&mut inner.state, state);
            let built = inner.build_scene();
            match built {
                Ok(scene) => {
                    info!(from = previous.name(), to = inner.state.name(), "state changed");
                    self.publish(inner, scene);
                }
                Err(build_err) => {
                    inner.state = previous;
                    return Err(build_err);
                }
            }
        } else if let Some(err) = &err {
            warn!(%err, "load failed; keeping loaded series");
        }

        match err {
            Some(err) => Err(err),
            None => Ok(LoadOutcome::Committed),
        }
    }

    /// Fetch from `source`, decode with the configured columns and commit.
    pub async fn load<S: SeriesSource>(&self, source: &S) -> ChartResult<LoadOutcome> {
        let ticket = self.begin_load();
        let columns = self.lock().config.columns();
        let name = source.name();
        debug!(source = %name, generation = ticket.generation, "fetching");
        let result = source.fetch_text().await.and_then(|text| parse_series(&text, &columns));
        let result = result.map(|parsed| {
            if parsed.skipped > 0 {
                warn!(source = %name, skipped = parsed.skipped, "rows skipped while decoding");
            }
            parsed.series
        });
        self.commit(ticket, result)
    }

    /// Detach from the host: drop observers and refuse later commits.
    pub fn unmount(&self) {
        let mut inner = self.lock();
        if inner.mounted {
            inner.mounted = false;
            inner.observers.clear();
            info!("chart unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.lock().mounted
    }

    pub fn state(&self) -> ChartState {
        self.lock().state.clone()
    }

    pub fn scene(&self) -> Scene {
        self.lock().scene.clone()
    }

    pub fn viewport(&self) -> Viewport {
        self.lock().viewport
    }

    pub fn config(&self) -> ChartConfig {
        self.lock().config.clone()
    }

    /// Store `scene`, release the lock, then notify.
    fn publish(&self, mut inner: MutexGuard<'_, Inner>, scene: Scene) {
        inner.scene = scene.clone();
        let observers = inner.observers.snapshot();
        drop(inner);
        for observer in observers {
            observer(&scene);
        }
    }
}
