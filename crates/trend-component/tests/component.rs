// File: crates/trend-component/tests/component.rs
// Purpose: State machine, observers, resize, liveness and supersession of ChartHandle.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use trend_component::{
    ChartHandle, ChartState, CsvSource, DiscardReason, FileCsvSource, LoadOutcome, SeriesSource, StaticCsvSource,
};
use trend_core::{ChartConfig, ChartError, ChartResult, Role, Scene, Series, Shape, SizingMode, Viewport};

const SCENARIO_CSV: &str = "year,value,source\n2000,1.0,a\n2010,2.0,b\n2020,3.0,c\n";

fn fit_config() -> ChartConfig {
    ChartConfig { sizing: SizingMode::FitToViewport, ..ChartConfig::default() }
}

fn mount() -> ChartHandle {
    ChartHandle::mount(fit_config(), Viewport::new(500.0, 300.0)).expect("mount")
}

fn markers(scene: &Scene) -> Vec<(f64, f64)> {
    scene
        .by_role(Role::Marker)
        .filter_map(|e| match e.shape {
            Shape::Circle { cx, cy, .. } => Some((cx, cy)),
            _ => None,
        })
        .collect()
}

fn placeholder_text(scene: &Scene) -> Option<String> {
    scene.by_role(Role::Placeholder).find_map(|e| match &e.shape {
        Shape::Text { text, .. } => Some(text.clone()),
        _ => None,
    })
}

struct FailingSource;

impl SeriesSource for FailingSource {
    fn name(&self) -> String {
        "failing".to_owned()
    }

    async fn fetch_text(&self) -> ChartResult<String> {
        Err(ChartError::fetch("failing", "connection refused"))
    }
}

/// Resolves only when the test sends the body; signals when the fetch has started.
struct GatedSource {
    started: Mutex<Option<oneshot::Sender<()>>>,
    body: Mutex<Option<oneshot::Receiver<String>>>,
}

impl SeriesSource for GatedSource {
    fn name(&self) -> String {
        "gated".to_owned()
    }

    async fn fetch_text(&self) -> ChartResult<String> {
        let started = self.started.lock().expect("lock").take();
        if let Some(tx) = started {
            let _ = tx.send(());
        }
        let rx = self.body.lock().expect("lock").take();
        match rx {
            Some(rx) => rx.await.map_err(|e| ChartError::fetch("gated", e)),
            None => Err(ChartError::fetch("gated", "already consumed")),
        }
    }
}

#[tokio::test]
async fn mounts_unloaded_with_placeholder() {
    let chart = mount();
    assert_eq!(chart.state(), ChartState::Unloaded);
    let scene = chart.scene();
    assert!(scene.is_placeholder());
    assert_eq!(placeholder_text(&scene).as_deref(), Some("No data"));
}

#[tokio::test]
async fn load_transitions_to_loaded_and_notifies() {
    let chart = mount();
    let seen = Arc::new(Mutex::new(Vec::<Scene>::new()));
    let sink = Arc::clone(&seen);
    chart.subscribe(move |scene| sink.lock().expect("lock").push(scene.clone()));

    let outcome = chart.load(&StaticCsvSource::new("scenario", SCENARIO_CSV)).await.expect("load");
    assert_eq!(outcome, LoadOutcome::Committed);

    let state = chart.state();
    let series = state.series().expect("loaded");
    assert_eq!(series.len(), 3);

    let seen = seen.lock().expect("lock");
    assert_eq!(seen.len(), 1);
    assert_eq!(markers(&seen[0]), vec![(40.0, 270.0), (245.0, 140.0), (450.0, 10.0)]);
    assert_eq!(seen[0].count(Role::TrendLine), 1);
    assert_eq!(chart.scene(), seen[0]);
}

#[tokio::test]
async fn resize_recomputes_scene_but_keeps_series() {
    let chart = mount();
    chart.load(&StaticCsvSource::new("scenario", SCENARIO_CSV)).await.expect("load");
    let before_series = chart.state();
    let before = markers(&chart.scene());

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    chart.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    chart.resize(Viewport::new(1000.0, 600.0)).expect("resize");
    let after = markers(&chart.scene());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_ne!(before, after);
    assert_eq!(after[2], (950.0, 10.0));
    assert_eq!(chart.state(), before_series);
    assert_eq!(chart.viewport(), Viewport::new(1000.0, 600.0));

    // Same size again is a no-op.
    chart.resize(Viewport::new(1000.0, 600.0)).expect("resize");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn invalid_resize_is_rejected() {
    let chart = mount();
    let err = chart.resize(Viewport::new(-1.0, 300.0)).expect_err("negative width");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
    assert_eq!(chart.viewport(), Viewport::new(500.0, 300.0));
}

#[tokio::test]
async fn commit_after_unmount_is_discarded() {
    let chart = mount();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    chart.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let ticket = chart.begin_load();
    chart.unmount();
    let outcome = chart
        .commit(ticket, Ok(Series::from_pairs([(2000.0, 1.0), (2001.0, 2.0)])))
        .expect("discard is not an error");
    assert_eq!(outcome, LoadOutcome::Discarded(DiscardReason::Unmounted));
    assert_eq!(chart.state(), ChartState::Unloaded);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!chart.is_mounted());
    assert_eq!(chart.observer_count(), 0);
}

#[tokio::test]
async fn older_ticket_is_superseded() {
    let chart = mount();
    let first = chart.begin_load();
    let second = chart.begin_load();

    let newer = Series::from_pairs([(2000.0, 1.0), (2020.0, 3.0)]);
    let older = Series::from_pairs([(1990.0, 5.0), (1995.0, 6.0)]);
    assert_eq!(chart.commit(second, Ok(newer.clone())).expect("commit"), LoadOutcome::Committed);
    assert_eq!(
        chart.commit(first, Ok(older)).expect("commit"),
        LoadOutcome::Discarded(DiscardReason::Superseded)
    );
    assert_eq!(chart.state().series(), Some(&newer));
}

#[tokio::test]
async fn latest_issued_load_wins_regardless_of_resolution_order() {
    let chart = mount();
    let (started_tx, started_rx) = oneshot::channel();
    let (body_tx, body_rx) = oneshot::channel();
    let slow = Arc::new(GatedSource { started: Mutex::new(Some(started_tx)), body: Mutex::new(Some(body_rx)) });

    let slow_task = {
        let chart = chart.clone();
        let slow = Arc::clone(&slow);
        tokio::spawn(async move { chart.load(&*slow).await })
    };
    started_rx.await.expect("slow load started");

    let fast = StaticCsvSource::new("fast", SCENARIO_CSV);
    assert_eq!(chart.load(&fast).await.expect("fast load"), LoadOutcome::Committed);

    body_tx.send("year,value\n1900,9\n1901,8\n".to_owned()).expect("send body");
    let slow_outcome = slow_task.await.expect("join").expect("slow load");
    assert_eq!(slow_outcome, LoadOutcome::Discarded(DiscardReason::Superseded));

    let state = chart.state();
    let series = state.series().expect("loaded");
    assert_eq!(series.first().map(|p| p.date.as_f64()), Some(2000.0));
}

#[tokio::test]
async fn fetch_failure_enters_failed_state() {
    let chart = mount();
    let err = chart.load(&FailingSource).await.expect_err("fetch fails");
    assert!(matches!(err, ChartError::Fetch { .. }));

    match chart.state() {
        ChartState::Failed { reason } => assert!(reason.contains("connection refused"), "{reason}"),
        other => panic!("expected Failed, got {other:?}"),
    }
    let scene = chart.scene();
    assert!(scene.is_placeholder());
    assert!(placeholder_text(&scene).is_some_and(|t| t.contains("connection refused")));

    // A later success recovers.
    chart.load(&StaticCsvSource::new("scenario", SCENARIO_CSV)).await.expect("load");
    assert!(chart.state().is_loaded());
}

#[tokio::test]
async fn failure_while_loaded_keeps_series() {
    let chart = mount();
    chart.load(&StaticCsvSource::new("scenario", SCENARIO_CSV)).await.expect("load");
    let before = chart.scene();

    assert!(chart.load(&FailingSource).await.is_err());
    assert!(chart.state().is_loaded());
    assert_eq!(chart.scene(), before);
}

#[tokio::test]
async fn missing_column_is_a_parse_failure() {
    let chart = mount();
    let err = chart
        .load(&StaticCsvSource::new("bad", "date,amount\n2000,1\n"))
        .await
        .expect_err("missing columns");
    assert!(matches!(err, ChartError::Parse(_)));
    assert_eq!(chart.state().name(), "failed");
}

#[tokio::test]
async fn empty_fetch_stays_unloaded() {
    let chart = mount();
    let err = chart.load(&StaticCsvSource::new("empty", "year,value\n")).await.expect_err("empty");
    assert!(matches!(err, ChartError::DegenerateData(_)));
    assert_eq!(chart.state(), ChartState::Unloaded);
    let scene = chart.scene();
    assert!(scene.is_placeholder());
    assert_eq!(scene.count(Role::XTick), 0);
}

#[tokio::test]
async fn unsubscribed_observer_is_not_called() {
    let chart = mount();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let id = chart.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert!(chart.unsubscribe(id));
    assert!(!chart.unsubscribe(id));

    chart.load(&StaticCsvSource::new("scenario", SCENARIO_CSV)).await.expect("load");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn observer_may_read_back_from_handle() {
    let chart = mount();
    let reader = chart.clone();
    let seen_loaded = Arc::new(AtomicUsize::new(0));
    let flag = Arc::clone(&seen_loaded);
    chart.subscribe(move |_| {
        if reader.state().is_loaded() {
            flag.fetch_add(1, Ordering::SeqCst);
        }
    });
    chart.load(&StaticCsvSource::new("scenario", SCENARIO_CSV)).await.expect("load");
    assert_eq!(seen_loaded.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn file_source_reads_from_disk() {
    let path = std::env::temp_dir().join(format!("trend-component-{}.csv", std::process::id()));
    tokio::fs::write(&path, SCENARIO_CSV).await.expect("write csv");

    let chart = mount();
    let outcome = chart.load(&CsvSource::from_location(&path.display().to_string())).await.expect("load");
    assert!(outcome.is_committed());
    assert_eq!(chart.state().series().map(|s| s.len()), Some(3));
    let _ = tokio::fs::remove_file(&path).await;

    let missing = FileCsvSource::new("does/not/exist.csv");
    assert!(matches!(missing.fetch_text().await, Err(ChartError::Fetch { .. })));
}

#[test]
fn location_selects_source_kind() {
    assert!(matches!(CsvSource::from_location("https://example.com/a.csv"), CsvSource::Http(_)));
    assert!(matches!(CsvSource::from_location("HTTP://example.com/a.csv"), CsvSource::Http(_)));
    assert!(matches!(CsvSource::from_location("data/a.csv"), CsvSource::File(_)));
}

#[test]
fn mount_rejects_invalid_viewport() {
    let err = ChartHandle::mount(ChartConfig::default(), Viewport::new(0.0, 0.0)).err();
    assert!(matches!(err, Some(ChartError::InvalidViewport { .. })));
}
