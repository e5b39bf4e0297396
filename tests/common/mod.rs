//! Shared fixtures for integration tests.

#![allow(dead_code)]

use magic_button::host::{ActivationEvent, BoxMetrics, Element, Insets, MeasureError};
use magic_button::render::View;
use magic_button::ActivationHandle;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use tokio::time::Instant;

static TRACING: Once = Once::new();

/// Route engine logs to the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// In-memory element that records everything the engine does to it.
pub struct FakeElement {
    metrics: Mutex<Result<BoxMetrics, MeasureError>>,
    measures: AtomicUsize,
    views: Mutex<Vec<(Instant, View)>>,
    dispatched: Mutex<Vec<ActivationEvent>>,
    /// When set, every dispatched event is fed back into the wrapper, like a
    /// click listener attached to the element itself.
    listener: Mutex<Option<ActivationHandle<FakeElement>>>,
}

impl FakeElement {
    pub fn new() -> Self {
        Self::with_metrics(Ok(BoxMetrics {
            width: 120.0,
            height: 40.0,
            padding: Insets::symmetric(8.0, 16.0),
            color: Some("rgb(255, 255, 255)".to_string()),
        }))
    }

    pub fn with_metrics(metrics: Result<BoxMetrics, MeasureError>) -> Self {
        Self {
            metrics: Mutex::new(metrics),
            measures: AtomicUsize::new(0),
            views: Mutex::new(Vec::new()),
            dispatched: Mutex::new(Vec::new()),
            listener: Mutex::new(None),
        }
    }

    pub fn set_metrics(&self, metrics: BoxMetrics) {
        *self.metrics.lock().unwrap() = Ok(metrics);
    }

    pub fn listen(&self, handle: ActivationHandle<FakeElement>) {
        *self.listener.lock().unwrap() = Some(handle);
    }

    pub fn measure_count(&self) -> usize {
        self.measures.load(Ordering::SeqCst)
    }

    pub fn views(&self) -> Vec<(Instant, View)> {
        self.views.lock().unwrap().clone()
    }

    pub fn rendered_statuses(&self) -> Vec<magic_button::Status> {
        self.views
            .lock()
            .unwrap()
            .iter()
            .map(|(_, view)| view.status)
            .collect()
    }

    pub fn dispatched(&self) -> Vec<ActivationEvent> {
        self.dispatched.lock().unwrap().clone()
    }
}

impl Element for FakeElement {
    fn measure(&self) -> Result<BoxMetrics, MeasureError> {
        self.measures.fetch_add(1, Ordering::SeqCst);
        self.metrics.lock().unwrap().clone()
    }

    fn dispatch(&self, event: ActivationEvent) {
        self.dispatched.lock().unwrap().push(event.clone());
        let listener = self.listener.lock().unwrap().clone();
        if let Some(handle) = listener {
            handle.handle_activation(event);
        }
    }

    fn render(&self, view: &View) {
        self.views.lock().unwrap().push((Instant::now(), view.clone()));
    }
}
