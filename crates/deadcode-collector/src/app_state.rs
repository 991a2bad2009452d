//! Shared application state for the collector.
//!
//! The counter store is created (or loaded) once at startup and handed to the
//! ingestion listener, the flusher and the HTTP handlers through this state.

use std::sync::Arc;

use deadcode_core::CounterStore;

use crate::obs::CollectorMetrics;

#[derive(Clone)]
pub struct AppState {
    store: Arc<CounterStore>,
    metrics: Arc<CollectorMetrics>,
}

impl AppState {
    pub fn new(store: Arc<CounterStore>) -> Self {
        Self {
            store,
            metrics: Arc::new(CollectorMetrics::default()),
        }
    }

    pub fn store(&self) -> Arc<CounterStore> {
        Arc::clone(&self.store)
    }

    pub fn metrics(&self) -> Arc<CollectorMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Store gauges appended to the `/metrics` output.
    pub fn metrics_gauges(&self) -> [(&'static str, u64); 3] {
        let tally = self.store.tally();
        [
            ("deadcode_units_tracked", tally.tracked() as u64),
            ("deadcode_units_active", tally.active as u64),
            ("deadcode_units_dead", tally.dead as u64),
        ]
    }
}
