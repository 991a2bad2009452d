//! Snapshot flushing: on a fixed interval, and once more at shutdown.
//!
//! The in-memory store stays authoritative. A failed save is logged and
//! counted; the next tick retries naturally.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use deadcode_core::{snapshot, CounterStore};

use crate::obs::CollectorMetrics;

/// Save `store` to `path`, recording the outcome under `trigger`.
pub fn flush_once(
    store: &CounterStore,
    path: &Path,
    metrics: &CollectorMetrics,
    trigger: &str,
) -> bool {
    match snapshot::save(store, path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), trigger, "snapshot saved");
            metrics
                .snapshot_saves
                .inc(&[("trigger", trigger), ("result", "ok")]);
            true
        }
        Err(e) => {
            tracing::error!(path = %path.display(), trigger, error = %e, "snapshot save failed");
            metrics
                .snapshot_saves
                .inc(&[("trigger", trigger), ("result", "error")]);
            false
        }
    }
}

/// Spawn the periodic flusher. It runs until the runtime shuts down.
pub fn spawn_flusher(
    store: Arc<CounterStore>,
    path: PathBuf,
    every: Duration,
    metrics: Arc<CollectorMetrics>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately; nothing has changed yet
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let (store, path, metrics) = (Arc::clone(&store), path.clone(), Arc::clone(&metrics));
            // encoding and file I/O stay off the runtime workers
            let saved = tokio::task::spawn_blocking(move || {
                flush_once(&store, &path, &metrics, "interval")
            })
            .await;
            if let Err(e) = saved {
                tracing::error!(error = %e, "snapshot save task failed");
            }
        }
    })
}

/// Best-effort save after the shutdown signal.
pub fn final_flush(store: &CounterStore, path: &Path, metrics: &CollectorMetrics) -> bool {
    tracing::info!(path = %path.display(), "saving snapshot before exit");
    flush_once(store, path, metrics, "shutdown")
}
