//! Process lifecycle: load, serve, flush on exit.

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use deadcode_core::error::{DeadCodeError, Result};
use deadcode_core::snapshot;

use crate::app_state::AppState;
use crate::config::{CollectorConfig, LogSection};
use crate::ingest::IngestListener;
use crate::{flush, router, shutdown};

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "deadcode.yaml";

/// Resolve the config: an explicit path must exist, the default one may not.
pub fn load_config(path: Option<&str>) -> Result<CollectorConfig> {
    match path {
        Some(p) => crate::config::load_from_file(p),
        None if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() => {
            crate::config::load_from_file(DEFAULT_CONFIG_PATH)
        }
        None => Ok(CollectorConfig::default()),
    }
}

/// `RUST_LOG` wins; otherwise `log.verbose` picks the level.
pub fn init_tracing(log: &LogSection) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log.default_directive()));
    fmt().with_env_filter(filter).init();
}

/// Run the collector until a shutdown signal arrives.
pub async fn run(cfg: CollectorConfig) -> Result<()> {
    let ingest_addr = cfg.collector.listen_addr()?;
    let dashboard_addr = cfg.dashboard.listen_addr()?;
    let storage_path = PathBuf::from(&cfg.storage.path);
    let save_interval = cfg.storage.save_interval();

    let store = Arc::new(snapshot::load(&storage_path)?);
    let tally = store.tally();
    tracing::info!(
        tracked = tally.tracked(),
        dead = tally.dead,
        active = tally.active,
        since = %store.since(),
        "store loaded"
    );

    let state = AppState::new(Arc::clone(&store));

    let listener = IngestListener::bind(ingest_addr, Arc::clone(&store), state.metrics()).await?;
    tracing::info!(addr = %listener.local_addr()?, "ingestion listener bound");
    tokio::spawn(listener.run());

    flush::spawn_flusher(
        Arc::clone(&store),
        storage_path.clone(),
        save_interval,
        state.metrics(),
    );

    let http = tokio::net::TcpListener::bind(dashboard_addr)
        .await
        .map_err(|e| DeadCodeError::Io(format!("bind http {dashboard_addr} failed: {e}")))?;
    tracing::info!(addr = %dashboard_addr, "dashboard listening");

    let metrics = state.metrics();
    let app = router::build_router(state);
    let served = axum::serve(http, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await
        .map_err(|e| DeadCodeError::Io(format!("dashboard server failed: {e}")));

    flush::final_flush(&store, &storage_path, &metrics);
    served
}
