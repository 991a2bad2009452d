//! Dead code collector.
//!
//! - UDP ingestion of `autoloaded,class=...:N|c` lines
//! - Counts persisted to a JSON snapshot every interval and on exit
//! - Operator dashboard: dead/active units, reset, remove

use std::process::ExitCode;

use deadcode_collector::app;

#[tokio::main]
async fn main() -> ExitCode {
    let path = std::env::args().nth(1);
    let cfg = match app::load_config(path.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("fatal: {e}");
            return ExitCode::FAILURE;
        }
    };

    app::init_tracing(&cfg.log);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "dead code collector starting");

    match app::run(cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = e.kind().as_str(), error = %e, "collector stopped");
            ExitCode::FAILURE
        }
    }
}
