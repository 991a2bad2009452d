//! Collector config loader (strict parsing).

pub mod schema;

use std::fs;

use deadcode_core::error::{DeadCodeError, Result};

pub use schema::{CollectorConfig, DashboardSection, IngestSection, LogSection, StorageSection};

pub fn load_from_file(path: &str) -> Result<CollectorConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| DeadCodeError::BadConfig(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<CollectorConfig> {
    let cfg: CollectorConfig = serde_yaml::from_str(s)
        .map_err(|e| DeadCodeError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
