use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use deadcode_core::error::{DeadCodeError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorConfig {
    pub version: u32,

    #[serde(default)]
    pub collector: IngestSection,

    #[serde(default)]
    pub dashboard: DashboardSection,

    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub log: LogSection,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            version: 1,
            collector: IngestSection::default(),
            dashboard: DashboardSection::default(),
            storage: StorageSection::default(),
            log: LogSection::default(),
        }
    }
}

impl CollectorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(DeadCodeError::BadConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.collector.listen_addr()?;
        self.dashboard.listen_addr()?;
        self.storage.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestSection {
    /// UDP address the ingestion listener binds.
    #[serde(default = "default_ingest_listen")]
    pub listen: String,
}

impl Default for IngestSection {
    fn default() -> Self {
        Self {
            listen: default_ingest_listen(),
        }
    }
}

impl IngestSection {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        parse_addr("collector.listen", &self.listen)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardSection {
    #[serde(default = "default_dashboard_listen")]
    pub listen: String,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            listen: default_dashboard_listen(),
        }
    }
}

impl DashboardSection {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        parse_addr("dashboard.listen", &self.listen)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    #[serde(default = "default_storage_path")]
    pub path: String,

    #[serde(default = "default_save_interval_ms")]
    pub save_interval_ms: u64,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            save_interval_ms: default_save_interval_ms(),
        }
    }
}

impl StorageSection {
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(DeadCodeError::BadConfig("storage.path must not be empty".into()));
        }
        if !(1000..=3_600_000).contains(&self.save_interval_ms) {
            return Err(DeadCodeError::BadConfig(
                "storage.save_interval_ms must be between 1000 and 3600000".into(),
            ));
        }
        Ok(())
    }

    pub fn save_interval(&self) -> Duration {
        Duration::from_millis(self.save_interval_ms)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// Default to `debug` instead of `info` when `RUST_LOG` is unset.
    #[serde(default)]
    pub verbose: bool,
}

impl LogSection {
    pub fn default_directive(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

fn parse_addr(field: &str, s: &str) -> Result<SocketAddr> {
    s.parse()
        .map_err(|e| DeadCodeError::BadConfig(format!("{field} must be a valid SocketAddr ({s:?}): {e}")))
}

fn default_ingest_listen() -> String {
    "0.0.0.0:8125".into()
}
fn default_dashboard_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_storage_path() -> String {
    "data.json".into()
}
fn default_save_interval_ms() -> u64 {
    10_000
}
