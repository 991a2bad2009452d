//! Lightweight in-process metrics.
//!
//! Ingestion and persistence outcomes are counted here and rendered by the
//! `/metrics` handler in Prometheus text format.

pub mod metrics;

pub use metrics::{CollectorMetrics, CounterVec};
