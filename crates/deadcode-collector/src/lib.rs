//! Dead code collector service library.
//!
//! This crate wires the UDP ingestion listener, the snapshot flusher and the
//! operator dashboard around one shared `CounterStore`. It is consumed by the
//! binary (`main.rs`) and by integration tests.

pub mod app;
pub mod app_state;
pub mod config;
pub mod dashboard;
pub mod flush;
pub mod ingest;
pub mod obs;
pub mod ops;
pub mod router;
pub mod shutdown;
