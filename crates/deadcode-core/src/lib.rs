//! Dead code collector core: wire protocol, counter store, and snapshot persistence.
//!
//! This crate defines the ingestion line protocol, the lock-guarded aggregate
//! of per-unit autoload counts, and its on-disk snapshot format. It carries no
//! network or async runtime dependencies so the collector binary, tools and
//! tests can all share it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! Malformed datagrams and corrupt snapshots surface as `DeadCodeError`
//! instead of taking the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod snapshot;
pub mod store;

/// Shared result type.
pub use error::{DeadCodeError, Result};
pub use store::{CounterStore, StoreSnapshot, Tally};
