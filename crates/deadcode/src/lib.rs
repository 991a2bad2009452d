//! Top-level facade crate for the dead code collector.
//!
//! Re-exports the core primitives and the collector service so users can depend on a single crate.

pub mod core {
    pub use deadcode_core::*;
}

pub mod collector {
    pub use deadcode_collector::*;
}
