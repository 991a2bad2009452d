//! Ingestion line protocol.
//!
//! Each datagram carries zero or more newline-separated lines of the form
//! `name[,key=value,...]:delta|kind`. Decoding is per line: a bad line is
//! dropped and reported, never fatal to the rest of the batch.
//!
//! - `line`: decoding received payloads into `Metric` records.
//! - `encode`: the emitting side, rendering and packing lines into datagrams.

pub mod encode;
pub mod line;

pub use line::{parse_batch, parse_line, Metric};

/// Largest datagram payload read per receive.
pub const MAX_DATAGRAM_BYTES: usize = 1024;

/// Kind token of a counter increment.
pub const COUNTER_KIND: &str = "c";

/// Metric name emitted on every autoload.
pub const AUTOLOADED_METRIC: &str = "autoloaded";

/// Tag carrying the loaded unit name.
pub const CLASS_TAG: &str = "class";

/// Namespace separator used for unit names in the store.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Separator used on the wire in place of the namespace separator.
pub const WIRE_SEPARATOR: char = '/';
