//! UDP ingestion listener.
//!
//! One socket, one loop, running for the process lifetime:
//! datagram -> lossy UTF-8 -> `parse_batch` -> `CounterStore::increment`.
//! Neither receive errors nor bad lines stop the loop.

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::BytesMut;
use tokio::net::UdpSocket;

use deadcode_core::error::{DeadCodeError, Result};
use deadcode_core::protocol::{parse_batch, MAX_DATAGRAM_BYTES};
use deadcode_core::CounterStore;

use crate::obs::CollectorMetrics;

/// Outcome of applying one payload to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Applied {
    /// Lines that incremented a unit.
    pub recorded: usize,
    /// Well-formed lines of a metric or kind the collector does not consume.
    pub ignored: usize,
    /// Non-blank lines that failed to parse.
    pub rejected: usize,
}

/// Parse `payload` and apply every autoload counter it carries to `store`.
pub fn apply_payload(store: &CounterStore, payload: &str) -> Applied {
    let metrics = parse_batch(payload);
    let non_blank = payload.split('\n').filter(|l| !l.trim().is_empty()).count();

    let mut applied = Applied {
        rejected: non_blank.saturating_sub(metrics.len()),
        ..Applied::default()
    };
    for metric in &metrics {
        match metric.autoloaded_unit() {
            Some(unit) => {
                store.increment(&unit, metric.delta);
                applied.recorded += 1;
            }
            None => {
                tracing::trace!(name = %metric.name, kind = %metric.kind, "ignoring metric");
                applied.ignored += 1;
            }
        }
    }
    applied
}

pub struct IngestListener {
    socket: UdpSocket,
    store: Arc<CounterStore>,
    metrics: Arc<CollectorMetrics>,
}

impl IngestListener {
    /// Bind the ingestion socket. Failure here is fatal for the process.
    pub async fn bind(
        addr: SocketAddr,
        store: Arc<CounterStore>,
        metrics: Arc<CollectorMetrics>,
    ) -> Result<Self> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|e| DeadCodeError::Io(format!("bind udp {addr} failed: {e}")))?;
        Ok(Self {
            socket,
            store,
            metrics,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Receive loop. Never returns under normal operation.
    pub async fn run(self) {
        let mut buf = BytesMut::with_capacity(MAX_DATAGRAM_BYTES);
        loop {
            buf.clear();
            let peer = match self.socket.recv_buf_from(&mut buf).await {
                Ok((_, peer)) => peer,
                Err(e) => {
                    tracing::warn!(error = %e, "udp receive failed");
                    self.metrics.recv_errors.inc(&[]);
                    continue;
                }
            };
            self.metrics.datagrams.inc(&[]);

            let payload = String::from_utf8_lossy(&buf);
            let applied = apply_payload(&self.store, &payload);
            tracing::debug!(
                %peer,
                bytes = buf.len(),
                recorded = applied.recorded,
                ignored = applied.ignored,
                rejected = applied.rejected,
                "datagram applied"
            );

            let lines = &self.metrics.lines;
            lines.add(&[("outcome", "recorded")], applied.recorded as u64);
            lines.add(&[("outcome", "ignored")], applied.ignored as u64);
            lines.add(&[("outcome", "rejected")], applied.rejected as u64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_class_separators() {
        let store = CounterStore::new();
        let applied = apply_payload(&store, "autoloaded,class=Foo/Bar:1|c");
        assert_eq!(applied.recorded, 1);
        assert_eq!(store.count("Foo\\Bar"), Some(1));
    }

    #[test]
    fn bad_line_does_not_halt_batch() {
        let store = CounterStore::new();
        let applied = apply_payload(&store, "autoloaded,class=X:1|c\nbadline\nautoloaded,class=X:2|c");
        assert_eq!(store.count("X"), Some(3));
        assert_eq!(applied, Applied { recorded: 2, ignored: 0, rejected: 1 });
    }

    #[test]
    fn other_kinds_and_metrics_are_ignored() {
        let store = CounterStore::new();
        let applied = apply_payload(
            &store,
            "autoloaded,class=X:5|g\nrequests:1|c\nautoloaded,class=Y:1|ms\nautoloaded:1|c\n",
        );
        assert!(store.is_empty());
        assert_eq!(applied, Applied { recorded: 0, ignored: 4, rejected: 0 });
    }
}
