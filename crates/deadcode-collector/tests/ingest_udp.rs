//! End-to-end ingestion over a loopback UDP socket.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::UdpSocket;

use deadcode_collector::ingest::IngestListener;
use deadcode_collector::obs::CollectorMetrics;
use deadcode_core::protocol::encode::{autoload_line, pack_lines};
use deadcode_core::CounterStore;

async fn start() -> (Arc<CounterStore>, Arc<CollectorMetrics>, SocketAddr) {
    let store = Arc::new(CounterStore::new());
    let metrics = Arc::new(CollectorMetrics::default());
    let listener = IngestListener::bind(
        "127.0.0.1:0".parse().unwrap(),
        Arc::clone(&store),
        Arc::clone(&metrics),
    )
    .await
    .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(listener.run());
    (store, metrics, addr)
}

async fn wait_for(what: &str, cond: impl Fn() -> bool) {
    let waited = tokio::time::timeout(Duration::from_secs(5), async {
        while !cond() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(waited.is_ok(), "timed out waiting for {what}");
}

#[tokio::test]
async fn packed_datagrams_reach_the_store() {
    let (store, metrics, addr) = start().await;
    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();

    let lines: Vec<String> = (0..40)
        .map(|i| autoload_line(&format!("App\\Unit{i}"), 1))
        .collect();
    for payload in pack_lines(&lines, 500) {
        client.send_to(payload.as_bytes(), addr).await.unwrap();
    }

    wait_for("40 units", || store.len() == 40).await;
    assert_eq!(store.count("App\\Unit0"), Some(1));
    assert_eq!(store.count("App\\Unit39"), Some(1));
    assert!(metrics.datagrams.get(&[]) >= 2);
}

#[tokio::test]
async fn malformed_input_does_not_stop_the_listener() {
    let (store, metrics, addr) = start().await;
    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();

    client
        .send_to(b"autoloaded,class=X:1|c\nbadline\nautoloaded,class=X:2|c", addr)
        .await
        .unwrap();
    client.send_to(&[0xff, 0xfe, b'\n'], addr).await.unwrap();
    client.send_to(b"autoloaded,class=Foo/Bar:1|c\n", addr).await.unwrap();

    wait_for("Foo\\Bar", || store.count("Foo\\Bar") == Some(1)).await;
    assert_eq!(store.count("X"), Some(3));
    assert_eq!(metrics.lines.get(&[("outcome", "rejected")]), 2);
}
