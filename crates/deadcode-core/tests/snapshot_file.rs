//! Snapshot load/save against the filesystem.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use deadcode_core::{snapshot, CounterStore};

#[test]
fn missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = snapshot::load(dir.path().join("data.json")).unwrap();
    assert!(store.is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let store = CounterStore::new();
    store.increment("App\\Kernel", 12);
    store.increment("App\\Unused", 0);
    snapshot::save(&store, &path).unwrap();

    let loaded = snapshot::load(&path).unwrap();
    assert_eq!(loaded.snapshot(), store.snapshot());
    assert!(!dir.path().join("data.json.tmp").exists());
}

#[test]
fn save_overwrites_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let store = CounterStore::new();
    store.increment("A", 1);
    snapshot::save(&store, &path).unwrap();
    store.reset_seeded(["B"]);
    snapshot::save(&store, &path).unwrap();

    let loaded = snapshot::load(&path).unwrap();
    assert_eq!(loaded.count("A"), None);
    assert_eq!(loaded.count("B"), Some(0));
}

#[test]
fn corrupt_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, b"{\"AutoLoaded\": [").unwrap();

    let err = snapshot::load(&path).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CORRUPT_SNAPSHOT");
    assert!(err.kind().is_fatal());
}

#[test]
fn reads_existing_collector_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(
        &path,
        r#"{"AutoLoaded":{"Foo\\Bar":3,"Foo\\Baz":0},"Since":"2019-03-01T10:00:00.123456+01:00"}"#,
    )
    .unwrap();

    let store = snapshot::load(&path).unwrap();
    assert_eq!(store.count("Foo\\Bar"), Some(3));
    assert_eq!(store.count("Foo\\Baz"), Some(0));
    assert_eq!(store.since().to_rfc3339(), "2019-03-01T09:00:00.123456+00:00");
}

#[test]
fn save_into_missing_directory_reports_io() {
    let dir = tempfile::tempdir().unwrap();
    let store = CounterStore::new();
    let err = snapshot::save(&store, dir.path().join("nope/data.json")).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "IO");
    assert!(!err.kind().is_fatal());
}

#[test]
fn negative_legacy_counts_load_as_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(
        &path,
        r#"{"AutoLoaded":{"A":-1,"B":3},"Since":"2019-03-01T10:00:00+01:00"}"#,
    )
    .unwrap();

    let store = snapshot::load(&path).unwrap();
    assert_eq!(store.count("A"), Some(0));
    assert_eq!(store.count("B"), Some(3));
    assert_eq!(store.tally().dead, 1);
}
