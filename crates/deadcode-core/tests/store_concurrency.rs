//! Counter store under concurrent writers and readers.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use deadcode_core::CounterStore;

#[test]
fn concurrent_increments_sum_exactly() {
    let store = Arc::new(CounterStore::new());
    store.increment("X", 10);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..1_000 {
                    store.increment("X", if (i + t) % 2 == 0 { 1 } else { 2 });
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    // each thread adds 500 * 1 + 500 * 2
    assert_eq!(store.count("X"), Some(10 + 8 * 1_500));
}

#[test]
fn reset_is_never_observed_half_done() {
    let full: Vec<String> = (0..200).map(|i| format!("Unit{i}")).collect();
    let store = Arc::new(CounterStore::new());
    store.reset_seeded(&full);

    let done = Arc::new(AtomicBool::new(false));
    let reader = {
        let store = Arc::clone(&store);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            while !done.load(Ordering::Relaxed) {
                let snap = store.snapshot();
                match snap.counts.len() {
                    200 => {}
                    2 => assert!(snap.counts.contains_key("A") && snap.counts.contains_key("B")),
                    n => panic!("observed partial state with {n} units"),
                }
            }
        })
    };

    for _ in 0..500 {
        store.reset_seeded(["A", "B"]);
        store.reset_seeded(&full);
    }
    done.store(true, Ordering::Relaxed);
    reader.join().unwrap();
}

#[test]
fn remove_twice_matches_remove_once() {
    let store = CounterStore::new();
    store.increment("X", 3);
    store.increment("Y", 1);
    store.remove("X");
    let once = store.snapshot();
    store.remove("X");
    assert_eq!(store.snapshot(), once);
}
