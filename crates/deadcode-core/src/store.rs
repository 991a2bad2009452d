//! Counter store: unit name -> autoload count, plus the epoch start.
//!
//! A single readers-writer lock guards the map and `since` together.
//! Mutations take the write lock, reads take the read lock, and nothing
//! outside this module ever sees the live map: readers get an owned
//! `StoreSnapshot`.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

#[derive(Debug)]
struct Counters {
    counts: HashMap<String, u64>,
    since: DateTime<Utc>,
}

/// Thread-safe aggregate of autoload counts.
#[derive(Debug)]
pub struct CounterStore {
    inner: RwLock<Counters>,
}

/// Owned, read-consistent copy of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub counts: HashMap<String, u64>,
    pub since: DateTime<Utc>,
}

/// Active vs. dead unit totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub active: usize,
    pub dead: usize,
}

impl Tally {
    pub fn tracked(&self) -> usize {
        self.active + self.dead
    }
}

impl Default for CounterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterStore {
    /// Empty store whose epoch starts now.
    pub fn new() -> Self {
        Self::from_parts(HashMap::new(), Utc::now())
    }

    pub fn from_parts(counts: HashMap<String, u64>, since: DateTime<Utc>) -> Self {
        Self {
            inner: RwLock::new(Counters { counts, since }),
        }
    }

    // The guarded data is valid after every statement, so a panicked
    // holder cannot leave it half-updated; recover instead of propagating.
    fn read(&self) -> RwLockReadGuard<'_, Counters> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Counters> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add `delta` to `name`, inserting it when absent.
    ///
    /// A zero delta registers a tracked-but-unseen unit. Negative deltas
    /// saturate at zero.
    pub fn increment(&self, name: &str, delta: i64) {
        let mut g = self.write();
        if let Some(count) = g.counts.get_mut(name) {
            *count = count.saturating_add_signed(delta);
            return;
        }
        g.counts.insert(name.to_string(), 0u64.saturating_add_signed(delta));
    }

    /// Forget `name`. Absent names are a no-op.
    pub fn remove(&self, name: &str) {
        self.write().counts.remove(name);
    }

    pub fn remove_many<I, S>(&self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut g = self.write();
        names
            .into_iter()
            .filter(|n| {
                let name: &str = n.as_ref();
                g.counts.remove(name).is_some()
            })
            .count()
    }

    /// Clear every count and start a new epoch.
    pub fn reset(&self) {
        self.reset_seeded(std::iter::empty::<&str>());
    }

    /// Clear every count, start a new epoch and register `names` at zero,
    /// all under one write lock.
    pub fn reset_seeded<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let counts: HashMap<String, u64> = names
            .into_iter()
            .map(|n| (n.as_ref().to_string(), 0))
            .collect();

        let mut g = self.write();
        g.counts = counts;
        g.since = g.since.max(Utc::now());
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let g = self.read();
        StoreSnapshot {
            counts: g.counts.clone(),
            since: g.since,
        }
    }

    pub fn since(&self) -> DateTime<Utc> {
        self.read().since
    }

    pub fn count(&self, name: &str) -> Option<u64> {
        self.read().counts.get(name).copied()
    }

    pub fn tally(&self) -> Tally {
        tally_counts(&self.read().counts)
    }

    pub fn len(&self) -> usize {
        self.read().counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().counts.is_empty()
    }
}

fn tally_counts(counts: &HashMap<String, u64>) -> Tally {
    let dead = counts.values().filter(|c| **c == 0).count();
    Tally {
        active: counts.len() - dead,
        dead,
    }
}

impl StoreSnapshot {
    pub fn tally(&self) -> Tally {
        tally_counts(&self.counts)
    }

    /// Units tracked but never loaded, sorted by name.
    pub fn dead_units(&self) -> Vec<&str> {
        let mut dead: Vec<&str> = self
            .counts
            .iter()
            .filter(|(_, c)| **c == 0)
            .map(|(k, _)| k.as_str())
            .collect();
        dead.sort_unstable();
        dead
    }

    /// Loaded units, most loaded first.
    pub fn active_units(&self) -> Vec<(&str, u64)> {
        let mut active: Vec<(&str, u64)> = self
            .counts
            .iter()
            .filter(|(_, c)| **c != 0)
            .map(|(k, c)| (k.as_str(), *c))
            .collect();
        active.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        active
    }
}
