//! Snapshot persistence (JSON).
//!
//! The document shape is `{"AutoLoaded": {unit: count}, "Since": RFC3339}`,
//! the format older collector deployments already keep on disk. Saves write a
//! sibling temp file and rename it over the target, so the snapshot on disk
//! is always either the previous one or the new one.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DeadCodeError, Result};
use crate::store::{CounterStore, StoreSnapshot};

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDoc {
    // Older collectors applied negative deltas as-is, so counts on disk may be signed.
    #[serde(rename = "AutoLoaded", default)]
    auto_loaded: HashMap<String, i64>,
    #[serde(rename = "Since")]
    since: DateTime<Utc>,
}

/// Load the store persisted at `path`.
///
/// A missing file yields a fresh store. A file that exists but does not
/// decode is `CorruptSnapshot`; the caller must not start on it.
pub fn load(path: impl AsRef<Path>) -> Result<CounterStore> {
    let path = path.as_ref();
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no snapshot found, starting empty");
            return Ok(CounterStore::new());
        }
        Err(e) => {
            return Err(DeadCodeError::Io(format!(
                "read snapshot {} failed: {e}",
                path.display()
            )))
        }
    };

    let doc: SnapshotDoc = serde_json::from_slice(&raw).map_err(|e| {
        DeadCodeError::CorruptSnapshot(format!("{}: {e}", path.display()))
    })?;
    let counts = doc
        .auto_loaded
        .into_iter()
        .map(|(unit, count)| (unit, u64::try_from(count).unwrap_or(0)))
        .collect();
    Ok(CounterStore::from_parts(counts, doc.since))
}

/// Persist the current state of `store` to `path`, replacing any previous file.
pub fn save(store: &CounterStore, path: impl AsRef<Path>) -> Result<()> {
    write_snapshot(&store.snapshot(), path.as_ref())
}

pub fn write_snapshot(snapshot: &StoreSnapshot, path: &Path) -> Result<()> {
    let doc = SnapshotDoc {
        auto_loaded: snapshot
            .counts
            .iter()
            .map(|(unit, count)| (unit.clone(), i64::try_from(*count).unwrap_or(i64::MAX)))
            .collect(),
        since: snapshot.since,
    };
    let json = serde_json::to_vec(&doc)
        .map_err(|e| DeadCodeError::Internal(format!("encode snapshot failed: {e}")))?;

    let tmp = tmp_path(path);
    fs::write(&tmp, json)
        .map_err(|e| DeadCodeError::Io(format!("write {} failed: {e}", tmp.display())))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        DeadCodeError::Io(format!("replace {} failed: {e}", path.display()))
    })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn tmp_file_sits_next_to_target() {
        assert_eq!(tmp_path(Path::new("/var/lib/dc/data.json")), Path::new("/var/lib/dc/data.json.tmp"));
        assert_eq!(tmp_path(Path::new("data.json")), Path::new("data.json.tmp"));
    }
}
