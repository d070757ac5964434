//! # lexis-storage
//!
//! Durable state for the tag engine: the registry snapshot and the
//! append-only metrics history. Both are JSON files written with a
//! tmp-then-rename discipline so a checkpoint is atomic — a crash mid-write
//! leaves the previous state intact.

pub mod history;
pub mod snapshot;

pub use history::MetricsHistory;
pub use snapshot::SnapshotStore;

use std::path::Path;

use lexis_core::errors::StorageError;

/// Serialize `value` as pretty JSON and atomically replace `path` with it.
fn write_atomic<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
