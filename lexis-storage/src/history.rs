//! Append-only metrics history.
//!
//! One entry per gate evaluation. Entries are immutable once appended; the
//! API exposes no mutation or removal, only extension.

use std::path::PathBuf;

use tracing::info;

use lexis_core::errors::{LexisResult, StorageError};
use lexis_core::models::MetricsSnapshot;

use crate::write_atomic;

/// The persisted sequence of health-gate evaluations.
#[derive(Debug)]
pub struct MetricsHistory {
    path: PathBuf,
    entries: Vec<MetricsSnapshot>,
}

impl MetricsHistory {
    /// Open the history file, loading any prior entries.
    ///
    /// Absence bootstraps an empty history; a present-but-unparseable file
    /// is fatal, matching the snapshot policy.
    pub fn open(path: impl Into<PathBuf>) -> LexisResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(StorageError::from)?;
            serde_json::from_str(&raw).map_err(|err| StorageError::HistoryCorrupt {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?
        } else {
            info!(path = %path.display(), "no metrics history, starting fresh");
            Vec::new()
        };
        Ok(Self { path, entries })
    }

    /// Append one evaluation and persist immediately.
    pub fn append(&mut self, snapshot: MetricsSnapshot) -> LexisResult<()> {
        self.entries.push(snapshot);
        write_atomic(&self.path, &self.entries)?;
        Ok(())
    }

    pub fn entries(&self) -> &[MetricsSnapshot] {
        &self.entries
    }

    pub fn last(&self) -> Option<&MetricsSnapshot> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
