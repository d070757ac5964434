//! Registry snapshot persistence.

use std::path::PathBuf;

use tracing::info;

use lexis_core::errors::{LexisResult, StorageError};
use lexis_registry::TagRegistry;

use crate::write_atomic;

/// Load/persist the registry at a fixed path.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Whether a prior snapshot exists on disk. The health gate treats its
    /// absence as "first run".
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the persisted registry.
    ///
    /// A missing file bootstraps an empty registry — "no history" is a
    /// valid starting state, not an error. A file that exists but fails to
    /// parse is fatal for the run; there is no safe prior state to guess.
    pub fn load(&self) -> LexisResult<TagRegistry> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no registry snapshot, bootstrapping empty");
            return Ok(TagRegistry::new());
        }
        let raw = std::fs::read_to_string(&self.path).map_err(StorageError::from)?;
        let registry = serde_json::from_str(&raw).map_err(|err| StorageError::SnapshotCorrupt {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        })?;
        Ok(registry)
    }

    /// Atomically checkpoint the registry.
    pub fn persist(&self, registry: &TagRegistry) -> LexisResult<()> {
        write_atomic(&self.path, registry)?;
        Ok(())
    }
}
