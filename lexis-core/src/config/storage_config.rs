use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where durable state lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the registry snapshot and metrics history.
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Path of the registry snapshot file.
    pub fn registry_path(&self) -> PathBuf {
        self.data_dir.join("registry.json")
    }

    /// Path of the metrics history file.
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("metrics_history.json")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: Path::new("./data").to_path_buf(),
        }
    }
}
