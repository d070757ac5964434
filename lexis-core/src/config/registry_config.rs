use serde::{Deserialize, Serialize};

use crate::constants;

/// Registry subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Similarity threshold for on-ingest fuzzy matching.
    pub similarity_threshold: f64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: constants::DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}
