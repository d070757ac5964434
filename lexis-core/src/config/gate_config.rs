use serde::{Deserialize, Serialize};

use crate::constants;

/// Health-gate trigger thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Vocabulary growth rate at or above which consolidation triggers.
    pub growth_threshold: f64,
    /// New-tag ratio at or above which consolidation triggers.
    pub new_tag_ratio_threshold: f64,
    /// Single-use ratio at or above which consolidation triggers.
    pub single_use_ratio_threshold: f64,
    /// Usage entropy (bits) at or below which consolidation triggers.
    pub entropy_threshold: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            growth_threshold: constants::DEFAULT_GROWTH_THRESHOLD,
            new_tag_ratio_threshold: constants::DEFAULT_NEW_TAG_RATIO_THRESHOLD,
            single_use_ratio_threshold: constants::DEFAULT_SINGLE_USE_RATIO_THRESHOLD,
            entropy_threshold: constants::DEFAULT_ENTROPY_THRESHOLD,
        }
    }
}
