use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-canonical-tag bookkeeping. Keyed by the normalized tag string in the
/// registry; one record per canonical tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    /// Last category this tag was filed under.
    pub category: String,
    /// Times this canonical tag was applied to an item. Monotonic.
    pub usage_count: u64,
    /// When the tag first entered the registry. Immutable.
    pub first_used: DateTime<Utc>,
    /// Raw alias spellings folded into this tag during consolidation.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub variants: BTreeSet<String>,
}

impl TagRecord {
    /// Create a fresh record for a newly seen tag.
    pub fn new(category: impl Into<String>, first_used: DateTime<Utc>) -> Self {
        Self {
            category: category.into(),
            usage_count: 1,
            first_used,
            variants: BTreeSet::new(),
        }
    }
}
