use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point-in-time capture of vocabulary health, one per gate evaluation.
///
/// Entries are appended to the metrics history and never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// When this evaluation ran.
    pub timestamp: DateTime<Utc>,
    /// Unique canonical tags in the previous registry snapshot.
    pub previous_unique_tags: usize,
    /// Unique tags in the current corpus.
    pub unique_tags: usize,
    /// Total tag applications across the current corpus.
    pub total_usage: u64,
    /// Tags absent from both the previous canonical and alias sets.
    pub new_tags: usize,
    /// (unique - previous_unique) / previous_unique; 1.0 from a cold start.
    pub growth_rate: f64,
    /// new_tags / unique_tags.
    pub new_tag_ratio: f64,
    /// Tags used exactly once / unique_tags.
    pub single_use_ratio: f64,
    /// Shannon entropy of the usage distribution, in bits.
    pub entropy: f64,
}
