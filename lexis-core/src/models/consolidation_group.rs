use serde::{Deserialize, Serialize};

/// One proposed merge from the tag suggester: a preferred spelling plus the
/// variants that should fold into it. `canonical` is by convention one of
/// `variants` but need not be textually equal to any of them after
/// normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationGroup {
    pub canonical: String,
    pub variants: Vec<String>,
    pub reason: String,
}

/// Suggester response for one batch of unique tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupProposal {
    pub groups: Vec<ConsolidationGroup>,
    /// Tags the suggester saw no merge partner for.
    #[serde(default)]
    pub standalone: Vec<String>,
}

/// Suggester response for a single item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagSuggestion {
    pub tags: Vec<String>,
    pub category: String,
}
