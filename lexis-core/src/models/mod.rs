//! Data models shared across the workspace.

mod bookmark;
mod consolidation_group;
mod consolidation_outcome;
mod metrics_snapshot;
mod tag_record;

pub use bookmark::Bookmark;
pub use consolidation_group::{ConsolidationGroup, GroupProposal, TagSuggestion};
pub use consolidation_outcome::ConsolidationOutcome;
pub use metrics_snapshot::MetricsSnapshot;
pub use tag_record::TagRecord;
