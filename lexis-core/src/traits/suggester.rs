use crate::errors::LexisResult;
use crate::models::{GroupProposal, TagSuggestion};

/// External tag suggester (human- or model-driven).
///
/// How candidates and groupings are generated is outside the engine; so are
/// timeouts and retries, which belong to the implementation.
pub trait ITagSuggester: Send + Sync {
    /// Suggest tags and a category for a single item.
    fn suggest_tags(&self, title: &str, existing_tags: &[String]) -> LexisResult<TagSuggestion>;

    /// Propose consolidation groups for a batch of unique tags.
    fn propose_groups(&self, tags: &[String]) -> LexisResult<GroupProposal>;

    /// Human-readable collaborator name.
    fn name(&self) -> &str;
}
