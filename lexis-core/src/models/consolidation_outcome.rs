use indexmap::IndexMap;

/// Summary of one consolidation pass.
#[derive(Debug, Clone, Default)]
pub struct ConsolidationOutcome {
    /// Raw variant -> canonical mapping built from the suggester's groups,
    /// in plan order. Applied to items by the orchestrator.
    pub mapping: IndexMap<String, String>,
    /// Groups received across all batches.
    pub groups_seen: usize,
    /// Variant merges actually recorded in the registry.
    pub merges_applied: usize,
    /// Per-batch collaborator failures, carried for reporting.
    pub batch_failures: Vec<String>,
}
