//! Drives one consolidation pass: batch the vocabulary through the
//! suggester, plan the merges, fold them into the registry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use lexis_core::errors::{ConsolidationError, LexisError, LexisResult, RegistryError};
use lexis_core::models::{ConsolidationGroup, ConsolidationOutcome};
use lexis_core::traits::ITagSuggester;
use lexis_registry::{normalize, TagRegistry};

use crate::planner::build_mapping;

/// The consolidation pass engine.
///
/// Registry mutation stays serialized: the guard admits one pass at a time,
/// and the pass itself holds the registry exclusively.
pub struct ConsolidationEngine {
    /// Guard: only one consolidation can run at a time.
    is_running: Arc<AtomicBool>,
    /// Unique tags per suggester grouping call.
    batch_size: usize,
}

impl ConsolidationEngine {
    pub fn new(batch_size: usize) -> Self {
        Self {
            is_running: Arc::new(AtomicBool::new(false)),
            batch_size: batch_size.max(1),
        }
    }

    /// Check if a consolidation is currently running.
    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    /// Run one pass over the given unique tags.
    ///
    /// A failing suggester batch is reported in the outcome and the pass
    /// continues with the remaining batches. Alias conflicts from earlier
    /// runs are warned and skipped; any other registry error is fatal.
    /// The returned mapping is what the orchestrator applies to items.
    pub fn run(
        &self,
        registry: &mut TagRegistry,
        unique_tags: &[String],
        suggester: &dyn ITagSuggester,
    ) -> LexisResult<ConsolidationOutcome> {
        // Acquire the single-execution guard.
        if self
            .is_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ConsolidationError::AlreadyRunning.into());
        }

        let result = self.run_inner(registry, unique_tags, suggester);

        // Release the guard.
        self.is_running.store(false, Ordering::SeqCst);
        result
    }

    fn run_inner(
        &self,
        registry: &mut TagRegistry,
        unique_tags: &[String],
        suggester: &dyn ITagSuggester,
    ) -> LexisResult<ConsolidationOutcome> {
        let mut outcome = ConsolidationOutcome::default();
        let mut groups: Vec<ConsolidationGroup> = Vec::new();

        for batch in unique_tags.chunks(self.batch_size) {
            match suggester.propose_groups(batch) {
                Ok(proposal) => groups.extend(proposal.groups),
                Err(err) => {
                    warn!(
                        suggester = suggester.name(),
                        batch_len = batch.len(),
                        error = %err,
                        "grouping batch failed, continuing with remaining batches"
                    );
                    outcome.batch_failures.push(err.to_string());
                }
            }
        }

        outcome.groups_seen = groups.len();
        let mapping = build_mapping(&groups);

        for (variant, canonical) in &mapping {
            let canonical_key = normalize(canonical);
            let variant_key = normalize(variant);
            if canonical_key.is_empty() || variant_key.is_empty() {
                warn!(%variant, %canonical, "group member normalized to nothing, skipped");
                continue;
            }
            if canonical_key == variant_key {
                continue;
            }
            match registry.merge(&canonical_key, &variant_key) {
                Ok(()) => outcome.merges_applied += 1,
                Err(LexisError::Registry(RegistryError::AliasConflict {
                    variant,
                    existing,
                    requested,
                })) => {
                    warn!(%variant, %existing, %requested, "conflicting re-alias skipped");
                }
                Err(err) => return Err(err),
            }
        }

        outcome.mapping = mapping;
        info!(
            groups = outcome.groups_seen,
            merges = outcome.merges_applied,
            failures = outcome.batch_failures.len(),
            "consolidation pass finished"
        );
        Ok(outcome)
    }
}
