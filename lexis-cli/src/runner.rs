//! The sync runner: one sequential pass over the bookmark corpus.
//!
//! Registry mutation is strictly serialized — each item is normalized,
//! matched, recorded, and checkpointed before the next begins. Only the
//! collaborator I/O could overlap safely, and these clients don't bother:
//! the corpus is small and the ordering guarantees are worth more.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{info, warn};

use lexis_consolidation::{apply_mapping, ConsolidationEngine, GateDecision, HealthGate};
use lexis_core::config::LexisConfig;
use lexis_core::errors::LexisResult;
use lexis_core::models::{Bookmark, ConsolidationOutcome};
use lexis_core::traits::{IBookmarkStore, ITagSuggester};
use lexis_registry::{normalize, TagRegistry};
use lexis_storage::{MetricsHistory, SnapshotStore};

/// What one sync cycle did.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub items_seen: usize,
    pub items_classified: usize,
    pub items_updated: usize,
    pub item_failures: Vec<String>,
    /// None when the run ended before the gate (e.g. fetch failure).
    pub gate_opened: Option<bool>,
    pub consolidation: Option<ConsolidationOutcome>,
}

/// Orchestrates collaborators, registry, gate, and engine for one run.
pub struct SyncRunner {
    config: LexisConfig,
}

impl SyncRunner {
    pub fn new(config: LexisConfig) -> Self {
        Self { config }
    }

    /// Full cycle: classify every item, evaluate the health gate once, and
    /// consolidate when it opens.
    ///
    /// Per-item collaborator failures are reported and skipped; the run
    /// continues with the remaining items.
    pub fn sync(
        &self,
        store: &dyn IBookmarkStore,
        suggester: &dyn ITagSuggester,
    ) -> LexisResult<SyncReport> {
        let snapshot = SnapshotStore::new(self.config.storage.registry_path());
        let mut history = MetricsHistory::open(self.config.storage.history_path())?;
        let had_snapshot = snapshot.exists();
        let mut registry = snapshot.load()?;
        // The pre-run vocabulary is what gate metrics compare against.
        let previous = registry.clone();

        let mut items = store.fetch_all()?;
        let mut report = SyncReport {
            items_seen: items.len(),
            ..Default::default()
        };

        for item in &mut items {
            if let Err(err) =
                self.classify_item(&mut registry, item, store, suggester, &snapshot, &mut report)
            {
                warn!(item = %item.id, error = %err, "item classification failed, continuing");
                report.item_failures.push(format!("{}: {err}", item.id));
            }
        }

        // One gate evaluation per run, before any grouping call.
        let usage = corpus_usage(&registry, &items);
        let gate = HealthGate::new(self.config.gate.clone());
        let decision = gate.evaluate(&usage, had_snapshot.then_some(&previous), &mut history)?;
        report.gate_opened = Some(decision.should_run);

        if decision.should_run {
            let unique: Vec<String> = usage.keys().cloned().collect();
            let engine = ConsolidationEngine::new(self.config.sync.batch_size);
            let outcome = engine.run(&mut registry, &unique, suggester)?;
            let (updated, failures) = rewrite_items(store, &mut items, &outcome.mapping);
            report.items_updated += updated;
            report.item_failures.extend(failures);
            report.consolidation = Some(outcome);
        }

        snapshot.persist(&registry)?;
        info!(
            items = report.items_seen,
            classified = report.items_classified,
            updated = report.items_updated,
            failures = report.item_failures.len(),
            consolidated = report.consolidation.is_some(),
            "sync cycle finished"
        );
        Ok(report)
    }

    /// Evaluate the health gate without mutating anything but the history.
    pub fn gate(&self, store: &dyn IBookmarkStore) -> LexisResult<GateDecision> {
        let snapshot = SnapshotStore::new(self.config.storage.registry_path());
        let mut history = MetricsHistory::open(self.config.storage.history_path())?;
        let had_snapshot = snapshot.exists();
        let registry = snapshot.load()?;
        let items = store.fetch_all()?;
        let usage = corpus_usage(&registry, &items);
        HealthGate::new(self.config.gate.clone()).evaluate(
            &usage,
            had_snapshot.then_some(&registry),
            &mut history,
        )
    }

    /// Force a consolidation pass, bypassing the gate.
    pub fn consolidate(
        &self,
        store: &dyn IBookmarkStore,
        suggester: &dyn ITagSuggester,
    ) -> LexisResult<ConsolidationOutcome> {
        let snapshot = SnapshotStore::new(self.config.storage.registry_path());
        let mut registry = snapshot.load()?;
        let mut items = store.fetch_all()?;
        let usage = corpus_usage(&registry, &items);
        let unique: Vec<String> = usage.keys().cloned().collect();

        let engine = ConsolidationEngine::new(self.config.sync.batch_size);
        let outcome = engine.run(&mut registry, &unique, suggester)?;
        let (updated, failures) = rewrite_items(store, &mut items, &outcome.mapping);
        if !failures.is_empty() {
            warn!(failed = failures.len(), "some item rewrites failed");
        }
        info!(updated, "consolidation rewrote items");
        snapshot.persist(&registry)?;
        Ok(outcome)
    }

    /// Classify a single item: suggest, canonicalize, write back when the
    /// tag set changed, checkpoint the registry.
    fn classify_item(
        &self,
        registry: &mut TagRegistry,
        item: &mut Bookmark,
        store: &dyn IBookmarkStore,
        suggester: &dyn ITagSuggester,
        snapshot: &SnapshotStore,
        report: &mut SyncReport,
    ) -> LexisResult<()> {
        let suggestion = suggester.suggest_tags(&item.title, &item.tags)?;
        let emitted = registry.process_suggested_tags(
            &suggestion.tags,
            &suggestion.category,
            self.config.registry.similarity_threshold,
        )?;
        let canonical = dedupe(emitted);
        report.items_classified += 1;

        let before: HashSet<&str> = item.tags.iter().map(String::as_str).collect();
        let after: HashSet<&str> = canonical.iter().map(String::as_str).collect();
        if before != after {
            store.set_tags(&item.id, &canonical)?;
            report.items_updated += 1;
        }
        item.tags = canonical;

        // Checkpoint after every item so a cancelled run loses at most one.
        snapshot.persist(registry)?;
        Ok(())
    }
}

/// Usage counts over the current corpus, keyed by canonical normalized tag.
fn corpus_usage(registry: &TagRegistry, items: &[Bookmark]) -> IndexMap<String, u64> {
    let mut usage: IndexMap<String, u64> = IndexMap::new();
    for item in items {
        for raw in &item.tags {
            let normalized = normalize(raw);
            if normalized.is_empty() {
                continue;
            }
            let key = registry.resolve_alias(&normalized).to_string();
            *usage.entry(key).or_insert(0) += 1;
        }
    }
    usage
}

/// Rewrite item tag lists through the (normalized) consolidation mapping,
/// submitting only items whose tag set actually changed.
fn rewrite_items(
    store: &dyn IBookmarkStore,
    items: &mut [Bookmark],
    mapping: &IndexMap<String, String>,
) -> (usize, Vec<String>) {
    let mut rewrite: IndexMap<String, String> = IndexMap::new();
    for (variant, canonical) in mapping {
        let variant = normalize(variant);
        let canonical = normalize(canonical);
        if variant.is_empty() || canonical.is_empty() || variant == canonical {
            continue;
        }
        rewrite.insert(variant, canonical);
    }

    let mut updated = 0;
    let mut failures = Vec::new();
    for item in items {
        let (new_tags, changed) = apply_mapping(&item.tags, &rewrite);
        if !changed {
            continue;
        }
        match store.set_tags(&item.id, &new_tags) {
            Ok(()) => {
                item.tags = new_tags;
                updated += 1;
            }
            Err(err) => {
                warn!(item = %item.id, error = %err, "tag rewrite failed, continuing");
                failures.push(format!("{}: {err}", item.id));
            }
        }
    }
    (updated, failures)
}

fn dedupe(tags: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(tags.len());
    tags.into_iter().filter(|tag| seen.insert(tag.clone())).collect()
}
