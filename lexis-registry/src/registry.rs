//! The canonical tag registry: tags, aliases, and usage bookkeeping.
//!
//! There is no ambient registry instance. Callers construct one per run (or
//! per long-lived process), thread it explicitly, and persist it through
//! `lexis-storage`.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use lexis_core::errors::{LexisResult, RegistryError};
use lexis_core::models::TagRecord;

use crate::normalize::normalize;
use crate::similarity::find_similar;

/// The single source of truth for the known tag vocabulary.
///
/// Invariant: the alias key set and the canonical key set are disjoint, and
/// every alias points directly at a canonical key (one hop, no chains).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRegistry {
    tags: IndexMap<String, TagRecord>,
    aliases: IndexMap<String, String>,
    last_updated: DateTime<Utc>,
}

impl TagRegistry {
    /// An empty registry — the bootstrap state when no snapshot exists.
    pub fn new() -> Self {
        Self {
            tags: IndexMap::new(),
            aliases: IndexMap::new(),
            last_updated: Utc::now(),
        }
    }

    /// Canonical-tag lookup. O(1).
    pub fn lookup(&self, key: &str) -> Option<&TagRecord> {
        self.tags.get(key)
    }

    /// Follow the alias map exactly one hop; unknown keys come back as-is.
    pub fn resolve_alias<'a>(&'a self, key: &'a str) -> &'a str {
        self.aliases.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Whether a key is part of the known vocabulary, canonical or alias.
    pub fn known(&self, key: &str) -> bool {
        self.tags.contains_key(key) || self.aliases.contains_key(key)
    }

    /// Record one application of a canonical tag.
    ///
    /// Existing records get their usage bumped and category refreshed; a new
    /// key gets a fresh record with `usage_count = 1`. Empty keys are
    /// rejected — callers filter unusable normalizations first.
    pub fn record_usage(&mut self, key: &str, category: &str) -> LexisResult<&TagRecord> {
        if key.is_empty() {
            return Err(RegistryError::EmptyKey.into());
        }
        let now = Utc::now();
        self.last_updated = now;
        if let Some(record) = self.tags.get_mut(key) {
            record.usage_count += 1;
            record.category = category.to_string();
        } else {
            self.tags.insert(key.to_string(), TagRecord::new(category, now));
        }
        Ok(&self.tags[key])
    }

    /// The on-ingest path: normalize each raw tag and fold it into the
    /// vocabulary, fuzzy-matching registry misses against all canonical
    /// keys.
    ///
    /// Output preserves input order and is not deduplicated; each tag is
    /// processed independently. Unusable tags (empty after normalization)
    /// are skipped.
    pub fn process_suggested_tags(
        &mut self,
        raw_tags: &[String],
        category: &str,
        threshold: f64,
    ) -> LexisResult<Vec<String>> {
        let mut emitted = Vec::with_capacity(raw_tags.len());
        for raw in raw_tags {
            let normalized = normalize(raw);
            if normalized.is_empty() {
                debug!(%raw, "skipping tag that normalized to nothing");
                continue;
            }
            // A previously folded variant must resolve to its canonical,
            // never re-enter as a canonical key of its own.
            let key = self.resolve_alias(&normalized).to_string();
            let target = if self.tags.contains_key(&key) {
                key
            } else {
                let similar =
                    find_similar(&key, self.tags.keys().map(String::as_str), threshold);
                match similar.first() {
                    Some(best) => {
                        debug!(
                            candidate = %key,
                            matched = %best.tag,
                            score = best.score,
                            "fuzzy-matched onto existing tag"
                        );
                        best.tag.clone()
                    }
                    None => key,
                }
            };
            self.record_usage(&target, category)?;
            emitted.push(target);
        }
        Ok(emitted)
    }

    /// Fold `variant` into `canonical` as an alias.
    ///
    /// The canonical side is resolved one hop first, so merging "into" an
    /// alias lands on its target. Re-merging an existing alias to the same
    /// canonical is a no-op; pointing it elsewhere is rejected with
    /// [`RegistryError::AliasConflict`] rather than silently re-pointed.
    /// If the variant currently holds a canonical record, its usage and
    /// variants fold into the target and any aliases of the variant are
    /// re-pointed to keep resolution one-hop.
    pub fn merge(&mut self, canonical: &str, variant: &str) -> LexisResult<()> {
        if canonical.is_empty() || variant.is_empty() {
            return Err(RegistryError::EmptyKey.into());
        }
        let canonical = self.resolve_alias(canonical).to_string();
        if variant == canonical {
            return Ok(());
        }
        if let Some(existing) = self.aliases.get(variant) {
            if *existing == canonical {
                return Ok(());
            }
            return Err(RegistryError::AliasConflict {
                variant: variant.to_string(),
                existing: existing.clone(),
                requested: canonical,
            }
            .into());
        }

        if let Some(folded) = self.tags.shift_remove(variant) {
            let target = self.tags.entry(canonical.clone()).or_insert_with(|| TagRecord {
                category: folded.category.clone(),
                usage_count: 0,
                first_used: folded.first_used,
                variants: Default::default(),
            });
            target.usage_count += folded.usage_count;
            target.variants.extend(folded.variants);
            target.variants.insert(variant.to_string());
        } else if let Some(target) = self.tags.get_mut(&canonical) {
            target.variants.insert(variant.to_string());
        }

        // Aliases that pointed at the variant must now point at its target.
        for dest in self.aliases.values_mut() {
            if dest.as_str() == variant {
                *dest = canonical.clone();
            }
        }
        self.aliases.insert(variant.to_string(), canonical);
        self.last_updated = Utc::now();
        Ok(())
    }

    /// Number of canonical tags.
    pub fn unique_count(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.aliases.is_empty()
    }

    /// Canonical tag map, in insertion order.
    pub fn tags(&self) -> &IndexMap<String, TagRecord> {
        &self.tags
    }

    /// Alias map, in insertion order.
    pub fn aliases(&self) -> &IndexMap<String, String> {
        &self.aliases
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_usage_rejects_empty_key() {
        let mut registry = TagRegistry::new();
        assert!(registry.record_usage("", "tech").is_err());
    }

    #[test]
    fn record_usage_creates_then_increments() {
        let mut registry = TagRegistry::new();
        let record = registry.record_usage("rust", "tech").unwrap();
        assert_eq!(record.usage_count, 1);
        let record = registry.record_usage("rust", "programming").unwrap();
        assert_eq!(record.usage_count, 2);
        assert_eq!(record.category, "programming");
        assert_eq!(registry.unique_count(), 1);
    }

    #[test]
    fn process_keeps_distant_tags_distinct() {
        // js ↔ javascript are far apart in edit distance, so both stay
        // canonical; the repeated javascript spellings collapse.
        let mut registry = TagRegistry::new();
        let raw = vec![
            "JS".to_string(),
            "javascript".to_string(),
            "JavaScript!!".to_string(),
        ];
        let emitted = registry.process_suggested_tags(&raw, "tech", 0.8).unwrap();
        assert_eq!(emitted, vec!["js", "javascript", "javascript"]);
        assert_eq!(registry.lookup("js").unwrap().usage_count, 1);
        assert_eq!(registry.lookup("javascript").unwrap().usage_count, 2);
        assert_eq!(registry.unique_count(), 2);
    }

    #[test]
    fn process_fuzzy_matches_near_duplicates_onto_best_match() {
        let mut registry = TagRegistry::new();
        registry.record_usage("javascript", "tech").unwrap();
        let emitted = registry
            .process_suggested_tags(&["javascrpt".to_string()], "tech", 0.8)
            .unwrap();
        assert_eq!(emitted, vec!["javascript"]);
        assert_eq!(registry.lookup("javascript").unwrap().usage_count, 2);
        assert!(registry.lookup("javascrpt").is_none());
    }

    #[test]
    fn process_skips_unusable_tags() {
        let mut registry = TagRegistry::new();
        let emitted = registry
            .process_suggested_tags(&["!!!".to_string(), "rust".to_string()], "tech", 0.8)
            .unwrap();
        assert_eq!(emitted, vec!["rust"]);
    }

    #[test]
    fn process_does_not_dedupe_output() {
        let mut registry = TagRegistry::new();
        let raw = vec!["rust".to_string(), "Rust".to_string()];
        let emitted = registry.process_suggested_tags(&raw, "tech", 0.8).unwrap();
        assert_eq!(emitted, vec!["rust", "rust"]);
        assert_eq!(registry.lookup("rust").unwrap().usage_count, 2);
    }

    #[test]
    fn process_routes_known_aliases_to_their_canonical() {
        let mut registry = TagRegistry::new();
        registry.record_usage("javascript", "tech").unwrap();
        registry.merge("javascript", "js").unwrap();
        let emitted = registry
            .process_suggested_tags(&["JS".to_string()], "tech", 0.8)
            .unwrap();
        assert_eq!(emitted, vec!["javascript"]);
        // The alias never re-enters as a canonical key.
        assert!(registry.lookup("js").is_none());
    }

    #[test]
    fn merge_folds_usage_and_removes_variant_record() {
        let mut registry = TagRegistry::new();
        registry.record_usage("nodejs", "tech").unwrap();
        registry.record_usage("node-js", "tech").unwrap();
        registry.record_usage("node-js", "tech").unwrap();
        registry.merge("nodejs", "node-js").unwrap();

        let record = registry.lookup("nodejs").unwrap();
        assert_eq!(record.usage_count, 3);
        assert!(record.variants.contains("node-js"));
        assert!(registry.lookup("node-js").is_none());
        assert_eq!(registry.resolve_alias("node-js"), "nodejs");
    }

    #[test]
    fn merge_into_same_canonical_is_idempotent() {
        let mut registry = TagRegistry::new();
        registry.record_usage("nodejs", "tech").unwrap();
        registry.merge("nodejs", "node-js").unwrap();
        registry.merge("nodejs", "node-js").unwrap();
        assert_eq!(registry.aliases().len(), 1);
    }

    #[test]
    fn merge_rejects_conflicting_realias() {
        let mut registry = TagRegistry::new();
        registry.record_usage("nodejs", "tech").unwrap();
        registry.record_usage("deno", "tech").unwrap();
        registry.merge("nodejs", "node-js").unwrap();
        assert!(registry.merge("deno", "node-js").is_err());
        assert_eq!(registry.resolve_alias("node-js"), "nodejs");
    }

    #[test]
    fn merge_through_alias_lands_on_canonical() {
        let mut registry = TagRegistry::new();
        registry.record_usage("nodejs", "tech").unwrap();
        registry.merge("nodejs", "node-js").unwrap();
        // Merging "into" the alias resolves one hop to nodejs.
        registry.merge("node-js", "node").unwrap();
        assert_eq!(registry.resolve_alias("node"), "nodejs");
    }

    #[test]
    fn merge_repoints_aliases_of_folded_variant() {
        let mut registry = TagRegistry::new();
        registry.record_usage("nodejs", "tech").unwrap();
        registry.merge("nodejs", "node").unwrap();
        registry.record_usage("javascript", "tech").unwrap();
        registry.merge("javascript", "nodejs").unwrap();

        // One hop still resolves for the older alias.
        assert_eq!(registry.resolve_alias("node"), "javascript");
        assert_eq!(registry.resolve_alias("nodejs"), "javascript");
        // Alias and canonical key sets stay disjoint.
        for alias in registry.aliases().keys() {
            assert!(registry.lookup(alias).is_none());
        }
    }

    #[test]
    fn alias_and_canonical_namespaces_stay_disjoint() {
        let mut registry = TagRegistry::new();
        registry.record_usage("rust", "tech").unwrap();
        registry.record_usage("rustlang", "tech").unwrap();
        registry.merge("rust", "rustlang").unwrap();
        for alias in registry.aliases().keys() {
            assert!(
                registry.lookup(alias).is_none(),
                "alias {alias} must not be a canonical key"
            );
        }
    }
}
