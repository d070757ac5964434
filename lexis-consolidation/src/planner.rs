//! Turns suggester group proposals into a variant → canonical mapping and
//! applies it to item tag lists.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::warn;

use lexis_core::models::ConsolidationGroup;

/// Build the old-tag → canonical-tag mapping from a set of groups.
///
/// Variants textually equal to their group's canonical are not mapped. A
/// variant appearing in two groups is ambiguous suggester output; the last
/// group wins, deterministically, and the collision is surfaced so
/// operators can audit it. Idempotent over the same input.
pub fn build_mapping(groups: &[ConsolidationGroup]) -> IndexMap<String, String> {
    let mut mapping = IndexMap::new();
    for group in groups {
        for variant in &group.variants {
            if *variant == group.canonical {
                continue;
            }
            if let Some(previous) = mapping.insert(variant.clone(), group.canonical.clone()) {
                if previous != group.canonical {
                    warn!(
                        variant = %variant,
                        dropped = %previous,
                        kept = %group.canonical,
                        "variant proposed in multiple groups, last group wins"
                    );
                }
            }
        }
    }
    mapping
}

/// Rewrite one item's tag list through the mapping.
///
/// Unmapped tags pass through; the result is deduplicated keeping first
/// occurrence. `changed` is true only when the tag SET differs — an
/// order-only difference is not a change and must not be re-submitted
/// downstream.
pub fn apply_mapping(tags: &[String], mapping: &IndexMap<String, String>) -> (Vec<String>, bool) {
    let mut seen: HashSet<&str> = HashSet::with_capacity(tags.len());
    let mut result: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let mapped = mapping.get(tag).unwrap_or(tag);
        if seen.insert(mapped.as_str()) {
            result.push(mapped.clone());
        }
    }

    let before: HashSet<&str> = tags.iter().map(String::as_str).collect();
    let after: HashSet<&str> = result.iter().map(String::as_str).collect();
    let changed = before != after;
    (result, changed)
}
