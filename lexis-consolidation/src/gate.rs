//! Health gate: decides whether a consolidation pass should run at all.
//!
//! Evaluated once per batch cycle, before any suggester grouping call, so a
//! healthy vocabulary short-circuits the whole consolidation path. Every
//! evaluation appends one entry to the metrics history — skips are recorded
//! too, not only triggering runs.

use chrono::Utc;
use indexmap::IndexMap;
use tracing::info;

use lexis_core::config::GateConfig;
use lexis_core::errors::LexisResult;
use lexis_core::models::MetricsSnapshot;
use lexis_registry::TagRegistry;
use lexis_storage::MetricsHistory;

/// Why the gate opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    /// No prior registry snapshot exists; consolidation runs unconditionally.
    FirstRun,
    /// Vocabulary grew past the growth threshold.
    GrowthRate,
    /// Too many tags unseen by the previous registry.
    NewTagRatio,
    /// Too many tags used exactly once.
    SingleUseRatio,
    /// Usage entropy dropped low enough that leftovers are likely
    /// near-duplicates.
    LowEntropy,
}

/// The gate's verdict plus the metrics that produced it.
#[derive(Debug, Clone)]
pub struct GateDecision {
    pub should_run: bool,
    pub triggers: Vec<TriggerReason>,
    pub metrics: MetricsSnapshot,
}

/// Compute one corpus-wide metrics snapshot.
///
/// `usage` maps each unique current tag to its application count;
/// `previous` is the registry loaded from the last persisted snapshot, or
/// `None` on a true first run.
pub fn compute_metrics(
    usage: &IndexMap<String, u64>,
    previous: Option<&TagRegistry>,
) -> MetricsSnapshot {
    let unique = usage.len();
    let total_usage: u64 = usage.values().sum();
    let previous_unique = previous.map(TagRegistry::unique_count).unwrap_or(0);

    let growth_rate = if previous_unique == 0 {
        if unique > 0 {
            1.0
        } else {
            0.0
        }
    } else {
        (unique as f64 - previous_unique as f64) / previous_unique as f64
    };

    // A tag is new when the previous registry knows it neither as a
    // canonical key nor as an alias.
    let new_tags = usage
        .keys()
        .filter(|tag| previous.map_or(true, |registry| !registry.known(tag)))
        .count();
    let new_tag_ratio = if unique == 0 {
        0.0
    } else {
        new_tags as f64 / unique as f64
    };

    let single_use = usage.values().filter(|count| **count == 1).count();
    let single_use_ratio = if unique == 0 {
        0.0
    } else {
        single_use as f64 / unique as f64
    };

    let entropy = if total_usage == 0 {
        0.0
    } else {
        usage
            .values()
            .filter(|count| **count > 0)
            .map(|count| {
                let p = *count as f64 / total_usage as f64;
                -p * p.log2()
            })
            .sum()
    };

    MetricsSnapshot {
        timestamp: Utc::now(),
        previous_unique_tags: previous_unique,
        unique_tags: unique,
        total_usage,
        new_tags,
        growth_rate,
        new_tag_ratio,
        single_use_ratio,
        entropy,
    }
}

/// Threshold-driven gate over [`compute_metrics`].
pub struct HealthGate {
    config: GateConfig,
}

impl HealthGate {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// Evaluate the gate for the current corpus.
    ///
    /// The snapshot is appended to history before the verdict is returned,
    /// whatever the verdict is. Triggers OR together: enough growth,
    /// novelty, or fragmentation opens the gate, and so does entropy low
    /// enough to signal concentrated usage.
    pub fn evaluate(
        &self,
        usage: &IndexMap<String, u64>,
        previous: Option<&TagRegistry>,
        history: &mut MetricsHistory,
    ) -> LexisResult<GateDecision> {
        let metrics = compute_metrics(usage, previous);
        history.append(metrics.clone())?;

        let mut triggers = Vec::new();
        match previous {
            None => triggers.push(TriggerReason::FirstRun),
            Some(_) => {
                if metrics.growth_rate >= self.config.growth_threshold {
                    triggers.push(TriggerReason::GrowthRate);
                }
                if metrics.new_tag_ratio >= self.config.new_tag_ratio_threshold {
                    triggers.push(TriggerReason::NewTagRatio);
                }
                if metrics.single_use_ratio >= self.config.single_use_ratio_threshold {
                    triggers.push(TriggerReason::SingleUseRatio);
                }
                if metrics.entropy <= self.config.entropy_threshold {
                    triggers.push(TriggerReason::LowEntropy);
                }
            }
        }

        let should_run = !triggers.is_empty();
        info!(
            should_run,
            ?triggers,
            growth = metrics.growth_rate,
            new_ratio = metrics.new_tag_ratio,
            single_use = metrics.single_use_ratio,
            entropy = metrics.entropy,
            "health gate evaluated"
        );

        Ok(GateDecision {
            should_run,
            triggers,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage_of(pairs: &[(&str, u64)]) -> IndexMap<String, u64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn history_in(dir: &tempfile::TempDir) -> MetricsHistory {
        MetricsHistory::open(dir.path().join("metrics_history.json")).unwrap()
    }

    fn registry_with(tags: &[&str]) -> TagRegistry {
        let mut registry = TagRegistry::new();
        for tag in tags {
            registry.record_usage(tag, "tech").unwrap();
        }
        registry
    }

    #[test]
    fn empty_corpus_metrics_are_all_zero() {
        let metrics = compute_metrics(&IndexMap::new(), None);
        assert_eq!(metrics.growth_rate, 0.0);
        assert_eq!(metrics.new_tag_ratio, 0.0);
        assert_eq!(metrics.single_use_ratio, 0.0);
        assert_eq!(metrics.entropy, 0.0);
    }

    #[test]
    fn cold_start_growth_is_one() {
        let metrics = compute_metrics(&usage_of(&[("rust", 2)]), None);
        assert_eq!(metrics.growth_rate, 1.0);
        assert_eq!(metrics.new_tags, 1);
    }

    #[test]
    fn aliases_do_not_count_as_new() {
        let mut previous = registry_with(&["javascript"]);
        previous.merge("javascript", "js").unwrap();
        let metrics = compute_metrics(&usage_of(&[("js", 1), ("go", 1)]), Some(&previous));
        assert_eq!(metrics.new_tags, 1);
    }

    #[test]
    fn uniform_usage_has_log2_entropy() {
        // Four tags used equally: entropy is exactly 2 bits.
        let usage = usage_of(&[("a", 5), ("b", 5), ("c", 5), ("d", 5)]);
        let metrics = compute_metrics(&usage, None);
        assert!((metrics.entropy - 2.0).abs() < 1e-9);
    }

    #[test]
    fn first_run_always_opens_the_gate() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = history_in(&dir);
        let gate = HealthGate::new(GateConfig::default());

        let decision = gate
            .evaluate(&usage_of(&[("rust", 1)]), None, &mut history)
            .unwrap();
        assert!(decision.should_run);
        assert_eq!(decision.triggers, vec![TriggerReason::FirstRun]);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn growth_past_threshold_triggers() {
        // 100 previous unique tags, 115 now of which 20 are unseen:
        // growth 0.15 >= 0.10.
        let previous_tags: Vec<String> = (0..100).map(|i| format!("tag{i}")).collect();
        let previous =
            registry_with(&previous_tags.iter().map(String::as_str).collect::<Vec<_>>());
        let usage: IndexMap<String, u64> = (0..95)
            .map(|i| (format!("tag{i}"), 2u64))
            .chain((0..20).map(|i| (format!("fresh{i}"), 2u64)))
            .collect();

        let dir = tempfile::tempdir().unwrap();
        let mut history = history_in(&dir);
        let gate = HealthGate::new(GateConfig::default());
        let decision = gate.evaluate(&usage, Some(&previous), &mut history).unwrap();

        assert_eq!(decision.metrics.unique_tags, 115);
        assert_eq!(decision.metrics.new_tags, 20);
        assert!((decision.metrics.growth_rate - 0.15).abs() < 1e-9);
        assert!(decision.should_run);
        assert!(decision.triggers.contains(&TriggerReason::GrowthRate));
    }

    #[test]
    fn healthy_vocabulary_skips_but_still_records() {
        // Stable vocabulary, no new tags, repeated usage, high entropy:
        // every trigger stays quiet.
        let tags: Vec<String> = (0..20).map(|i| format!("tag{i}")).collect();
        let previous = registry_with(&tags.iter().map(String::as_str).collect::<Vec<_>>());
        let usage: IndexMap<String, u64> = tags.iter().map(|t| (t.clone(), 4u64)).collect();

        let dir = tempfile::tempdir().unwrap();
        let mut history = history_in(&dir);
        let gate = HealthGate::new(GateConfig::default());
        let decision = gate.evaluate(&usage, Some(&previous), &mut history).unwrap();

        assert!(!decision.should_run);
        assert!(decision.triggers.is_empty());
        // The skip is still one history entry.
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn low_entropy_alone_triggers() {
        // Usage concentrated on one tag of a stable vocabulary.
        let tags: Vec<String> = (0..20).map(|i| format!("tag{i}")).collect();
        let previous = registry_with(&tags.iter().map(String::as_str).collect::<Vec<_>>());
        let mut usage: IndexMap<String, u64> =
            tags.iter().map(|t| (t.clone(), 2u64)).collect();
        usage.insert("tag0".to_string(), 5000);

        let dir = tempfile::tempdir().unwrap();
        let mut history = history_in(&dir);
        let gate = HealthGate::new(GateConfig::default());
        let decision = gate.evaluate(&usage, Some(&previous), &mut history).unwrap();

        assert!(decision.metrics.entropy <= 3.0);
        assert!(decision.triggers.contains(&TriggerReason::LowEntropy));
        assert!(decision.should_run);
    }
}
