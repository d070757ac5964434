//! # lexis-consolidation
//!
//! The batch half of vocabulary upkeep: corpus-wide health metrics gate a
//! consolidation pass that folds suggester-proposed near-duplicates into
//! canonical tags. Distinct from the per-item fuzzy matching the registry
//! performs at ingest time; the two converge on the same registry.

pub mod engine;
pub mod gate;
pub mod planner;

pub use engine::ConsolidationEngine;
pub use gate::{compute_metrics, GateDecision, HealthGate, TriggerReason};
pub use planner::{apply_mapping, build_mapping};
