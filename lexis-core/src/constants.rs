/// Lexis system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum length of a normalized tag, in characters.
pub const MAX_TAG_LENGTH: usize = 50;

/// Default similarity threshold for fuzzy tag matching.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Default batch size for suggester grouping calls.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Default vocabulary growth-rate trigger for the health gate.
pub const DEFAULT_GROWTH_THRESHOLD: f64 = 0.10;

/// Default new-tag-ratio trigger for the health gate.
pub const DEFAULT_NEW_TAG_RATIO_THRESHOLD: f64 = 0.15;

/// Default single-use-ratio trigger for the health gate.
pub const DEFAULT_SINGLE_USE_RATIO_THRESHOLD: f64 = 0.30;

/// Default usage-entropy trigger (bits) for the health gate.
pub const DEFAULT_ENTROPY_THRESHOLD: f64 = 3.0;
