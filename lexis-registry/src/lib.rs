//! # lexis-registry
//!
//! Tag normalization, edit-distance similarity matching, and the persistent
//! registry mapping canonical tags to aliases and usage statistics.

pub mod normalize;
pub mod registry;
pub mod similarity;

pub use normalize::normalize;
pub use registry::TagRegistry;
pub use similarity::{find_similar, levenshtein, similarity, SimilarTag};
