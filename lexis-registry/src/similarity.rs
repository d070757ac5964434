//! Edit-distance similarity between normalized tag keys.
//!
//! A linear scan over all canonical keys per lookup; fine at vocabulary
//! scale (hundreds of tags). A bucketed index could replace it at larger
//! scale as long as best-match selection and tie order stay identical.

use std::cmp::Ordering;

/// Classic single-character insert/delete/substitute distance.
///
/// Two-row dynamic programming over the shorter string, so space is
/// O(min(|a|, |b|)) and time O(|a|·|b|).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let (short, long) = if a_chars.len() <= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };

    let n = short.len();
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr: Vec<usize> = vec![0; n + 1];

    for (i, c) in long.iter().enumerate() {
        curr[0] = i + 1;
        for j in 1..=n {
            let cost = if *c == short[j - 1] { 0 } else { 1 };
            let deletion = prev[j] + 1;
            let insertion = curr[j - 1] + 1;
            let substitution = prev[j - 1] + cost;
            curr[j] = deletion.min(insertion).min(substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity in [0, 1]: `1 - distance / max(len)`.
///
/// Undefined when both inputs are empty; callers must reject that case
/// before invocation.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    debug_assert!(max_len > 0, "similarity of two empty strings is undefined");
    if max_len == 0 {
        return 0.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// A registry key that matched a candidate at or above the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarTag {
    pub tag: String,
    pub score: f64,
}

/// Every key with similarity to `candidate` at or above `threshold`,
/// excluding the candidate itself, sorted descending by score. The sort is
/// stable, so equal scores keep the registry's insertion order.
pub fn find_similar<'a, I>(candidate: &str, keys: I, threshold: f64) -> Vec<SimilarTag>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hits: Vec<SimilarTag> = keys
        .into_iter()
        .filter(|key| !key.is_empty() && *key != candidate)
        .map(|key| SimilarTag {
            tag: key.to_string(),
            score: similarity(candidate, key),
        })
        .filter(|hit| hit.score >= threshold)
        .collect();

    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("rust", "rust"), 0);
    }

    #[test]
    fn identical_tags_have_similarity_one() {
        assert!((similarity("javascript", "javascript") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn similarity_is_symmetric() {
        let a = similarity("javascript", "javascrpt");
        let b = similarity("javascrpt", "javascript");
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn js_and_javascript_are_distant() {
        // Distance 8 over max length 10: far below any sane threshold.
        assert!(similarity("js", "javascript") < 0.3);
    }

    #[test]
    fn near_duplicates_score_high() {
        assert!(similarity("javascript", "javascrpt") >= 0.9);
        assert!(similarity("node-js", "nodejs") >= 0.8);
    }

    #[test]
    fn find_similar_sorts_descending_and_excludes_self() {
        let keys = ["rust", "rusty", "rust-lang", "python"];
        let hits = find_similar("rust", keys.iter().copied(), 0.5);
        assert!(hits.iter().all(|h| h.tag != "rust"));
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(hits.first().map(|h| h.tag.as_str()), Some("rusty"));
    }

    #[test]
    fn find_similar_ties_keep_insertion_order() {
        // Both candidates are one substitution away from "tag1".
        let keys = ["tag2", "tag3"];
        let hits = find_similar("tag1", keys.iter().copied(), 0.7);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].tag, "tag2");
        assert_eq!(hits[1].tag, "tag3");
    }

    #[test]
    fn threshold_filters() {
        let keys = ["python"];
        assert!(find_similar("rust", keys.iter().copied(), 0.8).is_empty());
    }
}
