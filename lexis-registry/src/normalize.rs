//! Canonicalizes raw tag strings into comparable registry keys.

use lexis_core::constants::MAX_TAG_LENGTH;

/// Normalize a raw tag into a registry key.
///
/// Lowercases, strips everything outside `[a-z0-9 &-]`, collapses each
/// whitespace run to a single `-`, trims leading/trailing `-`, and caps the
/// result at [`MAX_TAG_LENGTH`] characters. Total and idempotent; an empty
/// result means "not a usable tag" and is filtered by callers, never an
/// error here.
pub fn normalize(raw: &str) -> String {
    let filtered: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || matches!(c, '&' | '-')
        })
        .collect();

    let hyphenated = filtered.split_whitespace().collect::<Vec<_>>().join("-");
    let trimmed = hyphenated.trim_matches('-');
    let capped: String = trimmed.chars().take(MAX_TAG_LENGTH).collect();

    // Truncation can re-expose a trailing hyphen; trim again so the
    // function stays idempotent.
    capped.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(normalize("JavaScript!!"), "javascript");
        assert_eq!(normalize("JS"), "js");
    }

    #[test]
    fn collapses_whitespace_to_hyphens() {
        assert_eq!(normalize("machine   learning"), "machine-learning");
        assert_eq!(normalize("  rust lang  "), "rust-lang");
    }

    #[test]
    fn keeps_ampersand_and_digits() {
        assert_eq!(normalize("Tips & Tricks"), "tips-&-tricks");
        assert_eq!(normalize("Web 2.0"), "web-20");
    }

    #[test]
    fn only_disallowed_characters_yield_empty() {
        assert_eq!(normalize("!!!"), "");
        assert_eq!(normalize("???***"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn caps_length() {
        let long = "a".repeat(120);
        assert_eq!(normalize(&long).chars().count(), MAX_TAG_LENGTH);
    }

    #[test]
    fn truncation_never_leaves_a_trailing_hyphen() {
        // 49 chars then a hyphen boundary right at the cap.
        let raw = format!("{} b", "a".repeat(49));
        let out = normalize(&raw);
        assert!(!out.ends_with('-'));
        assert_eq!(normalize(&out), out);
    }

    #[test]
    fn idempotent_on_samples() {
        for raw in ["JavaScript!!", "  Machine   Learning ", "tips & tricks", "---x---"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }
}
