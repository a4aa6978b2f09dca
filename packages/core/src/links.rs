//! Wiki-Link Extraction
//!
//! Pulls `[[Title]]` references out of raw note content. This deliberately
//! does NOT go through the markdown parser: a link must be detectable even
//! inside text the block/inline parser would render oddly, so extraction
//! runs directly on the raw string.
//!
//! Pure and stateless; safe to call from anywhere.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WIKI_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

/// Extract the normalized set of wiki-link titles from note content.
///
/// Scans for non-overlapping `[[...]]` occurrences, trims surrounding
/// whitespace from each captured title, discards empty titles, and
/// deduplicates by exact (case-sensitive) equality while preserving
/// first-seen order.
///
/// # Examples
///
/// ```
/// use notemark_core::extract_wiki_links;
///
/// let titles = extract_wiki_links("[[A]] text [[ B ]] more [[A]]");
/// assert_eq!(titles, vec!["A", "B"]);
/// ```
pub fn extract_wiki_links(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut titles = Vec::new();

    for captures in WIKI_LINK_RE.captures_iter(content) {
        let title = captures[1].trim();
        if title.is_empty() {
            continue;
        }
        if seen.insert(title.to_string()) {
            titles.push(title.to_string());
        }
    }
    titles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_order() {
        assert_eq!(
            extract_wiki_links("[[First]] then [[Second]]"),
            vec!["First", "Second"]
        );
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        assert_eq!(
            extract_wiki_links("[[A]] text [[A]] [[B]]"),
            vec!["A", "B"]
        );
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        assert_eq!(
            extract_wiki_links("[[Note]] and [[note]]"),
            vec!["Note", "note"]
        );
    }

    #[test]
    fn test_titles_are_trimmed() {
        assert_eq!(extract_wiki_links("[[  Spaced Title ]]"), vec!["Spaced Title"]);
    }

    #[test]
    fn test_whitespace_only_title_discarded() {
        assert!(extract_wiki_links("[[   ]]").is_empty());
        assert!(extract_wiki_links("no links at all").is_empty());
    }

    #[test]
    fn test_unclosed_brackets_ignored() {
        assert!(extract_wiki_links("[[dangling").is_empty());
        assert_eq!(extract_wiki_links("[[ok]] [[nope"), vec!["ok"]);
    }

    #[test]
    fn test_extraction_ignores_surrounding_markup() {
        // Extraction works on raw content, not the parsed tree
        assert_eq!(
            extract_wiki_links("```\n[[Inside Fence]]\n```"),
            vec!["Inside Fence"]
        );
    }
}
