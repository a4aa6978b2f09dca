//! Markdown stripping for the plain-text projection
//!
//! Notes keep a markdown-stripped copy of their content for search indexing,
//! previews, and the word/character counts. This module produces that
//! projection. It is deliberately a flat replacement pipeline, not a full
//! parse: the projection only needs readable text, not structure.

use regex::Regex;
use std::sync::LazyLock;

/// Ordered replacement patterns.
///
/// Order matters:
/// 1. Code fence lines before inline code (three backticks would otherwise
///    pair up with a later fence)
/// 2. Wiki-links before plain links (both use brackets)
/// 3. Bold before italic (`**` contains `*`)
/// 4. Remaining line-start patterns last, with checklist markers before plain
///    bullet markers (the more specific pattern must win)
static STRIP_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        // Code fence lines disappear first, before the inline-code pattern
        // can pair their backticks across lines
        (Regex::new(r"^```\w*$").unwrap(), ""),
        // Wiki-links keep the title: [[Note Title]] -> Note Title
        (Regex::new(r"\[\[([^\]]+)\]\]").unwrap(), "$1"),
        // Markdown links keep the link text: [text](url) -> text
        (Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap(), "$1"),
        // Inline code: `code` -> code
        (Regex::new(r"`([^`]+)`").unwrap(), "$1"),
        // Bold: **text** or __text__ -> text
        (Regex::new(r"\*\*([^*]+)\*\*").unwrap(), "$1"),
        (Regex::new(r"__([^_]+)__").unwrap(), "$1"),
        // Strikethrough: ~~text~~ -> text
        (Regex::new(r"~~([^~]+)~~").unwrap(), "$1"),
        // Highlight: ==text== -> text
        (Regex::new(r"==([^=]+)==").unwrap(), "$1"),
        // Italic, after bold: *text* or _text_ -> text
        (Regex::new(r"\*([^*]+)\*").unwrap(), "$1"),
        (Regex::new(r"_([^_]+)_").unwrap(), "$1"),
        // Headers: # Header -> Header (up to 6 levels)
        (Regex::new(r"^#{1,6}\s+").unwrap(), ""),
        // Blockquote markers: > quote -> quote
        (Regex::new(r"^>\s*").unwrap(), ""),
        // Checklist markers before bullet markers: - [x] item -> item
        (Regex::new(r"^[-*+]\s+\[[ xX]\]\s+").unwrap(), ""),
        // Ordered list markers: 1. item -> item
        (Regex::new(r"^\d+\.\s+").unwrap(), ""),
        // Unordered list markers: - item -> item
        (Regex::new(r"^[-*+]\s+").unwrap(), ""),
        // Horizontal rules
        (Regex::new(r"^[-*_]{3,}$").unwrap(), ""),
    ]
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip markdown formatting from note content, producing the plain-text
/// projection stored alongside the raw content.
///
/// # Examples
///
/// ```
/// use notemark_core::utils::strip_markdown;
///
/// assert_eq!(strip_markdown("# Hello World"), "Hello World");
/// assert_eq!(strip_markdown("**bold** text"), "bold text");
/// assert_eq!(strip_markdown("see [[Meeting Notes]]"), "see Meeting Notes");
/// ```
pub fn strip_markdown(content: &str) -> String {
    let mut result = content.to_string();

    for (pattern, replacement) in STRIP_PATTERNS.iter() {
        // Line-start patterns apply per line, the rest across the whole text
        if pattern.as_str().starts_with('^') {
            result = result
                .lines()
                .map(|line| pattern.replace_all(line, *replacement).to_string())
                .collect::<Vec<_>>()
                .join("\n");
        } else {
            result = pattern.replace_all(&result, *replacement).to_string();
        }
    }

    result = WHITESPACE_RE.replace_all(&result, " ").to_string();
    result.trim().to_string()
}

/// Count whitespace-delimited non-empty tokens.
///
/// Applied to the plain-text projection to produce a note's `word_count`.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_headers() {
        assert_eq!(strip_markdown("# Header 1"), "Header 1");
        assert_eq!(strip_markdown("###### Header 6"), "Header 6");
    }

    #[test]
    fn test_strip_bold_and_italic() {
        assert_eq!(strip_markdown("**bold text**"), "bold text");
        assert_eq!(strip_markdown("__also bold__"), "also bold");
        assert_eq!(strip_markdown("*italic*"), "italic");
        assert_eq!(strip_markdown("_also italic_"), "also italic");
    }

    #[test]
    fn test_strip_wiki_links_keeps_title() {
        assert_eq!(strip_markdown("see [[Meeting Notes]]"), "see Meeting Notes");
    }

    #[test]
    fn test_strip_links() {
        assert_eq!(
            strip_markdown("Check [this link](http://test.com) out"),
            "Check this link out"
        );
    }

    #[test]
    fn test_strip_inline_code_and_highlight() {
        assert_eq!(strip_markdown("`code`"), "code");
        assert_eq!(strip_markdown("==marked=="), "marked");
        assert_eq!(strip_markdown("~~gone~~"), "gone");
    }

    #[test]
    fn test_checklist_marker_wins_over_bullet() {
        assert_eq!(strip_markdown("- [x] done thing"), "done thing");
        assert_eq!(strip_markdown("- [ ] open thing"), "open thing");
        assert_eq!(strip_markdown("- plain bullet"), "plain bullet");
    }

    #[test]
    fn test_strip_list_markers_and_quotes() {
        assert_eq!(strip_markdown("1. numbered item"), "numbered item");
        assert_eq!(strip_markdown("> quoted text"), "quoted text");
    }

    #[test]
    fn test_fence_lines_removed() {
        assert_eq!(strip_markdown("```rust\nlet x = 1;\n```"), "let x = 1;");
    }

    #[test]
    fn test_horizontal_rule_removed() {
        assert_eq!(strip_markdown("above\n---\nbelow"), "above below");
    }

    #[test]
    fn test_whitespace_normalized() {
        assert_eq!(strip_markdown("  text  "), "text");
        assert_eq!(strip_markdown("a\n\n\nb"), "a b");
        assert_eq!(strip_markdown(""), "");
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
        assert_eq!(count_words("one two  three"), 3);
    }
}
