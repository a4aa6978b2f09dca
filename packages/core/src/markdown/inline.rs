//! Inline Markdown Parser
//!
//! Turns one logical line of text (already block-joined) into an ordered
//! sequence of inline nodes. The scanner repeatedly picks the
//! earliest-starting match among a fixed pattern set; ties at the same start
//! position are resolved by pattern priority. Styled spans (bold, italic,
//! strikethrough, highlight) nest and are re-parsed recursively; code spans
//! and link captures are opaque literals so formatting cannot be injected
//! into them.
//!
//! Malformed input never errors: an unterminated delimiter simply falls
//! through as literal text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A formatting unit within a block's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InlineNode {
    /// Literal text
    Text(String),
    Bold(Vec<InlineNode>),
    Italic(Vec<InlineNode>),
    Strikethrough(Vec<InlineNode>),
    Highlight(Vec<InlineNode>),
    /// Inline code; contents are never re-parsed
    Code(String),
    /// Regular markdown link; text and url are opaque
    Link { text: String, url: String },
    /// `[[Title]]` reference to another note by title
    WikiLink(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineKind {
    WikiLink,
    Bold,
    Italic,
    Strikethrough,
    Highlight,
    Code,
    Link,
}

/// Pattern table in priority order. Wiki-link comes first so `[[` is never
/// mis-read as the `[` of a plain link; bold before italic because `**`
/// contains `*`. The vec order is the tie-break for matches starting at the
/// same position.
static INLINE_PATTERNS: LazyLock<Vec<(Regex, InlineKind)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"\[\[([^\]]+)\]\]").unwrap(), InlineKind::WikiLink),
        (Regex::new(r"\*\*(.+?)\*\*").unwrap(), InlineKind::Bold),
        (Regex::new(r"__(.+?)__").unwrap(), InlineKind::Bold),
        (Regex::new(r"\*(.+?)\*").unwrap(), InlineKind::Italic),
        (Regex::new(r"_(.+?)_").unwrap(), InlineKind::Italic),
        (
            Regex::new(r"~~(.+?)~~").unwrap(),
            InlineKind::Strikethrough,
        ),
        (Regex::new(r"==(.+?)==").unwrap(), InlineKind::Highlight),
        (Regex::new(r"`(.+?)`").unwrap(), InlineKind::Code),
        (Regex::new(r"\[(.+?)\]\((.+?)\)").unwrap(), InlineKind::Link),
    ]
});

/// Parse a single logical line into inline nodes.
///
/// # Examples
///
/// ```
/// use notemark_core::markdown::{parse_inline, InlineNode};
///
/// let nodes = parse_inline("see [[Meeting Notes]]");
/// assert_eq!(nodes[0], InlineNode::Text("see ".to_string()));
/// assert_eq!(nodes[1], InlineNode::WikiLink("Meeting Notes".to_string()));
/// ```
pub fn parse_inline(text: &str) -> Vec<InlineNode> {
    let mut nodes = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        let earliest = find_earliest_match(remaining);

        let Some((captures, kind)) = earliest else {
            // Nothing special left; the rest is literal text
            nodes.push(InlineNode::Text(remaining.to_string()));
            break;
        };

        let whole = captures.get(0).expect("match has a full capture");
        if whole.start() > 0 {
            nodes.push(InlineNode::Text(remaining[..whole.start()].to_string()));
        }

        let inner = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        nodes.push(match kind {
            InlineKind::WikiLink => InlineNode::WikiLink(inner.to_string()),
            InlineKind::Bold => InlineNode::Bold(parse_inline(inner)),
            InlineKind::Italic => InlineNode::Italic(parse_inline(inner)),
            InlineKind::Strikethrough => InlineNode::Strikethrough(parse_inline(inner)),
            InlineKind::Highlight => InlineNode::Highlight(parse_inline(inner)),
            InlineKind::Code => InlineNode::Code(inner.to_string()),
            InlineKind::Link => InlineNode::Link {
                text: inner.to_string(),
                url: captures
                    .get(2)
                    .map(|m| m.as_str())
                    .unwrap_or_default()
                    .to_string(),
            },
        });

        remaining = &remaining[whole.end()..];
    }

    if nodes.is_empty() {
        // Preserve the "a line is at least one text node" shape for callers
        nodes.push(InlineNode::Text(text.to_string()));
    }
    nodes
}

/// Find the match that starts earliest in `text`; ties go to the pattern
/// listed first.
fn find_earliest_match(text: &str) -> Option<(regex::Captures<'_>, InlineKind)> {
    let mut best: Option<(regex::Captures<'_>, InlineKind)> = None;
    let mut best_start = usize::MAX;

    for (pattern, kind) in INLINE_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            let start = captures.get(0).expect("match has a full capture").start();
            if start < best_start {
                best_start = start;
                best = Some((captures, *kind));
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> InlineNode {
        InlineNode::Text(s.to_string())
    }

    #[test]
    fn test_plain_text_round_trip() {
        let nodes = parse_inline("no delimiters here");
        assert_eq!(nodes, vec![text("no delimiters here")]);
    }

    #[test]
    fn test_empty_input_yields_single_text_node() {
        assert_eq!(parse_inline(""), vec![text("")]);
    }

    #[test]
    fn test_bold_both_spellings() {
        assert_eq!(
            parse_inline("**strong**"),
            vec![InlineNode::Bold(vec![text("strong")])]
        );
        assert_eq!(
            parse_inline("__strong__"),
            vec![InlineNode::Bold(vec![text("strong")])]
        );
    }

    #[test]
    fn test_bold_wins_over_italic_at_same_position() {
        // "*(.+?)\*" also matches at offset 0; priority order decides
        assert_eq!(
            parse_inline("**x**"),
            vec![InlineNode::Bold(vec![text("x")])]
        );
    }

    #[test]
    fn test_italic_strike_highlight() {
        assert_eq!(
            parse_inline("*i* ~~s~~ ==h=="),
            vec![
                InlineNode::Italic(vec![text("i")]),
                text(" "),
                InlineNode::Strikethrough(vec![text("s")]),
                text(" "),
                InlineNode::Highlight(vec![text("h")]),
            ]
        );
    }

    #[test]
    fn test_styled_spans_nest() {
        assert_eq!(
            parse_inline("**bold *inner* more**"),
            vec![InlineNode::Bold(vec![
                text("bold "),
                InlineNode::Italic(vec![text("inner")]),
                text(" more"),
            ])]
        );
    }

    #[test]
    fn test_code_contents_are_opaque() {
        assert_eq!(
            parse_inline("`**not bold**`"),
            vec![InlineNode::Code("**not bold**".to_string())]
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            parse_inline("[site](https://example.com)"),
            vec![InlineNode::Link {
                text: "site".to_string(),
                url: "https://example.com".to_string(),
            }]
        );
    }

    #[test]
    fn test_wiki_link_not_parsed_as_plain_link() {
        // [[A]](b) must read the wiki-link first, never "[A]" as link text
        let nodes = parse_inline("[[Note]] then [x](y)");
        assert_eq!(nodes[0], InlineNode::WikiLink("Note".to_string()));
        assert_eq!(
            nodes[2],
            InlineNode::Link {
                text: "x".to_string(),
                url: "y".to_string(),
            }
        );
    }

    #[test]
    fn test_wiki_link_inner_text_is_opaque() {
        assert_eq!(
            parse_inline("[[**Bold Title**]]"),
            vec![InlineNode::WikiLink("**Bold Title**".to_string())]
        );
    }

    #[test]
    fn test_unterminated_delimiter_degrades_to_text() {
        assert_eq!(parse_inline("**bold"), vec![text("**bold")]);
        assert_eq!(parse_inline("[[dangling"), vec![text("[[dangling")]);
        assert_eq!(parse_inline("`open"), vec![text("`open")]);
    }

    #[test]
    fn test_leading_and_trailing_text_preserved() {
        assert_eq!(
            parse_inline("a **b** c"),
            vec![
                text("a "),
                InlineNode::Bold(vec![text("b")]),
                text(" c"),
            ]
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let input = "mix of **bold**, *italic*, `code`, [[Wiki]] and [l](u)";
        assert_eq!(parse_inline(input), parse_inline(input));
    }
}
