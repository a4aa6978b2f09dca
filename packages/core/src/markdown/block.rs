//! Block Markdown Parser
//!
//! Splits raw note text into an ordered sequence of block nodes with a single
//! forward scan over lines. Each line is classified by a fixed precedence
//! order (blank, horizontal rule, heading, code fence, quote, checklist,
//! bullet, numbered, paragraph) and a maximal run of same-classified lines
//! becomes one block.
//!
//! The checklist pattern is a strict superset of the bullet pattern and MUST
//! be tried first; that ordering is a rule, not a heuristic.

use super::inline::{parse_inline, InlineNode};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Quote blocks re-invoke the block parser on their dequoted content. Nesting
/// beyond this depth stops recursing and the quote-marked lines fall through
/// to paragraph classification, so pathological input cannot blow the stack.
const MAX_QUOTE_DEPTH: usize = 16;

/// A structural markdown unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockNode {
    Paragraph(Vec<InlineNode>),
    Heading {
        /// 1 through 6
        level: u8,
        content: Vec<InlineNode>,
    },
    CodeBlock {
        code: String,
        language: Option<String>,
    },
    /// Nested blocks parsed from the dequoted lines
    Quote(Vec<BlockNode>),
    BulletList(Vec<ListItem>),
    NumberedList(Vec<ListItem>),
    /// Items carry `checked: Some(_)`; the tri-state `None` is reserved for
    /// plain bullets that render inside mixed lists
    Checklist(Vec<ListItem>),
    HorizontalRule,
    Empty,
}

/// One item of a bullet, numbered, or checklist block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub content: Vec<InlineNode>,
    /// Some(true)/Some(false) for checklist items, None for plain items
    pub checked: Option<bool>,
}

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*+]\s+(.+)$").unwrap());
static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s+(.+)$").unwrap());
static CHECKLIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+]\s+\[([ xX])\]\s+(.+)$").unwrap());
static QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^>\s*(.*)$").unwrap());
static FENCE_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```(\w*)$").unwrap());
static FENCE_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```$").unwrap());
static HORIZONTAL_RULE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*_]{3,}$").unwrap());

/// Parse raw note text into block nodes.
///
/// Never fails: malformed lines fall through the precedence chain and end up
/// as paragraph content, and an unterminated code fence consumes the rest of
/// the input as code.
///
/// # Examples
///
/// ```
/// use notemark_core::markdown::{parse_markdown, BlockNode};
///
/// let blocks = parse_markdown("# Title\n\nBody text");
/// assert!(matches!(blocks[0], BlockNode::Heading { level: 1, .. }));
/// assert!(matches!(blocks[1], BlockNode::Paragraph(_)));
/// ```
pub fn parse_markdown(text: &str) -> Vec<BlockNode> {
    parse_blocks(text, 0)
}

fn parse_blocks(text: &str, quote_depth: usize) -> Vec<BlockNode> {
    let lines: Vec<&str> = text.lines().collect();
    let mut nodes = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.trim().is_empty() {
            // Blank lines separate blocks but produce no node
            i += 1;
        } else if HORIZONTAL_RULE_RE.is_match(line) {
            nodes.push(BlockNode::HorizontalRule);
            i += 1;
        } else if let Some(captures) = HEADING_RE.captures(line) {
            let level = captures[1].len() as u8;
            nodes.push(BlockNode::Heading {
                level,
                content: parse_inline(&captures[2]),
            });
            i += 1;
        } else if let Some(captures) = FENCE_OPEN_RE.captures(line) {
            let language = match &captures[1] {
                "" => None,
                tag => Some(tag.to_string()),
            };
            let mut code_lines = Vec::new();
            i += 1;
            while i < lines.len() && !FENCE_CLOSE_RE.is_match(lines[i]) {
                // Everything inside a fence is verbatim, no escaping
                code_lines.push(lines[i]);
                i += 1;
            }
            if i < lines.len() {
                i += 1; // skip the closing fence; missing fence ran to EOF
            }
            nodes.push(BlockNode::CodeBlock {
                code: code_lines.join("\n"),
                language,
            });
        } else if quote_depth < MAX_QUOTE_DEPTH && QUOTE_RE.is_match(line) {
            let mut quoted = Vec::new();
            while i < lines.len() {
                let Some(captures) = QUOTE_RE.captures(lines[i]) else {
                    break;
                };
                quoted.push(captures[1].to_string());
                i += 1;
            }
            nodes.push(BlockNode::Quote(parse_blocks(
                &quoted.join("\n"),
                quote_depth + 1,
            )));
        } else if CHECKLIST_RE.is_match(line) {
            let mut items = Vec::new();
            while i < lines.len() {
                let Some(captures) = CHECKLIST_RE.captures(lines[i]) else {
                    break;
                };
                items.push(ListItem {
                    content: parse_inline(&captures[2]),
                    checked: Some(captures[1].eq_ignore_ascii_case("x")),
                });
                i += 1;
            }
            nodes.push(BlockNode::Checklist(items));
        } else if BULLET_RE.is_match(line) {
            let mut items = Vec::new();
            while i < lines.len() {
                let Some(captures) = BULLET_RE.captures(lines[i]) else {
                    break;
                };
                items.push(ListItem {
                    content: parse_inline(&captures[1]),
                    checked: None,
                });
                i += 1;
            }
            nodes.push(BlockNode::BulletList(items));
        } else if NUMBERED_RE.is_match(line) {
            let mut items = Vec::new();
            while i < lines.len() {
                let Some(captures) = NUMBERED_RE.captures(lines[i]) else {
                    break;
                };
                items.push(ListItem {
                    content: parse_inline(&captures[1]),
                    checked: None,
                });
                i += 1;
            }
            nodes.push(BlockNode::NumberedList(items));
        } else {
            // Paragraph: consume until a blank line or any other classifier
            let mut paragraph_lines = Vec::new();
            while i < lines.len()
                && !lines[i].trim().is_empty()
                && !is_non_paragraph_line(lines[i], quote_depth)
            {
                paragraph_lines.push(lines[i]);
                i += 1;
            }
            if !paragraph_lines.is_empty() {
                nodes.push(BlockNode::Paragraph(parse_inline(
                    &paragraph_lines.join(" "),
                )));
            }
        }
    }

    nodes
}

fn is_non_paragraph_line(line: &str, quote_depth: usize) -> bool {
    HORIZONTAL_RULE_RE.is_match(line)
        || HEADING_RE.is_match(line)
        || FENCE_OPEN_RE.is_match(line)
        || (quote_depth < MAX_QUOTE_DEPTH && QUOTE_RE.is_match(line))
        || CHECKLIST_RE.is_match(line)
        || BULLET_RE.is_match(line)
        || NUMBERED_RE.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> InlineNode {
        InlineNode::Text(s.to_string())
    }

    #[test]
    fn test_heading_levels() {
        let blocks = parse_markdown("# One\n### Three\n###### Six");
        assert_eq!(
            blocks,
            vec![
                BlockNode::Heading {
                    level: 1,
                    content: vec![text("One")],
                },
                BlockNode::Heading {
                    level: 3,
                    content: vec![text("Three")],
                },
                BlockNode::Heading {
                    level: 6,
                    content: vec![text("Six")],
                },
            ]
        );
    }

    #[test]
    fn test_seven_hashes_is_a_paragraph() {
        let blocks = parse_markdown("####### too deep");
        assert_eq!(
            blocks,
            vec![BlockNode::Paragraph(vec![text("####### too deep")])]
        );
    }

    #[test]
    fn test_paragraph_lines_joined_with_space() {
        let blocks = parse_markdown("first line\nsecond line");
        assert_eq!(
            blocks,
            vec![BlockNode::Paragraph(vec![text("first line second line")])]
        );
    }

    #[test]
    fn test_blank_lines_split_paragraphs_without_nodes() {
        let blocks = parse_markdown("one\n\n\ntwo");
        assert_eq!(
            blocks,
            vec![
                BlockNode::Paragraph(vec![text("one")]),
                BlockNode::Paragraph(vec![text("two")]),
            ]
        );
    }

    #[test]
    fn test_code_block_with_language() {
        let blocks = parse_markdown("```rust\nlet x = 1;\nlet y = 2;\n```\nafter");
        assert_eq!(
            blocks[0],
            BlockNode::CodeBlock {
                code: "let x = 1;\nlet y = 2;".to_string(),
                language: Some("rust".to_string()),
            }
        );
        assert_eq!(blocks[1], BlockNode::Paragraph(vec![text("after")]));
    }

    #[test]
    fn test_code_block_contents_are_verbatim() {
        let blocks = parse_markdown("```\n# not a heading\n- not a list\n```");
        assert_eq!(
            blocks,
            vec![BlockNode::CodeBlock {
                code: "# not a heading\n- not a list".to_string(),
                language: None,
            }]
        );
    }

    #[test]
    fn test_unterminated_fence_consumes_to_eof() {
        let blocks = parse_markdown("```python\nprint(1)\nprint(2)");
        assert_eq!(
            blocks,
            vec![BlockNode::CodeBlock {
                code: "print(1)\nprint(2)".to_string(),
                language: Some("python".to_string()),
            }]
        );
    }

    #[test]
    fn test_consecutive_bullets_form_one_list() {
        let blocks = parse_markdown("- a\n* b\n+ c");
        assert_eq!(
            blocks,
            vec![BlockNode::BulletList(vec![
                ListItem {
                    content: vec![text("a")],
                    checked: None,
                },
                ListItem {
                    content: vec![text("b")],
                    checked: None,
                },
                ListItem {
                    content: vec![text("c")],
                    checked: None,
                },
            ])]
        );
    }

    #[test]
    fn test_numbered_list() {
        let blocks = parse_markdown("1. first\n2. second");
        assert_eq!(
            blocks,
            vec![BlockNode::NumberedList(vec![
                ListItem {
                    content: vec![text("first")],
                    checked: None,
                },
                ListItem {
                    content: vec![text("second")],
                    checked: None,
                },
            ])]
        );
    }

    #[test]
    fn test_checklist_precedence_over_bullet() {
        // "- [x] done" also matches the bullet pattern; checklist must win
        let blocks = parse_markdown("- [x] done\n- [ ] open\n- [X] caps");
        assert_eq!(
            blocks,
            vec![BlockNode::Checklist(vec![
                ListItem {
                    content: vec![text("done")],
                    checked: Some(true),
                },
                ListItem {
                    content: vec![text("open")],
                    checked: Some(false),
                },
                ListItem {
                    content: vec![text("caps")],
                    checked: Some(true),
                },
            ])]
        );
    }

    #[test]
    fn test_checklist_run_breaks_at_plain_bullet() {
        let blocks = parse_markdown("- [x] task\n- plain");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], BlockNode::Checklist(_)));
        assert!(matches!(blocks[1], BlockNode::BulletList(_)));
    }

    #[test]
    fn test_horizontal_rule_variants() {
        let blocks = parse_markdown("---\n****\n____");
        assert_eq!(
            blocks,
            vec![
                BlockNode::HorizontalRule,
                BlockNode::HorizontalRule,
                BlockNode::HorizontalRule,
            ]
        );
    }

    #[test]
    fn test_quote_recurses_into_blocks() {
        let blocks = parse_markdown("> # Quoted heading\n> body");
        assert_eq!(
            blocks,
            vec![BlockNode::Quote(vec![
                BlockNode::Heading {
                    level: 1,
                    content: vec![text("Quoted heading")],
                },
                BlockNode::Paragraph(vec![text("body")]),
            ])]
        );
    }

    #[test]
    fn test_nested_quotes() {
        let blocks = parse_markdown("> > inner");
        assert_eq!(
            blocks,
            vec![BlockNode::Quote(vec![BlockNode::Quote(vec![
                BlockNode::Paragraph(vec![text("inner")]),
            ])])]
        );
    }

    #[test]
    fn test_pathological_quote_nesting_does_not_overflow() {
        let line = format!("{} deep", "> ".repeat(200).trim_end());
        let blocks = parse_markdown(&line);
        // Must terminate and produce a tree; beyond the depth cap the
        // remaining markers survive as paragraph text
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_paragraph_run_stops_at_list() {
        let blocks = parse_markdown("intro text\n- item");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], BlockNode::Paragraph(vec![text("intro text")]));
        assert!(matches!(blocks[1], BlockNode::BulletList(_)));
    }

    #[test]
    fn test_inline_formatting_inside_blocks() {
        let blocks = parse_markdown("## A **bold** heading");
        assert_eq!(
            blocks,
            vec![BlockNode::Heading {
                level: 2,
                content: vec![
                    text("A "),
                    InlineNode::Bold(vec![text("bold")]),
                    text(" heading"),
                ],
            }]
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let input = "# T\n\npara **b**\n\n- [x] c\n- [ ] d\n\n> q\n\n```\ncode\n```";
        assert_eq!(parse_markdown(input), parse_markdown(input));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_markdown("").is_empty());
        assert!(parse_markdown("\n\n\n").is_empty());
    }
}
