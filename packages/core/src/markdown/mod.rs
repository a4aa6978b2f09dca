//! Markdown Document Model
//!
//! A purpose-built markdown parser for note rendering. It is not CommonMark:
//! the syntax is the small, predictable subset the editor produces, with
//! fixed precedence rules and graceful degradation on malformed input.
//!
//! Parsing is pure and stateless: both entry points are safe to call
//! concurrently and never fail - every input string has a well-defined tree.
//!
//! - [`parse_markdown`] - raw text into an ordered sequence of [`BlockNode`]s
//! - [`parse_inline`] - one logical line into [`InlineNode`]s

mod block;
mod inline;

pub use block::{parse_markdown, BlockNode, ListItem};
pub use inline::{parse_inline, InlineNode};
