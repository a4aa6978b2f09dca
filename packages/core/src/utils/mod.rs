//! Utility functions for Notemark Core
//!
//! This module provides common utility functions used across the codebase.

mod plain_text;

pub use plain_text::{count_words, strip_markdown};
