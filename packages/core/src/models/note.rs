//! Note Data Structure
//!
//! The `Note` is the central entity of Notemark. Its `content` field is the
//! source of truth (raw markdown); `plain_text_content`, `word_count`, and
//! `character_count` are projections derived from it and are only ever
//! rewritten together with the content itself.

use crate::utils::{count_words, strip_markdown};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed color palette for note tagging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum NoteColor {
    #[default]
    Default,
    Yellow,
    Green,
    Blue,
    Pink,
    Purple,
    Orange,
    Teal,
    Gray,
}

/// A single note.
///
/// # Invariants
///
/// - `plain_text_content`, `word_count`, and `character_count` are always
///   consistent with `content`; they are recomputed together by the
///   constructors and [`Note::apply_content`], never edited directly
/// - `trashed_at` is `Some` if and only if `is_trashed` is true
/// - `id` is immutable once assigned
///
/// The three lifecycle flags (`is_pinned`, `is_archived`, `is_trashed`) are
/// independent and combinable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier (UUID v4 string)
    pub id: String,

    /// Title (may be empty)
    pub title: String,

    /// Raw markdown content - the source of truth
    pub content: String,

    /// Markdown-stripped projection used for search and previews (derived)
    pub plain_text_content: String,

    /// Containing folder, or None for uncategorized
    pub folder_id: Option<String>,

    /// Color tag from the fixed palette
    pub color: NoteColor,

    pub is_pinned: bool,
    pub is_archived: bool,
    pub is_trashed: bool,

    /// When true, content is conceptually a list of checklist item rows
    pub is_checklist: bool,

    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    /// Set when the note is trashed, cleared on restore
    pub trashed_at: Option<DateTime<Utc>>,

    /// Whitespace-delimited token count of the plain-text projection (derived)
    pub word_count: usize,

    /// Character count of the plain-text projection (derived)
    pub character_count: usize,
}

impl Note {
    /// Create a new note, deriving the plain-text projection and counts from
    /// the initial content.
    pub fn create(
        title: impl Into<String>,
        content: impl Into<String>,
        folder_id: Option<String>,
        color: NoteColor,
        is_checklist: bool,
    ) -> Self {
        let content = content.into();
        let now = Utc::now();
        let plain_text = strip_markdown(&content);
        let word_count = count_words(&plain_text);
        let character_count = plain_text.chars().count();

        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content,
            plain_text_content: plain_text,
            folder_id,
            color,
            is_pinned: false,
            is_archived: false,
            is_trashed: false,
            is_checklist,
            created_at: now,
            modified_at: now,
            trashed_at: None,
            word_count,
            character_count,
        }
    }

    /// Replace title and content, recomputing every derived field in the same
    /// step. This is the only way content changes; there is no intermediate
    /// state with stale projections.
    pub fn apply_content(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.title = title.into();
        self.content = content.into();
        self.plain_text_content = strip_markdown(&self.content);
        self.word_count = count_words(&self.plain_text_content);
        self.character_count = self.plain_text_content.chars().count();
        self.modified_at = Utc::now();
    }

    /// Mark the note as trashed. `trashed_at` records when, for age-based
    /// trash expiry.
    pub fn mark_trashed(&mut self) {
        self.is_trashed = true;
        self.trashed_at = Some(Utc::now());
        self.modified_at = Utc::now();
    }

    /// Restore a trashed note; clears `trashed_at`.
    pub fn mark_restored(&mut self) {
        self.is_trashed = false;
        self.trashed_at = None;
        self.modified_at = Utc::now();
    }

    /// True if the note carries any user-visible text.
    pub fn is_not_empty(&self) -> bool {
        !self.title.trim().is_empty()
            || !self.content.trim().is_empty()
            || !self.plain_text_content.trim().is_empty()
    }

    /// Short single-line preview of the plain-text projection.
    pub fn preview(&self) -> String {
        self.plain_text_content
            .chars()
            .take(200)
            .collect::<String>()
            .replace('\n', " ")
    }
}
