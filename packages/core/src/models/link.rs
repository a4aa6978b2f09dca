//! Note Link Data Structure
//!
//! One directed wiki-reference from a source note's content to a target note.
//! The ordered pair (source, target) is unique: a note links to another note
//! at most once regardless of how many times `[[Title]]` appears. Both
//! endpoints must reference existing notes; hard-deleting either endpoint
//! cascades to the link row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteLink {
    pub id: String,

    pub source_note_id: String,

    pub target_note_id: String,

    /// The title as written inside `[[...]]` in the source content
    pub link_text: String,

    pub created_at: DateTime<Utc>,
}

impl NoteLink {
    pub fn create(
        source_note_id: impl Into<String>,
        target_note_id: impl Into<String>,
        link_text: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source_note_id: source_note_id.into(),
            target_note_id: target_note_id.into(),
            link_text: link_text.into(),
            created_at: Utc::now(),
        }
    }
}
