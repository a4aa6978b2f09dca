//! Checklist Item Data Structure
//!
//! A checklist item belongs to exactly one note and is cascade-deleted with
//! it. Items are only written through the owning note's save-checklist
//! operation, which rewrites the full item set.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,

    /// Owning note
    pub note_id: String,

    pub text: String,

    pub is_checked: bool,

    /// Display order, dense but not required contiguous
    pub position: i32,

    /// Nesting depth, non-negative
    pub indentation: u32,
}

impl ChecklistItem {
    pub fn create(
        note_id: impl Into<String>,
        text: impl Into<String>,
        position: i32,
        indentation: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            note_id: note_id.into(),
            text: text.into(),
            is_checked: false,
            position,
            indentation,
        }
    }
}
