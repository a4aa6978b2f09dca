//! Service Layer Error Types
//!
//! Parsing never fails; only the stateful operations that depend on the
//! store collaborator can error. Multi-step mutations either fully apply or
//! are rejected before any mutation - there is no partial-application state
//! to report.

use thiserror::Error;

/// Service operation errors
#[derive(Error, Debug)]
pub enum NoteServiceError {
    /// Operation referenced a note id that no longer exists
    #[error("Note not found: {id}")]
    NoteNotFound { id: String },

    /// Operation referenced a folder id that no longer exists
    #[error("Folder not found: {id}")]
    FolderNotFound { id: String },

    /// The requested parent assignment would create a cycle; rejected before
    /// mutation, hierarchy left unchanged
    #[error("Folder hierarchy cycle: {context}")]
    CircularFolderReference { context: String },

    /// Store collaborator call failed; nothing was partially applied
    #[error("Storage unavailable: {0}")]
    Storage(#[from] anyhow::Error),
}

impl NoteServiceError {
    pub fn note_not_found(id: impl Into<String>) -> Self {
        Self::NoteNotFound { id: id.into() }
    }

    pub fn folder_not_found(id: impl Into<String>) -> Self {
        Self::FolderNotFound { id: id.into() }
    }

    pub fn circular_folder_reference(context: impl Into<String>) -> Self {
        Self::CircularFolderReference {
            context: context.into(),
        }
    }
}
