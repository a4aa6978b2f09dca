//! Store Change Events
//!
//! Backends emit these on a `tokio::sync::broadcast` channel whenever data
//! changes. They are the reactive seam the UI layer subscribes to; the core
//! itself only triggers writes and never subscribes. Lagging observers are
//! acceptable - subscribers track current state, not history.

use crate::models::{Folder, Note, NoteLink};

/// A change that happened in the store.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    NoteCreated(Note),
    NoteUpdated(Note),
    NoteDeleted { id: String },

    FolderCreated(Folder),
    FolderUpdated(Folder),
    FolderDeleted { id: String },

    /// A note's outbound link set was rewritten
    LinksReplaced {
        source_note_id: String,
        links: Vec<NoteLink>,
    },

    /// A note's checklist items were rewritten
    ChecklistReplaced { note_id: String },
}

impl StoreEvent {
    /// Stable string tag, useful for logging and event forwarding.
    pub fn event_type(&self) -> &str {
        match self {
            StoreEvent::NoteCreated(_) => "note:created",
            StoreEvent::NoteUpdated(_) => "note:updated",
            StoreEvent::NoteDeleted { .. } => "note:deleted",
            StoreEvent::FolderCreated(_) => "folder:created",
            StoreEvent::FolderUpdated(_) => "folder:updated",
            StoreEvent::FolderDeleted { .. } => "folder:deleted",
            StoreEvent::LinksReplaced { .. } => "links:replaced",
            StoreEvent::ChecklistReplaced { .. } => "checklist:replaced",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteColor;

    #[test]
    fn test_event_type_tags() {
        let note = Note::create("t", "c", None, NoteColor::Default, false);
        assert_eq!(StoreEvent::NoteCreated(note).event_type(), "note:created");
        assert_eq!(
            StoreEvent::NoteDeleted {
                id: "x".to_string()
            }
            .event_type(),
            "note:deleted"
        );
        assert_eq!(
            StoreEvent::LinksReplaced {
                source_note_id: "x".to_string(),
                links: vec![],
            }
            .event_type(),
            "links:replaced"
        );
    }
}
