//! Data Models
//!
//! This module contains the core data structures used throughout Notemark:
//!
//! - `Note` - A markdown note with derived plain-text projection and counts
//! - `Folder` - Hierarchical organization for notes
//! - `ChecklistItem` - A row of a checklist-mode note
//! - `NoteLink` - One directed wiki-reference between two notes

mod checklist;
mod folder;
mod link;
mod note;

pub use checklist::ChecklistItem;
pub use folder::Folder;
pub use link::NoteLink;
pub use note::{Note, NoteColor};
