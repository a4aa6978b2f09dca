//! NoteStore Trait - Storage Abstraction Layer
//!
//! This trait is the boundary between the note services (business logic) and
//! whatever persistence engine backs them. The core assumes the backend
//! offers CRUD plus indexed lookup by id, title, and foreign key, and that
//! the two replacement operations are transactional.
//!
//! # Design Decisions
//!
//! 1. **Async-first**: all methods are async so embedded and networked
//!    backends share one interface
//! 2. **Ownership semantics**: write methods take owned values; callers clone
//!    if they need to retain the original
//! 3. **Error handling**: `anyhow::Result` for flexible backend error
//!    context; services translate failures into their own error type
//! 4. **Cascade semantics**: hard-deleting a note removes its checklist items
//!    and every link row referencing it as source or target

use crate::config::TitleMatch;
use crate::models::{ChecklistItem, Folder, Note, NoteLink};
use anyhow::Result;
use async_trait::async_trait;

/// Abstraction over note persistence.
///
/// Implementations must be `Send + Sync`; futures may move between threads.
#[async_trait]
pub trait NoteStore: Send + Sync {
    //
    // NOTES
    //

    /// Insert a new note. Fails if the id already exists or `folder_id`
    /// references a missing folder.
    async fn create_note(&self, note: Note) -> Result<Note>;

    /// Fetch a note by id. `Ok(None)` when absent (not an error).
    async fn get_note(&self, id: &str) -> Result<Option<Note>>;

    /// Replace a stored note wholesale. The row is written in one step so
    /// derived fields can never be observed stale relative to content.
    /// Fails if the note does not exist.
    async fn update_note(&self, note: Note) -> Result<Note>;

    /// Hard-delete a note, cascading to its checklist items and to every
    /// link row where it is source or target. Deleting a missing note is a
    /// no-op (idempotent).
    async fn delete_note(&self, id: &str) -> Result<()>;

    /// The main listing: every note that is neither trashed nor archived,
    /// unordered. Trashed and archived notes stay fetchable by id.
    async fn get_all_notes(&self) -> Result<Vec<Note>>;

    /// Notes in a folder; `None` selects uncategorized notes. Applies the
    /// same trashed/archived exclusion as the main listing.
    async fn get_notes_in_folder(&self, folder_id: Option<&str>) -> Result<Vec<Note>>;

    /// Notes currently in the trash.
    async fn get_trashed_notes(&self) -> Result<Vec<Note>>;

    /// Resolve a title to a note id under the given matching policy.
    /// When several notes share a title the oldest wins, deterministically.
    async fn find_note_by_title(&self, title: &str, matching: TitleMatch)
        -> Result<Option<String>>;

    //
    // FOLDERS
    //

    /// Insert a folder. Sibling names must be unique; fails on duplicates
    /// or a missing parent.
    async fn create_folder(&self, folder: Folder) -> Result<Folder>;

    async fn get_folder(&self, id: &str) -> Result<Option<Folder>>;

    /// Replace a stored folder wholesale. Enforces sibling-name uniqueness
    /// and parent existence; it does NOT validate acyclicity - that is the
    /// folder service's job, checked before mutation.
    async fn update_folder(&self, folder: Folder) -> Result<Folder>;

    /// Delete a folder. Its notes become uncategorized (`folder_id` cleared)
    /// and its child folders are re-parented to the deleted folder's parent.
    async fn delete_folder(&self, id: &str) -> Result<()>;

    /// All folders ordered by (parent, position, name).
    async fn get_all_folders(&self) -> Result<Vec<Folder>>;

    //
    // CHECKLIST ITEMS
    //

    /// Items for a note, ordered by position.
    async fn get_checklist_items(&self, note_id: &str) -> Result<Vec<ChecklistItem>>;

    /// Delete-all-then-insert-all rewrite of a note's checklist items, as a
    /// single transactional unit.
    async fn replace_checklist_items(&self, note_id: &str, items: Vec<ChecklistItem>)
        -> Result<()>;

    //
    // LINKS
    //

    /// Delete-all-then-insert-all rewrite of a note's outbound links, as a
    /// single transactional unit. Every link must have `source_note_id ==
    /// source_id` and a target that exists; the (source, target) pair is
    /// unique within the stored set.
    async fn replace_links_for_note(&self, source_id: &str, links: Vec<NoteLink>) -> Result<()>;

    /// Outbound links of a note, most recently created first.
    async fn links_from(&self, note_id: &str) -> Result<Vec<NoteLink>>;

    /// Inbound links of a note, most recently created first.
    async fn links_to(&self, note_id: &str) -> Result<Vec<NoteLink>>;

    /// Every link row, for graph-wide aggregation.
    async fn all_links(&self) -> Result<Vec<NoteLink>>;
}
