//! Note Service - Lifecycle and Content Saves
//!
//! Business logic for notes: creation, the content-save entry point (the one
//! stateful operation of the core), lifecycle flags (pin/archive/trash),
//! hard deletion and trash sweeping, and checklist rewrites.
//!
//! # Content saves
//!
//! `on_note_content_saved` re-derives the plain-text projection and counts
//! together with the content write, then resyncs the note's outbound links.
//! Saves for the same note are serialized through a per-note async lock;
//! saves for different notes proceed in parallel.

use crate::config::CoreConfig;
use crate::db::NoteStore;
use crate::models::{ChecklistItem, Note, NoteColor, NoteLink};
use crate::services::error::NoteServiceError;
use crate::services::link_service::LinkService;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;

/// Parameters for creating a note.
#[derive(Debug, Clone, Default)]
pub struct CreateNoteParams {
    pub title: String,
    pub content: String,
    pub folder_id: Option<String>,
    pub color: NoteColor,
    pub is_checklist: bool,
}

pub struct NoteService {
    store: Arc<dyn NoteStore>,
    links: LinkService,
    config: CoreConfig,
    /// Per-note save locks; same-note saves serialize, different notes don't.
    save_locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>, config: CoreConfig) -> Self {
        let links = LinkService::new(Arc::clone(&store), config.clone());
        Self {
            store,
            links,
            config,
            save_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The link service sharing this service's store and config.
    pub fn links(&self) -> &LinkService {
        &self.links
    }

    fn save_lock(&self, note_id: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.save_locks.lock().expect("save lock map poisoned");
        Arc::clone(
            locks
                .entry(note_id.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
        )
    }

    /// Hard deletes release the note's save lock so the map does not grow
    /// without bound. An in-flight save keeps its own `Arc` clone.
    fn drop_save_lock(&self, note_id: &str) {
        let mut locks = self.save_locks.lock().expect("save lock map poisoned");
        locks.remove(note_id);
    }

    #[cfg(test)]
    fn save_lock_count(&self) -> usize {
        self.save_locks.lock().expect("save lock map poisoned").len()
    }

    /// Create a note; derived fields come from the initial content. Also
    /// resolves any wiki-links the initial content already carries.
    pub async fn create_note(&self, params: CreateNoteParams) -> Result<Note, NoteServiceError> {
        let note = Note::create(
            params.title,
            params.content,
            params.folder_id,
            params.color,
            params.is_checklist,
        );
        let note = self.store.create_note(note).await?;
        self.links.resync_links(&note.id, &note.content).await?;
        tracing::debug!("created note {}", note.id);
        Ok(note)
    }

    pub async fn get_note(&self, id: &str) -> Result<Option<Note>, NoteServiceError> {
        Ok(self.store.get_note(id).await?)
    }

    /// The stateful entry point: persist new title/content, recompute the
    /// derived fields in the same write, then rewrite the outbound link set.
    ///
    /// Concurrent saves of the same note are serialized (last writer wins);
    /// saves of different notes are independent.
    pub async fn on_note_content_saved(
        &self,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<Note, NoteServiceError> {
        let lock = self.save_lock(id);
        let _guard = lock.lock().await;

        let mut note = self.require_note(id).await?;
        note.apply_content(title, content);
        let note = self.store.update_note(note).await?;
        self.links.resync_links(id, &note.content).await?;
        tracing::debug!(
            "saved note {} ({} words, {} chars)",
            id,
            note.word_count,
            note.character_count
        );
        Ok(note)
    }

    pub async fn set_pinned(&self, id: &str, pinned: bool) -> Result<Note, NoteServiceError> {
        let mut note = self.require_note(id).await?;
        note.is_pinned = pinned;
        note.modified_at = Utc::now();
        Ok(self.store.update_note(note).await?)
    }

    pub async fn set_archived(&self, id: &str, archived: bool) -> Result<Note, NoteServiceError> {
        let mut note = self.require_note(id).await?;
        note.is_archived = archived;
        note.modified_at = Utc::now();
        Ok(self.store.update_note(note).await?)
    }

    pub async fn set_color(&self, id: &str, color: NoteColor) -> Result<Note, NoteServiceError> {
        let mut note = self.require_note(id).await?;
        note.color = color;
        note.modified_at = Utc::now();
        Ok(self.store.update_note(note).await?)
    }

    /// Move a note into a folder (or None for uncategorized).
    pub async fn move_note_to_folder(
        &self,
        id: &str,
        folder_id: Option<String>,
    ) -> Result<Note, NoteServiceError> {
        if let Some(folder_id) = &folder_id {
            if self.store.get_folder(folder_id).await?.is_none() {
                return Err(NoteServiceError::folder_not_found(folder_id));
            }
        }
        let mut note = self.require_note(id).await?;
        note.folder_id = folder_id;
        note.modified_at = Utc::now();
        Ok(self.store.update_note(note).await?)
    }

    /// Soft delete. The note's links stay in place while it sits in the
    /// trash; only a hard delete severs them.
    pub async fn move_to_trash(&self, id: &str) -> Result<Note, NoteServiceError> {
        let mut note = self.require_note(id).await?;
        note.mark_trashed();
        Ok(self.store.update_note(note).await?)
    }

    pub async fn restore_from_trash(&self, id: &str) -> Result<Note, NoteServiceError> {
        let mut note = self.require_note(id).await?;
        note.mark_restored();
        Ok(self.store.update_note(note).await?)
    }

    /// Hard delete: cascades to checklist items and every link row touching
    /// the note, in either direction.
    pub async fn delete_note(&self, id: &str) -> Result<(), NoteServiceError> {
        self.store.delete_note(id).await?;
        self.drop_save_lock(id);
        tracing::debug!("hard-deleted note {}", id);
        Ok(())
    }

    /// Hard-delete everything currently in the trash.
    pub async fn empty_trash(&self) -> Result<usize, NoteServiceError> {
        let trashed = self.store.get_trashed_notes().await?;
        let count = trashed.len();
        for note in trashed {
            self.store.delete_note(&note.id).await?;
            self.drop_save_lock(&note.id);
        }
        tracing::info!("emptied trash: {} notes", count);
        Ok(count)
    }

    /// Age-based trash expiry: hard-delete notes trashed longer ago than the
    /// configured retention window. Returns how many were removed.
    pub async fn sweep_trash(&self) -> Result<usize, NoteServiceError> {
        let cutoff = Utc::now() - Duration::days(self.config.trash_retention_days);
        let trashed = self.store.get_trashed_notes().await?;

        let mut removed = 0;
        for note in trashed {
            let expired = note.trashed_at.map(|at| at < cutoff).unwrap_or(false);
            if expired {
                self.store.delete_note(&note.id).await?;
                self.drop_save_lock(&note.id);
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::info!("trash sweep removed {} notes", removed);
        }
        Ok(removed)
    }

    pub async fn get_checklist(&self, note_id: &str) -> Result<Vec<ChecklistItem>, NoteServiceError> {
        self.require_note(note_id).await?;
        Ok(self.store.get_checklist_items(note_id).await?)
    }

    /// Save a note's checklist: the full item set is rewritten in one
    /// transactional step, never patched row by row.
    pub async fn save_checklist(
        &self,
        note_id: &str,
        items: Vec<ChecklistItem>,
    ) -> Result<(), NoteServiceError> {
        self.require_note(note_id).await?;
        self.store.replace_checklist_items(note_id, items).await?;
        Ok(())
    }

    /// Forward links, see [`LinkService::forward_links`].
    pub async fn get_forward_links(
        &self,
        note_id: &str,
        include_trashed: bool,
    ) -> Result<Vec<NoteLink>, NoteServiceError> {
        self.links.forward_links(note_id, include_trashed).await
    }

    /// Backlinks, see [`LinkService::backlinks`].
    pub async fn get_backlinks(
        &self,
        note_id: &str,
        include_trashed: bool,
    ) -> Result<Vec<NoteLink>, NoteServiceError> {
        self.links.backlinks(note_id, include_trashed).await
    }

    /// Most-referenced notes ranking, see [`LinkService::most_linked_notes`].
    pub async fn get_most_linked_notes(
        &self,
        limit: usize,
    ) -> Result<Vec<(String, usize)>, NoteServiceError> {
        self.links.most_linked_notes(limit).await
    }

    async fn require_note(&self, id: &str) -> Result<Note, NoteServiceError> {
        self.store
            .get_note(id)
            .await?
            .ok_or_else(|| NoteServiceError::note_not_found(id))
    }
}
