//! In-Memory Store
//!
//! Reference implementation of [`NoteStore`] backed by a single
//! `tokio::sync::RwLock`. Every write method mutates under one write-lock
//! acquisition, which is what makes the rewrite operations atomic: a reader
//! sees the link/checklist set before or after a replacement, never between
//! delete and insert.
//!
//! Change events are broadcast after the lock is released; send failures
//! (no subscribers) are ignored.

use super::events::StoreEvent;
use super::note_store::NoteStore;
use crate::config::TitleMatch;
use crate::models::{ChecklistItem, Folder, Note, NoteLink};
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::{broadcast, RwLock};

/// Broadcast capacity. 128 gives headroom for bursts (bulk imports) while
/// bounding memory; observers only track current state, so lag is fine.
const EVENT_CHANNEL_CAPACITY: usize = 128;

#[derive(Default)]
struct StoreState {
    notes: HashMap<String, Note>,
    folders: HashMap<String, Folder>,
    checklist_items: HashMap<String, Vec<ChecklistItem>>,
    links: Vec<NoteLink>,
}

/// In-memory [`NoteStore`] backend.
pub struct MemoryStore {
    state: RwLock<StoreState>,
    events: broadcast::Sender<StoreEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(StoreState::default()),
            events,
        }
    }

    /// Subscribe to store change events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: StoreEvent) {
        // No subscribers is not an error
        let _ = self.events.send(event);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Newest first; equal timestamps keep insertion order (stable sort).
fn sort_newest_first(links: &mut [NoteLink]) {
    links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn sibling_name_taken(state: &StoreState, folder: &Folder) -> bool {
    state.folders.values().any(|other| {
        other.id != folder.id && other.parent_id == folder.parent_id && other.name == folder.name
    })
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create_note(&self, note: Note) -> Result<Note> {
        {
            let mut state = self.state.write().await;
            if state.notes.contains_key(&note.id) {
                bail!("note already exists: {}", note.id);
            }
            if let Some(folder_id) = &note.folder_id {
                if !state.folders.contains_key(folder_id) {
                    bail!("folder not found: {folder_id}");
                }
            }
            state.notes.insert(note.id.clone(), note.clone());
        }
        self.emit(StoreEvent::NoteCreated(note.clone()));
        Ok(note)
    }

    async fn get_note(&self, id: &str) -> Result<Option<Note>> {
        let state = self.state.read().await;
        Ok(state.notes.get(id).cloned())
    }

    async fn update_note(&self, note: Note) -> Result<Note> {
        {
            let mut state = self.state.write().await;
            if !state.notes.contains_key(&note.id) {
                bail!("note not found: {}", note.id);
            }
            if let Some(folder_id) = &note.folder_id {
                if !state.folders.contains_key(folder_id) {
                    bail!("folder not found: {folder_id}");
                }
            }
            state.notes.insert(note.id.clone(), note.clone());
        }
        self.emit(StoreEvent::NoteUpdated(note.clone()));
        Ok(note)
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        let removed = {
            let mut state = self.state.write().await;
            let removed = state.notes.remove(id).is_some();
            if removed {
                // Cascade: checklist items and every link touching this note
                state.checklist_items.remove(id);
                state
                    .links
                    .retain(|link| link.source_note_id != id && link.target_note_id != id);
            }
            removed
        };
        if removed {
            self.emit(StoreEvent::NoteDeleted { id: id.to_string() });
        }
        Ok(())
    }

    async fn get_all_notes(&self) -> Result<Vec<Note>> {
        let state = self.state.read().await;
        Ok(state
            .notes
            .values()
            .filter(|note| !note.is_trashed && !note.is_archived)
            .cloned()
            .collect())
    }

    async fn get_notes_in_folder(&self, folder_id: Option<&str>) -> Result<Vec<Note>> {
        let state = self.state.read().await;
        Ok(state
            .notes
            .values()
            .filter(|note| {
                note.folder_id.as_deref() == folder_id && !note.is_trashed && !note.is_archived
            })
            .cloned()
            .collect())
    }

    async fn get_trashed_notes(&self) -> Result<Vec<Note>> {
        let state = self.state.read().await;
        Ok(state
            .notes
            .values()
            .filter(|note| note.is_trashed)
            .cloned()
            .collect())
    }

    async fn find_note_by_title(
        &self,
        title: &str,
        matching: TitleMatch,
    ) -> Result<Option<String>> {
        let state = self.state.read().await;
        let matches = state.notes.values().filter(|note| match matching {
            TitleMatch::Exact => note.title == title,
            TitleMatch::CaseInsensitive => note.title.to_lowercase() == title.to_lowercase(),
        });
        // Oldest note wins so resolution is deterministic under duplicates
        Ok(matches
            .min_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.id.cmp(&b.id))
            })
            .map(|note| note.id.clone()))
    }

    async fn create_folder(&self, folder: Folder) -> Result<Folder> {
        {
            let mut state = self.state.write().await;
            if state.folders.contains_key(&folder.id) {
                bail!("folder already exists: {}", folder.id);
            }
            if let Some(parent_id) = &folder.parent_id {
                if !state.folders.contains_key(parent_id) {
                    bail!("parent folder not found: {parent_id}");
                }
            }
            if sibling_name_taken(&state, &folder) {
                bail!("folder name already used among siblings: {}", folder.name);
            }
            state.folders.insert(folder.id.clone(), folder.clone());
        }
        self.emit(StoreEvent::FolderCreated(folder.clone()));
        Ok(folder)
    }

    async fn get_folder(&self, id: &str) -> Result<Option<Folder>> {
        let state = self.state.read().await;
        Ok(state.folders.get(id).cloned())
    }

    async fn update_folder(&self, folder: Folder) -> Result<Folder> {
        {
            let mut state = self.state.write().await;
            if !state.folders.contains_key(&folder.id) {
                bail!("folder not found: {}", folder.id);
            }
            if let Some(parent_id) = &folder.parent_id {
                if parent_id == &folder.id {
                    bail!("folder cannot be its own parent: {}", folder.id);
                }
                if !state.folders.contains_key(parent_id) {
                    bail!("parent folder not found: {parent_id}");
                }
            }
            if sibling_name_taken(&state, &folder) {
                bail!("folder name already used among siblings: {}", folder.name);
            }
            state.folders.insert(folder.id.clone(), folder.clone());
        }
        self.emit(StoreEvent::FolderUpdated(folder.clone()));
        Ok(folder)
    }

    async fn delete_folder(&self, id: &str) -> Result<()> {
        let removed = {
            let mut state = self.state.write().await;
            let Some(folder) = state.folders.remove(id) else {
                return Ok(());
            };
            // Notes become uncategorized, children re-parent upward
            for note in state.notes.values_mut() {
                if note.folder_id.as_deref() == Some(id) {
                    note.folder_id = None;
                }
            }
            let new_parent = folder.parent_id.clone();
            for child in state.folders.values_mut() {
                if child.parent_id.as_deref() == Some(id) {
                    child.parent_id = new_parent.clone();
                }
            }
            true
        };
        if removed {
            self.emit(StoreEvent::FolderDeleted { id: id.to_string() });
        }
        Ok(())
    }

    async fn get_all_folders(&self) -> Result<Vec<Folder>> {
        let state = self.state.read().await;
        let mut folders: Vec<Folder> = state.folders.values().cloned().collect();
        folders.sort_by(|a, b| {
            a.parent_id
                .cmp(&b.parent_id)
                .then_with(|| a.position.cmp(&b.position))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(folders)
    }

    async fn get_checklist_items(&self, note_id: &str) -> Result<Vec<ChecklistItem>> {
        let state = self.state.read().await;
        let mut items = state
            .checklist_items
            .get(note_id)
            .cloned()
            .unwrap_or_default();
        items.sort_by_key(|item| item.position);
        Ok(items)
    }

    async fn replace_checklist_items(
        &self,
        note_id: &str,
        items: Vec<ChecklistItem>,
    ) -> Result<()> {
        {
            let mut state = self.state.write().await;
            if !state.notes.contains_key(note_id) {
                bail!("note not found: {note_id}");
            }
            for item in &items {
                if item.note_id != note_id {
                    bail!(
                        "checklist item {} belongs to note {}, not {note_id}",
                        item.id,
                        item.note_id
                    );
                }
            }
            // Swap in one step under the write lock: the old set is never
            // observable half-deleted
            state.checklist_items.insert(note_id.to_string(), items);
        }
        self.emit(StoreEvent::ChecklistReplaced {
            note_id: note_id.to_string(),
        });
        Ok(())
    }

    async fn replace_links_for_note(&self, source_id: &str, links: Vec<NoteLink>) -> Result<()> {
        let inserted = {
            let mut state = self.state.write().await;
            if !state.notes.contains_key(source_id) {
                bail!("note not found: {source_id}");
            }

            // Validate and dedupe the replacement set before touching state
            let mut seen_targets = HashSet::new();
            let mut inserted = Vec::with_capacity(links.len());
            for link in links {
                if link.source_note_id != source_id {
                    bail!(
                        "link {} has source {}, expected {source_id}",
                        link.id,
                        link.source_note_id
                    );
                }
                if !state.notes.contains_key(&link.target_note_id) {
                    return Err(anyhow!(
                        "link target not found: {}",
                        link.target_note_id
                    ));
                }
                // At most one row per (source, target) pair
                if seen_targets.insert(link.target_note_id.clone()) {
                    inserted.push(link);
                }
            }

            state.links.retain(|link| link.source_note_id != source_id);
            state.links.extend(inserted.iter().cloned());
            inserted
        };
        self.emit(StoreEvent::LinksReplaced {
            source_note_id: source_id.to_string(),
            links: inserted,
        });
        Ok(())
    }

    async fn links_from(&self, note_id: &str) -> Result<Vec<NoteLink>> {
        let state = self.state.read().await;
        let mut links: Vec<NoteLink> = state
            .links
            .iter()
            .filter(|link| link.source_note_id == note_id)
            .cloned()
            .collect();
        sort_newest_first(&mut links);
        Ok(links)
    }

    async fn links_to(&self, note_id: &str) -> Result<Vec<NoteLink>> {
        let state = self.state.read().await;
        let mut links: Vec<NoteLink> = state
            .links
            .iter()
            .filter(|link| link.target_note_id == note_id)
            .cloned()
            .collect();
        sort_newest_first(&mut links);
        Ok(links)
    }

    async fn all_links(&self) -> Result<Vec<NoteLink>> {
        let state = self.state.read().await;
        Ok(state.links.clone())
    }
}
