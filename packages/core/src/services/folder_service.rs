//! Folder Service - Hierarchy Management
//!
//! Folder mutations that can affect the tree shape go through here so the
//! acyclicity invariant is checked before anything is written. The walk is
//! bounded: a chain longer than the cap is treated as corrupt and rejected
//! rather than looped over forever.

use crate::db::NoteStore;
use crate::models::Folder;
use crate::services::error::NoteServiceError;
use chrono::Utc;
use std::sync::Arc;

/// Ancestor chains longer than this are considered corrupt.
const MAX_FOLDER_DEPTH: usize = 1000;

pub struct FolderService {
    store: Arc<dyn NoteStore>,
}

impl FolderService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<String>,
        position: i32,
    ) -> Result<Folder, NoteServiceError> {
        if let Some(parent_id) = &parent_id {
            if self.store.get_folder(parent_id).await?.is_none() {
                return Err(NoteServiceError::folder_not_found(parent_id));
            }
        }
        let folder = self
            .store
            .create_folder(Folder::create(name, parent_id, position))
            .await?;
        tracing::debug!("created folder {} ({})", folder.name, folder.id);
        Ok(folder)
    }

    pub async fn get_folder(&self, id: &str) -> Result<Option<Folder>, NoteServiceError> {
        Ok(self.store.get_folder(id).await?)
    }

    pub async fn get_all_folders(&self) -> Result<Vec<Folder>, NoteServiceError> {
        Ok(self.store.get_all_folders().await?)
    }

    /// Re-parent a folder. Rejected with `CircularFolderReference` if the new
    /// parent is the folder itself or any of its descendants; on rejection
    /// the hierarchy is left untouched.
    pub async fn move_folder(
        &self,
        id: &str,
        new_parent_id: Option<String>,
    ) -> Result<Folder, NoteServiceError> {
        let mut folder = self.require_folder(id).await?;

        if let Some(parent_id) = &new_parent_id {
            if parent_id == id {
                return Err(NoteServiceError::circular_folder_reference(format!(
                    "folder {id} cannot be its own parent"
                )));
            }
            if self.store.get_folder(parent_id).await?.is_none() {
                return Err(NoteServiceError::folder_not_found(parent_id));
            }
            self.ensure_not_descendant(id, parent_id).await?;
        }

        folder.parent_id = new_parent_id;
        folder.modified_at = Utc::now();
        Ok(self.store.update_folder(folder).await?)
    }

    pub async fn rename_folder(&self, id: &str, name: &str) -> Result<Folder, NoteServiceError> {
        let mut folder = self.require_folder(id).await?;
        folder.name = name.to_string();
        folder.modified_at = Utc::now();
        Ok(self.store.update_folder(folder).await?)
    }

    pub async fn set_expanded(
        &self,
        id: &str,
        is_expanded: bool,
    ) -> Result<Folder, NoteServiceError> {
        let mut folder = self.require_folder(id).await?;
        folder.is_expanded = is_expanded;
        Ok(self.store.update_folder(folder).await?)
    }

    pub async fn set_position(&self, id: &str, position: i32) -> Result<Folder, NoteServiceError> {
        let mut folder = self.require_folder(id).await?;
        folder.position = position;
        folder.modified_at = Utc::now();
        Ok(self.store.update_folder(folder).await?)
    }

    /// Delete a folder; its notes become uncategorized and child folders move
    /// up to the deleted folder's parent.
    pub async fn delete_folder(&self, id: &str) -> Result<(), NoteServiceError> {
        self.store.delete_folder(id).await?;
        tracing::debug!("deleted folder {}", id);
        Ok(())
    }

    /// Walk the ancestor chain upward from `candidate_parent`; finding
    /// `folder_id` on the way means the move would create a cycle.
    async fn ensure_not_descendant(
        &self,
        folder_id: &str,
        candidate_parent: &str,
    ) -> Result<(), NoteServiceError> {
        let mut current = Some(candidate_parent.to_string());
        let mut depth = 0;

        while let Some(id) = current {
            if id == folder_id {
                return Err(NoteServiceError::circular_folder_reference(format!(
                    "{candidate_parent} is a descendant of {folder_id}"
                )));
            }
            depth += 1;
            if depth > MAX_FOLDER_DEPTH {
                return Err(NoteServiceError::circular_folder_reference(format!(
                    "ancestor chain of {candidate_parent} exceeds {MAX_FOLDER_DEPTH} levels"
                )));
            }
            current = match self.store.get_folder(&id).await? {
                Some(folder) => folder.parent_id,
                None => None,
            };
        }
        Ok(())
    }

    async fn require_folder(&self, id: &str) -> Result<Folder, NoteServiceError> {
        self.store
            .get_folder(id)
            .await?
            .ok_or_else(|| NoteServiceError::folder_not_found(id))
    }
}
