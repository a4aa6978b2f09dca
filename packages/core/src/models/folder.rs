//! Folder Data Structure
//!
//! Folders form a tree via `parent_id`. Acyclicity of the parent chain is a
//! hard invariant, enforced by `FolderService` before any mutation; sibling
//! name uniqueness is enforced by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,

    pub name: String,

    /// Parent folder, or None for a root folder
    pub parent_id: Option<String>,

    /// Display color index
    pub color: i32,

    /// Optional icon identifier
    pub icon: Option<String>,

    /// Sibling ordering (dense but not required contiguous)
    pub position: i32,

    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,

    /// UI-persisted expansion state, not a structural invariant
    pub is_expanded: bool,
}

impl Folder {
    pub fn create(name: impl Into<String>, parent_id: Option<String>, position: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            parent_id,
            color: 0,
            icon: None,
            position,
            created_at: now,
            modified_at: now,
            is_expanded: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults() {
        let folder = Folder::create("Projects", None, 0);
        assert_eq!(folder.name, "Projects");
        assert!(folder.parent_id.is_none());
        assert!(folder.is_expanded);
        assert!(folder.icon.is_none());
    }
}
