//! Business Services
//!
//! This module contains the core business logic services:
//!
//! - `NoteService` - note lifecycle, content saves, checklist rewrites
//! - `LinkService` - wiki-link resolution and backlink queries
//! - `FolderService` - folder hierarchy management with cycle rejection
//!
//! Services coordinate between the store layer and application logic,
//! implementing the lifecycle and link-integrity invariants.

pub mod error;
pub mod folder_service;
pub mod link_service;
pub mod note_service;

pub use error::NoteServiceError;
pub use folder_service::FolderService;
pub use link_service::LinkService;
pub use note_service::{CreateNoteParams, NoteService};
