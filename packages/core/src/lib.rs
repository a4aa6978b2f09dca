//! Notemark Core Business Logic Layer
//!
//! This crate provides the data model, markdown document model, and wiki-link
//! graph maintenance for the Notemark note-taking system.
//!
//! # Architecture
//!
//! - **Pure parsing**: markdown block/inline parsing and wiki-link extraction
//!   are pure functions with no I/O and no shared state
//! - **Store abstraction**: persistence goes through the [`db::NoteStore`]
//!   trait; an in-memory reference backend is provided for tests and embedding
//! - **Rewrite-on-save**: checklist items and outbound links are replaced
//!   wholesale on every save, never patched incrementally
//!
//! # Modules
//!
//! - [`models`] - Data structures (Note, Folder, ChecklistItem, NoteLink)
//! - [`markdown`] - Block and inline markdown parsers
//! - [`links`] - Wiki-link extraction from raw note content
//! - [`services`] - Business services (NoteService, LinkService, FolderService)
//! - [`db`] - Store trait and in-memory backend

pub mod config;
pub mod db;
pub mod links;
pub mod markdown;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::{CoreConfig, TitleMatch};
pub use links::extract_wiki_links;
pub use markdown::{parse_inline, parse_markdown, BlockNode, InlineNode, ListItem};
pub use models::*;
pub use services::*;
