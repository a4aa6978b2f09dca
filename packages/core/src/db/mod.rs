//! Storage Layer
//!
//! The core never implements durable persistence; it talks to a repository
//! collaborator through the [`NoteStore`] trait. A full in-memory
//! implementation ([`MemoryStore`]) is provided as the reference backend for
//! tests and embedded use.
//!
//! # Architecture
//!
//! - **Abstraction point**: services depend on `Arc<dyn NoteStore>`, never on
//!   a concrete backend
//! - **Reactive boundary**: backends emit [`StoreEvent`]s on a broadcast
//!   channel; the core only writes, it never subscribes
//! - **Atomic rewrites**: link and checklist replacement are single
//!   transactional units; readers see the old set or the new set, never a
//!   partially-deleted state

mod events;
mod memory_store;
mod note_store;

pub use events::StoreEvent;
pub use memory_store::MemoryStore;
pub use note_store::NoteStore;
