//! # notekeep-core
//!
//! Core types, traits, and session state for the notekeep client.
//!
//! This crate provides the note data model, the error taxonomy, the explicit
//! [`Session`] state machine, and the [`NoteStore`] contract that the HTTP
//! client and the in-memory store both implement.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod memory;
pub mod models;
pub mod session;
pub mod timestamp;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use memory::MemoryNoteStore;
pub use models::{Credentials, Note, NoteDraft, NoteId};
pub use session::{Session, SessionCredential};
pub use traits::{is_blank_query, NoteStore};
