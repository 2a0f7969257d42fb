//! # notekeep-client
//!
//! Session-authenticated HTTP client for the notes API.
//!
//! This crate provides:
//! - [`HttpNoteStore`], the HTTP implementation of [`NoteStore`]
//! - Environment-driven [`ClientConfig`]
//! - Status classification into the core error taxonomy
//! - Tolerant decoding of list responses
//! - Session persistence and user-visible notices for front ends
//!
//! # Example
//!
//! ```rust,no_run
//! use notekeep_client::{ClientConfig, HttpNoteStore, NoteStore};
//!
//! #[tokio::main]
//! async fn main() -> notekeep_client::Result<()> {
//!     let store = HttpNoteStore::new(ClientConfig::with_base_url("http://localhost:8080/api"))?;
//!     store.login("alice", "pw1").await?;
//!     store.create_note("Groceries", "Milk, eggs").await?;
//!     for note in store.list_notes().await? {
//!         println!("{}: {}", note.id, note.title);
//!     }
//!     store.logout().await;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod decode;
pub mod notice;
pub mod render;
pub mod session_file;
pub mod status;

// Re-export core types
pub use notekeep_core::*;

pub use client::HttpNoteStore;
pub use config::{ClientConfig, ConfigError};
pub use notice::{Action, Notice};
pub use status::Operation;
