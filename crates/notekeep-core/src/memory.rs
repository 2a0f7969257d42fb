//! In-process note store.
//!
//! Plays both sides of the contract: it keeps accounts, notes, and live
//! server-side sessions, plus the client's local [`Session`]. Useful for
//! exercising the lifecycle without a network or cookie stack.
//!
//! ## Usage
//!
//! ```rust
//! use notekeep_core::{MemoryNoteStore, NoteStore};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let store = MemoryNoteStore::new();
//! store.register("alice", "pw1").await.unwrap();
//! store.login("alice", "pw1").await.unwrap();
//! let note = store.create_note("Groceries", "Milk, eggs").await.unwrap();
//! assert_eq!(store.list_notes().await.unwrap(), vec![note]);
//! # });
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::logging::SUBSYSTEM_MEMORY;
use crate::models::{Credentials, Note, NoteDraft, NoteId};
use crate::session::{Session, SessionCredential};
use crate::traits::{is_blank_query, NoteStore};

const COOKIE_NAME: &str = "MEMSESSION";

#[derive(Debug, Clone)]
struct StoredNote {
    owner: String,
    note: Note,
}

#[derive(Debug, Default)]
struct MemoryState {
    /// username -> password
    accounts: HashMap<String, String>,
    /// Insertion order is list order.
    notes: Vec<StoredNote>,
    /// Server-side sessions: cookie value -> username.
    live_sessions: HashMap<String, String>,
    /// Client-side view.
    session: Session,
}

impl MemoryState {
    fn session_token(&self) -> Option<String> {
        self.session
            .credential()
            .and_then(|c| c.header_value().strip_prefix(&format!("{}=", COOKIE_NAME)))
            .map(str::to_string)
    }

    /// Resolve the caller, clearing the local session if the server no longer
    /// recognizes it.
    fn owner(&mut self) -> Result<String> {
        let username = self
            .session_token()
            .and_then(|t| self.live_sessions.get(&t).cloned());

        match username {
            Some(username) => Ok(username),
            None => {
                if self.session.clear() {
                    warn!(subsystem = SUBSYSTEM_MEMORY, "Session expired");
                }
                Err(Error::Unauthorized("no valid session".to_string()))
            }
        }
    }

    fn position(&self, owner: &str, id: &NoteId) -> Result<usize> {
        self.notes
            .iter()
            .position(|s| s.owner == owner && &s.note.id == id)
            .ok_or_else(|| Error::NotFound(format!("note {}", id)))
    }

    fn notes_of(&self, owner: &str) -> Vec<Note> {
        self.notes
            .iter()
            .filter(|s| s.owner == owner)
            .map(|s| s.note.clone())
            .collect()
    }
}

/// Note store backed by process memory.
#[derive(Clone, Default)]
pub struct MemoryNoteStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate every server-side session while leaving the local session
    /// untouched, as if the server had timed it out.
    pub async fn expire_session(&self) {
        self.state.lock().await.live_sessions.clear();
    }

    /// Number of notes across all accounts.
    pub async fn note_count(&self) -> usize {
        self.state.lock().await.notes.len()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn register(&self, username: &str, password: &str) -> Result<()> {
        let creds = Credentials::new(username, password);
        creds.validate()?;

        let mut state = self.state.lock().await;
        if state.accounts.contains_key(&creds.username) {
            return Err(Error::Conflict("Username already exists".to_string()));
        }
        state.accounts.insert(creds.username.clone(), creds.password);
        info!(subsystem = SUBSYSTEM_MEMORY, op = "register", username = %creds.username, "Account created");
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> Result<()> {
        let creds = Credentials::new(username, password);
        creds.validate()?;

        let mut state = self.state.lock().await;
        if state.accounts.get(&creds.username) != Some(&creds.password) {
            return Err(Error::InvalidCredentials);
        }

        if let Some(previous) = state.session_token() {
            state.live_sessions.remove(&previous);
        }

        let token = Uuid::new_v4().simple().to_string();
        state
            .live_sessions
            .insert(token.clone(), creds.username.clone());
        state.session = Session::authenticated(
            creds.username.clone(),
            Some(SessionCredential::new(format!("{}={}", COOKIE_NAME, token))),
        );
        info!(subsystem = SUBSYSTEM_MEMORY, op = "login", username = %creds.username, "Logged in");
        Ok(())
    }

    async fn logout(&self) {
        let mut state = self.state.lock().await;
        if let Some(token) = state.session_token() {
            state.live_sessions.remove(&token);
        }
        state.session.clear();
        info!(subsystem = SUBSYSTEM_MEMORY, op = "logout", "Logged out");
    }

    async fn list_notes(&self) -> Result<Vec<Note>> {
        let mut state = self.state.lock().await;
        let owner = state.owner()?;
        let notes = state.notes_of(&owner);
        debug!(subsystem = SUBSYSTEM_MEMORY, op = "list_notes", result_count = notes.len());
        Ok(notes)
    }

    async fn get_note(&self, id: &NoteId) -> Result<Note> {
        let mut state = self.state.lock().await;
        let owner = state.owner()?;
        let idx = state.position(&owner, id)?;
        Ok(state.notes[idx].note.clone())
    }

    async fn create_note(&self, title: &str, content: &str) -> Result<Note> {
        let draft = NoteDraft::new(title, content);
        draft.validate()?;

        let mut state = self.state.lock().await;
        let owner = state.owner()?;
        let note = Note {
            id: NoteId::new(Uuid::now_v7().to_string()),
            title: draft.title,
            content: draft.content,
            created_at: Utc::now(),
            updated_at: None,
        };
        state.notes.push(StoredNote {
            owner,
            note: note.clone(),
        });
        info!(subsystem = SUBSYSTEM_MEMORY, op = "create_note", note_id = %note.id, "Note created");
        Ok(note)
    }

    async fn update_note(&self, id: &NoteId, title: &str, content: &str) -> Result<Note> {
        let draft = NoteDraft::new(title, content);
        draft.validate()?;

        let mut state = self.state.lock().await;
        let owner = state.owner()?;
        let idx = state.position(&owner, id)?;
        let note = &mut state.notes[idx].note;
        note.title = draft.title;
        note.content = draft.content;
        note.updated_at = Some(Utc::now());
        info!(subsystem = SUBSYSTEM_MEMORY, op = "update_note", note_id = %id, "Note updated");
        Ok(note.clone())
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        let mut state = self.state.lock().await;
        let owner = state.owner()?;
        let idx = state.position(&owner, id)?;
        state.notes.remove(idx);
        info!(subsystem = SUBSYSTEM_MEMORY, op = "delete_note", note_id = %id, "Note deleted");
        Ok(())
    }

    async fn search_notes(&self, query: &str) -> Result<Vec<Note>> {
        if is_blank_query(query) {
            return self.list_notes().await;
        }

        let needle = query.trim().to_lowercase();
        let mut state = self.state.lock().await;
        let owner = state.owner()?;
        let hits: Vec<Note> = state
            .notes_of(&owner)
            .into_iter()
            .filter(|n| {
                n.title.to_lowercase().contains(&needle)
                    || n.content.to_lowercase().contains(&needle)
            })
            .collect();
        debug!(
            subsystem = SUBSYSTEM_MEMORY,
            op = "search_notes",
            query = %needle,
            result_count = hits.len()
        );
        Ok(hits)
    }

    async fn session(&self) -> Session {
        self.state.lock().await.session.clone()
    }
}
