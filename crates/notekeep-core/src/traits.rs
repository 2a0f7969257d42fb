//! The note store contract.
//!
//! [`NoteStore`] is implemented by the HTTP client and by the in-memory
//! store, so callers and tests can be written once against either.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Note, NoteId};
use crate::session::Session;

/// Session-authenticated access to a user's notes.
///
/// Every note operation requires an authenticated session and fails with
/// [`Error::Unauthorized`](crate::Error::Unauthorized) otherwise. Callers
/// re-fetch after mutations; no operation merges local state.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Create an account. Does not log in.
    async fn register(&self, username: &str, password: &str) -> Result<()>;

    /// Establish a session, replacing any current one.
    ///
    /// On failure the session is left exactly as it was: anonymous callers
    /// stay anonymous and an existing session survives a failed re-login.
    async fn login(&self, username: &str, password: &str) -> Result<()>;

    /// End the session.
    ///
    /// Infallible for the caller: server-side invalidation is attempted, any
    /// failure is logged, and the local session is cleared regardless.
    async fn logout(&self);

    /// All notes of the session owner, in server insertion order.
    ///
    /// A response that is not a list yields an empty result.
    async fn list_notes(&self) -> Result<Vec<Note>>;

    /// A single note by id.
    async fn get_note(&self, id: &NoteId) -> Result<Note>;

    /// Create a note. Blank title or content is rejected without a request.
    async fn create_note(&self, title: &str, content: &str) -> Result<Note>;

    /// Replace title and content of an existing note.
    async fn update_note(&self, id: &NoteId, title: &str, content: &str) -> Result<Note>;

    /// Delete a note; unknown ids fail with `NotFound`.
    async fn delete_note(&self, id: &NoteId) -> Result<()>;

    /// Relevance search. A blank query behaves exactly like [`list_notes`].
    ///
    /// Ranking is defined by the backing store.
    ///
    /// [`list_notes`]: NoteStore::list_notes
    async fn search_notes(&self, query: &str) -> Result<Vec<Note>>;

    /// Snapshot of the local session state.
    async fn session(&self) -> Session;

    async fn is_authenticated(&self) -> bool {
        self.session().await.is_authenticated()
    }

    async fn current_user(&self) -> Option<String> {
        self.session().await.username().map(str::to_string)
    }
}

/// True when a search query should fall back to a plain listing.
pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}
