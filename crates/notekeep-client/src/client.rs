//! HTTP implementation of the note store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client, IntoUrl, Method, RequestBuilder, Response, Url};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use notekeep_core::defaults::{
    ROUTE_LOGIN, ROUTE_LOGOUT, ROUTE_NOTES, ROUTE_REGISTER, ROUTE_SEARCH,
};
use notekeep_core::logging::SUBSYSTEM_CLIENT;
use notekeep_core::{
    is_blank_query, Credentials, Error, Note, NoteDraft, NoteId, NoteStore, Result, Session,
    SessionCredential,
};

use crate::config::ClientConfig;
use crate::decode;
use crate::status::{classify, Operation};

/// Note store backed by the notes HTTP API.
///
/// The session credential is captured from `Set-Cookie` on login and replayed
/// as a `Cookie` header on every request. Cloning shares the session.
#[derive(Clone)]
pub struct HttpNoteStore {
    client: Client,
    config: ClientConfig,
    session: Arc<RwLock<Session>>,
}

impl HttpNoteStore {
    /// Create a store with an anonymous session.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_session(config, Session::Anonymous)
    }

    /// Create a store resuming a previously saved session.
    pub fn with_session(config: ClientConfig, session: Session) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = SUBSYSTEM_CLIENT,
            base_url = %config.base_url,
            resumed = session.is_authenticated(),
            "Initializing note store client"
        );

        Ok(Self {
            client,
            config,
            session: Arc::new(RwLock::new(session)),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a request carrying the session cookie, if any.
    ///
    /// The returned [`Outgoing`] remembers the session it was built under so
    /// that a late response can only affect that session.
    async fn request(&self, method: Method, url: impl IntoUrl) -> Outgoing {
        let sent_as = self.session.read().await.clone();
        let builder = self.client.request(method, url);
        let builder = match sent_as.credential() {
            Some(credential) => builder.header(COOKIE, credential.header_value()),
            None => builder,
        };
        Outgoing { builder, sent_as }
    }

    /// Fail fast for note operations when no session exists locally.
    async fn require_session(&self, op: Operation) -> Result<()> {
        if self.session.read().await.is_authenticated() {
            Ok(())
        } else {
            debug!(subsystem = SUBSYSTEM_CLIENT, op = op.as_str(), "No session, request not sent");
            Err(Error::Unauthorized("not logged in".to_string()))
        }
    }

    /// Send a request and turn non-success statuses into errors.
    ///
    /// Rotated cookies on successful responses are folded into the session.
    /// An authorization failure on a session-bound operation ends the session.
    /// Both only apply while the session is still the one the request was
    /// sent under; a response to a request from an earlier session is ignored.
    async fn send(&self, op: Operation, outgoing: Outgoing) -> Result<Response> {
        let Outgoing { builder, sent_as } = outgoing;
        let start = Instant::now();
        let response = builder.send().await.map_err(|e| {
            warn!(subsystem = SUBSYSTEM_CLIENT, op = op.as_str(), error = %e, "Request failed");
            Error::Request(e.to_string())
        })?;

        let status = response.status();
        debug!(
            subsystem = SUBSYSTEM_CLIENT,
            op = op.as_str(),
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Response received"
        );

        if status.is_success() {
            if op != Operation::Login {
                if let Some(rotated) = set_cookie_credential(&response) {
                    let mut session = self.session.write().await;
                    if *session == sent_as {
                        session.refresh(&rotated);
                    } else {
                        debug!(
                            subsystem = SUBSYSTEM_CLIENT,
                            op = op.as_str(),
                            "Ignoring cookie from a superseded session"
                        );
                    }
                }
            }
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = classify(op, status, &body);

        if err.is_unauthorized() {
            let mut session = self.session.write().await;
            if *session != sent_as {
                debug!(
                    subsystem = SUBSYSTEM_CLIENT,
                    op = op.as_str(),
                    status = status.as_u16(),
                    "Rejection for a superseded session; current session kept"
                );
            } else if session.clear() {
                warn!(
                    subsystem = SUBSYSTEM_CLIENT,
                    op = op.as_str(),
                    status = status.as_u16(),
                    "Session rejected by server, now anonymous"
                );
            }
        }

        Err(err)
    }

    async fn fetch_list(&self, op: Operation, outgoing: Outgoing) -> Result<Vec<Note>> {
        let response = self.send(op, outgoing).await?;
        let body = response.text().await?;
        let notes = decode::note_list(op, &body);
        debug!(
            subsystem = SUBSYSTEM_CLIENT,
            op = op.as_str(),
            result_count = notes.len(),
            "Fetched note list"
        );
        Ok(notes)
    }

    /// URL of a single note, with the id encoded as one path segment.
    ///
    /// `.` and `..` can never name a note and would be resolved away as
    /// path segments, so they fail locally with `NotFound`.
    fn note_url(&self, id: &NoteId) -> Result<Url> {
        if matches!(id.as_str(), "." | "..") {
            return Err(Error::NotFound(format!("note {}", id)));
        }

        let mut url = Url::parse(&self.config.url(ROUTE_NOTES))
            .map_err(|e| Error::Config(format!("Invalid base_url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config("base_url cannot carry a path".to_string()))?
            .push(id.as_str());
        Ok(url)
    }
}

/// A request ready to send, tagged with the session it was built under.
struct Outgoing {
    builder: RequestBuilder,
    sent_as: Session,
}

impl Outgoing {
    fn map(self, f: impl FnOnce(RequestBuilder) -> RequestBuilder) -> Self {
        Self {
            builder: f(self.builder),
            sent_as: self.sent_as,
        }
    }
}

fn set_cookie_credential(response: &Response) -> Option<SessionCredential> {
    SessionCredential::from_set_cookie(
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok()),
    )
}

#[async_trait]
impl NoteStore for HttpNoteStore {
    async fn register(&self, username: &str, password: &str) -> Result<()> {
        let creds = Credentials::new(username, password);
        creds.validate()?;

        let req = self
            .request(Method::POST, self.config.url(ROUTE_REGISTER))
            .await
            .map(|r| r.json(&creds));
        self.send(Operation::Register, req).await?;

        info!(subsystem = SUBSYSTEM_CLIENT, op = "register", username = %creds.username, "Account registered");
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> Result<()> {
        let creds = Credentials::new(username, password);
        creds.validate()?;

        let req = self
            .request(Method::POST, self.config.url(ROUTE_LOGIN))
            .await
            .map(|r| r.json(&creds));
        let response = self.send(Operation::Login, req).await?;

        let credential = set_cookie_credential(&response);
        if credential.is_none() {
            warn!(
                subsystem = SUBSYSTEM_CLIENT,
                op = "login",
                "Login accepted without a session cookie"
            );
        }
        *self.session.write().await = Session::authenticated(creds.username.clone(), credential);

        info!(subsystem = SUBSYSTEM_CLIENT, op = "login", username = %creds.username, "Logged in");
        Ok(())
    }

    async fn logout(&self) {
        // Step 1: best-effort server-side invalidation.
        let req = self.request(Method::POST, self.config.url(ROUTE_LOGOUT)).await;
        if let Err(e) = self.send(Operation::Logout, req).await {
            warn!(
                subsystem = SUBSYSTEM_CLIENT,
                op = "logout",
                error = %e,
                "Logout failed on server; ending local session anyway"
            );
        }

        // Step 2: the local session ends regardless of the outcome above.
        self.session.write().await.clear();
        info!(subsystem = SUBSYSTEM_CLIENT, op = "logout", "Logged out");
    }

    async fn list_notes(&self) -> Result<Vec<Note>> {
        self.require_session(Operation::ListNotes).await?;
        let req = self.request(Method::GET, self.config.url(ROUTE_NOTES)).await;
        self.fetch_list(Operation::ListNotes, req).await
    }

    async fn get_note(&self, id: &NoteId) -> Result<Note> {
        self.require_session(Operation::GetNote).await?;
        let req = self.request(Method::GET, self.note_url(id)?).await;
        let note = self.send(Operation::GetNote, req).await?.json::<Note>().await?;
        Ok(note)
    }

    async fn create_note(&self, title: &str, content: &str) -> Result<Note> {
        let draft = NoteDraft::new(title, content);
        draft.validate()?;
        self.require_session(Operation::CreateNote).await?;

        let req = self
            .request(Method::POST, self.config.url(ROUTE_NOTES))
            .await
            .map(|r| r.json(&draft));
        let note = self
            .send(Operation::CreateNote, req)
            .await?
            .json::<Note>()
            .await?;

        info!(subsystem = SUBSYSTEM_CLIENT, op = "create_note", note_id = %note.id, "Note created");
        Ok(note)
    }

    async fn update_note(&self, id: &NoteId, title: &str, content: &str) -> Result<Note> {
        let draft = NoteDraft::new(title, content);
        draft.validate()?;
        self.require_session(Operation::UpdateNote).await?;

        let req = self
            .request(Method::PUT, self.note_url(id)?)
            .await
            .map(|r| r.json(&draft));
        let note = self
            .send(Operation::UpdateNote, req)
            .await?
            .json::<Note>()
            .await?;

        info!(subsystem = SUBSYSTEM_CLIENT, op = "update_note", note_id = %id, "Note updated");
        Ok(note)
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        self.require_session(Operation::DeleteNote).await?;

        let req = self.request(Method::DELETE, self.note_url(id)?).await;
        self.send(Operation::DeleteNote, req).await?;

        info!(subsystem = SUBSYSTEM_CLIENT, op = "delete_note", note_id = %id, "Note deleted");
        Ok(())
    }

    async fn search_notes(&self, query: &str) -> Result<Vec<Note>> {
        if is_blank_query(query) {
            return self.list_notes().await;
        }
        self.require_session(Operation::SearchNotes).await?;

        let query = query.trim();
        debug!(subsystem = SUBSYSTEM_CLIENT, op = "search_notes", query = %query, "Searching notes");
        let req = self
            .request(Method::GET, self.config.url(ROUTE_SEARCH))
            .await
            .map(|r| r.query(&[("query", query)]));
        self.fetch_list(Operation::SearchNotes, req).await
    }

    async fn session(&self) -> Session {
        self.session.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_url_is_single_segment() {
        let store = HttpNoteStore::new(ClientConfig::default()).unwrap();
        assert_eq!(
            store.note_url(&NoteId::from(12)).unwrap().as_str(),
            "http://localhost:8080/api/notes/12"
        );
        assert_eq!(
            store.note_url(&NoteId::new("a/b?c#d")).unwrap().path(),
            "/api/notes/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn test_dot_ids_are_not_found() {
        let store = HttpNoteStore::new(ClientConfig::default()).unwrap();
        for id in [".", ".."] {
            assert!(matches!(
                store.note_url(&NoteId::new(id)),
                Err(Error::NotFound(_))
            ));
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = HttpNoteStore::new(ClientConfig::with_base_url("localhost:8080"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_new_store_is_anonymous() {
        let store = HttpNoteStore::new(ClientConfig::default()).unwrap();
        assert_eq!(store.session().await, Session::Anonymous);
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_resumed_session_is_shared_by_clones() {
        let session =
            Session::authenticated("alice", Some(SessionCredential::new("JSESSIONID=1")));
        let store = HttpNoteStore::with_session(ClientConfig::default(), session).unwrap();
        let clone = store.clone();

        assert_eq!(clone.current_user().await.as_deref(), Some("alice"));
        store.session.write().await.clear();
        assert!(!clone.is_authenticated().await);
    }
}
