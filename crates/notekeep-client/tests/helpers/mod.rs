//! Test helpers for HTTP client tests.
//!
//! Each test file uses a subset of these.
#![allow(dead_code)]

use notekeep_client::{ClientConfig, HttpNoteStore, Session, SessionCredential};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const SESSION_COOKIE: &str = "JSESSIONID=ABC123";

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        timeout_seconds: 5,
        ..ClientConfig::with_base_url(server.uri())
    }
}

/// Store that starts out logged in as alice with [`SESSION_COOKIE`].
pub fn authenticated_store(server: &MockServer) -> HttpNoteStore {
    let session = Session::authenticated("alice", Some(SessionCredential::new(SESSION_COOKIE)));
    HttpNoteStore::with_session(config_for(server), session).expect("Failed to create store")
}

pub fn anonymous_store(server: &MockServer) -> HttpNoteStore {
    HttpNoteStore::new(config_for(server)).expect("Failed to create store")
}

/// A note as the server serializes it: numeric id, naive local timestamp.
pub fn note_json(id: i64, title: &str, content: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": content,
        "createdAt": "2024-03-01T10:00:00.123",
        "updatedAt": "2024-03-01T10:00:00.123",
        "userId": 1
    })
}

/// A base URL nothing listens on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}", addr)
}
