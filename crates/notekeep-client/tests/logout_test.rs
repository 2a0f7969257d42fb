//! Logout always ends the local session, whatever the server says.

mod helpers;

use helpers::{authenticated_store, closed_port_url, SESSION_COOKIE};
use notekeep_client::{ClientConfig, HttpNoteStore, NoteStore, Session, SessionCredential};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_logout_invalidates_server_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("Cookie", SESSION_COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_string("Logged out successfully"))
        .expect(1)
        .mount(&server)
        .await;

    let store = authenticated_store(&server);
    store.logout().await;

    assert_eq!(store.session().await, Session::Anonymous);
    assert!(store.current_user().await.is_none());
}

#[tokio::test]
async fn test_logout_server_error_still_clears() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let store = authenticated_store(&server);
    store.logout().await;

    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn test_logout_unreachable_server_still_clears() {
    let config = ClientConfig {
        timeout_seconds: 5,
        ..ClientConfig::with_base_url(closed_port_url())
    };
    let session = Session::authenticated("alice", Some(SessionCredential::new(SESSION_COOKIE)));
    let store = HttpNoteStore::with_session(config, session).unwrap();

    store.logout().await;

    assert!(!store.is_authenticated().await);
    assert!(store.list_notes().await.unwrap_err().is_unauthorized());
}

#[tokio::test]
async fn test_logout_is_shared_with_clones() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let store = authenticated_store(&server);
    let other = store.clone();
    store.logout().await;

    assert!(!other.is_authenticated().await);
}
