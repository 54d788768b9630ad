//! Integration tests for session persistence across client restarts.
//!
//! Each test runs a mock classroom service, logs in through the real
//! adapters and then starts a second session manager over the same state
//! file, the way a later CLI invocation does.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;
use std::sync::Arc;

use httpmock::prelude::*;
use serde_json::json;
use tempfile::tempdir;

use classroom_application::ports::KeyValueStore;
use classroom_application::session::{EXPIRY_KEY, TOKEN_KEY, USER_KEY};
use classroom_application::{SessionConfig, SessionHandle, SessionManager, SessionStatus};
use classroom_domain::ClientSettings;
use classroom_infrastructure::{
    ClassroomClient, FileKeyValueStore, ReqwestClient, RestAuthApi, SystemClock,
};

fn settings(server: &MockServer) -> ClientSettings {
    ClientSettings {
        api_base_url: server.base_url(),
        ..ClientSettings::default()
    }
}

fn start_session(server: &MockServer, state: &Path) -> (SessionHandle, ReqwestClient) {
    let settings = settings(server);
    let transport = ReqwestClient::new(&settings).unwrap();
    let handle = SessionManager::new(
        Arc::new(RestAuthApi::new(transport.clone())),
        Arc::new(FileKeyValueStore::open(state).unwrap()),
        Arc::new(SystemClock::new()),
        SessionConfig::from(&settings),
    )
    .spawn();
    (handle, transport)
}

fn mock_login(server: &MockServer) {
    server.mock(|when, then| {
        when.method(POST)
            .path("/auth/login")
            .body("username=alice&password=secret");
        then.status(200)
            .json_body(json!({"access_token": "tok-1", "token_type": "bearer"}));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/auth/dashboard")
            .header("authorization", "Bearer tok-1");
        then.status(200).json_body(json!({
            "id": 1,
            "name": "alice",
            "role": "teacher",
            "created_at": "2025-03-01T10:00:00",
            "updated_at": "2025-03-01T10:00:00"
        }));
    });
}

#[tokio::test]
async fn test_login_is_restored_by_next_invocation() {
    let server = MockServer::start_async().await;
    mock_login(&server);
    let dir = tempdir().unwrap();
    let state = dir.path().join("session.json");

    let (first, _) = start_session(&server, &state);
    first.login("alice", "secret").await.unwrap();
    drop(first);

    let stored = FileKeyValueStore::open(&state).unwrap();
    assert_eq!(stored.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
    assert!(stored.get(USER_KEY).unwrap().unwrap().contains("\"teacher\""));
    assert!(stored.get(EXPIRY_KEY).unwrap().is_some());

    let (second, transport) = start_session(&server, &state);
    let classes = server.mock(|when, then| {
        when.method(GET)
            .path("/classes/my-classes")
            .header("authorization", "Bearer tok-1");
        then.status(200).json_body(json!([]));
    });
    let client = ClassroomClient::new(transport, second);

    assert!(client.my_classes().await.unwrap().is_empty());
    classes.assert();
    assert!(matches!(
        client.session().status().await,
        SessionStatus::Active { .. }
    ));
}

#[tokio::test]
async fn test_logout_clears_state_file_even_when_rejected() {
    let server = MockServer::start_async().await;
    mock_login(&server);
    let logout = server.mock(|when, then| {
        when.method(POST).path("/auth/logout");
        then.status(401)
            .json_body(json!({"detail": "Could not validate credentials"}));
    });
    let dir = tempdir().unwrap();
    let state = dir.path().join("session.json");

    let (handle, _) = start_session(&server, &state);
    handle.login("alice", "secret").await.unwrap();
    handle.logout().await;

    logout.assert_hits(1);
    let stored = FileKeyValueStore::open(&state).unwrap();
    for key in [TOKEN_KEY, USER_KEY, EXPIRY_KEY] {
        assert_eq!(stored.get(key).unwrap(), None);
    }
    assert_eq!(handle.status().await, SessionStatus::Unauthenticated);
}

#[tokio::test]
async fn test_corrupt_persisted_user_starts_unauthenticated() {
    let server = MockServer::start_async().await;
    let dir = tempdir().unwrap();
    let state = dir.path().join("session.json");
    let far_future = "4102444800000";
    std::fs::write(
        &state,
        json!({
            TOKEN_KEY: "tok-1",
            USER_KEY: "{\"id\":1,\"name\":\"alice\"}",
            EXPIRY_KEY: far_future
        })
        .to_string(),
    )
    .unwrap();

    let (handle, _) = start_session(&server, &state);

    assert_eq!(handle.current_credential().await, None);
    assert_eq!(handle.status().await, SessionStatus::Unauthenticated);
}
