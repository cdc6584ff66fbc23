//! Shared test utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use sb_api::ApiClient;
use sb_core::config::StorageConfig;
use sb_core::endpoint::{BuildMode, EndpointConfig};
use sb_core::logging;
use sb_models::{Database, Identity, Session, SqliteStore, TokenStore};
use sb_services::SessionService;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path prefix the mock backend serves under, as the real one does.
pub const API_PREFIX: &str = "/api/v1";

/// Full mock path for an API path.
pub fn api_path(p: &str) -> String {
    format!("{API_PREFIX}{p}")
}

/// Client against the mock backend with the given default timeout.
pub fn create_test_client(server: &MockServer, tokens: TokenStore, timeout: Duration) -> ApiClient {
    create_client_for(&format!("{}{API_PREFIX}", server.uri()), tokens, timeout)
}

pub fn create_client_for(base_url: &str, tokens: TokenStore, timeout: Duration) -> ApiClient {
    logging::init_console_logging("debug");
    ApiClient::new(
        EndpointConfig::new(base_url, timeout),
        tokens,
        BuildMode::Development,
    )
    .expect("failed to build API client")
}

/// Session service against the mock backend with an in-memory token store.
pub fn create_test_service(server: &MockServer) -> SessionService {
    SessionService::new(create_test_client(
        server,
        TokenStore::in_memory(),
        Duration::from_secs(5),
    ))
}

/// Token store over a temporary SQLite database.
/// Returns the TempDir too (must be held alive for the duration of the test).
pub fn create_sqlite_tokens() -> (TokenStore, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let db = Database::init(&dir.path().join("test.db"), &StorageConfig::default())
        .expect("failed to init test database");
    (TokenStore::new(Arc::new(SqliteStore::new(db))), dir)
}

/// Base URL of a local port nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("failed to bind a free port");
    let port = listener.local_addr().expect("no local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}{API_PREFIX}")
}

pub fn test_session() -> Session {
    Session::new(
        "t1",
        Identity {
            id: 7,
            full_name: "A".into(),
            email: "a@b.com".into(),
            avatar: None,
            phone_number: None,
        },
    )
}

/// Mount the canonical successful login for a@b.com.
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(api_path("/auth/login")))
        .and(body_partial_json(json!({ "email": "a@b.com", "password": "secret1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "code": 0,
            "data": { "token": "t1", "id": 7, "fullName": "A" },
            "message": "ok"
        })))
        .mount(server)
        .await;
}
