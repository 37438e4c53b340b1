//! Credential store behavior: validation, persistence, single-slot semantics

use brokkr_core::error::ErrorKind;
use brokkr_core::settings::{FileSettingsStore, SettingsStore};
use brokkr_github::{CredentialStore, GitHubConfig, TOKEN_KEY};
use camino::Utf8PathBuf;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> (TempDir, Arc<FileSettingsStore>, CredentialStore) {
    let dir = TempDir::new().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("settings.json")).unwrap();
    let settings = Arc::new(FileSettingsStore::new(path));
    let credentials = CredentialStore::new(
        settings.clone(),
        GitHubConfig::for_base_url(&server.uri()),
    );
    (dir, settings, credentials)
}

async fn mock_identity(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("authorization", format!("Bearer {}", token)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "thisisrober",
            "name": "Robert Lita Jeler",
            "avatar_url": "https://avatars.example/rober"
        })))
        .mount(server)
        .await;
}

async fn mock_rejection(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn save_valid_token_persists_and_returns_identity() {
    let server = MockServer::start().await;
    mock_identity(&server, "ghp_good").await;
    let (_dir, settings, credentials) = store_for(&server);

    let identity = credentials.save("ghp_good").await.unwrap();
    assert_eq!(identity.login, "thisisrober");
    assert_eq!(identity.display_name.as_deref(), Some("Robert Lita Jeler"));
    assert_eq!(settings.get(TOKEN_KEY).unwrap(), Some("ghp_good".into()));
}

#[tokio::test]
async fn save_rejected_token_keeps_previous_token() {
    let server = MockServer::start().await;
    mock_rejection(&server).await;
    let (_dir, settings, credentials) = store_for(&server);
    settings.upsert(TOKEN_KEY, "ghp_previous").unwrap();

    let err = credentials.save("ghp_bad").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Invalid);
    // The stored token is untouched
    assert_eq!(settings.get(TOKEN_KEY).unwrap(), Some("ghp_previous".into()));
}

#[tokio::test]
async fn save_overwrites_single_slot() {
    let server = MockServer::start().await;
    mock_identity(&server, "ghp_new").await;
    let (_dir, settings, credentials) = store_for(&server);
    settings.upsert(TOKEN_KEY, "ghp_old").unwrap();

    credentials.save("ghp_new").await.unwrap();
    assert_eq!(settings.get(TOKEN_KEY).unwrap(), Some("ghp_new".into()));
}

#[tokio::test]
async fn validate_does_not_persist() {
    let server = MockServer::start().await;
    mock_identity(&server, "ghp_tryout").await;
    let (_dir, settings, credentials) = store_for(&server);

    let identity = credentials.validate("ghp_tryout").await.unwrap();
    assert!(identity.is_some());
    assert_eq!(settings.get(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn validate_rejected_token_is_none_not_error() {
    let server = MockServer::start().await;
    mock_rejection(&server).await;
    let (_dir, _settings, credentials) = store_for(&server);

    assert!(credentials.validate("ghp_bad").await.unwrap().is_none());
}

#[tokio::test]
async fn empty_token_fails_validation_locally() {
    let server = MockServer::start().await;
    let (_dir, _settings, credentials) = store_for(&server);

    let err = credentials.save("   ").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn auth_status_without_token() {
    let server = MockServer::start().await;
    let (_dir, _settings, credentials) = store_for(&server);

    let status = credentials.auth_status().await.unwrap();
    assert!(!status.has_token);
    assert!(status.identity.is_none());
}

#[tokio::test]
async fn auth_status_with_stale_token_reports_unconfigured() {
    let server = MockServer::start().await;
    mock_rejection(&server).await;
    let (_dir, settings, credentials) = store_for(&server);
    settings.upsert(TOKEN_KEY, "ghp_revoked").unwrap();

    let status = credentials.auth_status().await.unwrap();
    assert!(!status.has_token);
}

#[tokio::test]
async fn auth_status_with_live_token_resolves_identity() {
    let server = MockServer::start().await;
    mock_identity(&server, "ghp_live").await;
    let (_dir, settings, credentials) = store_for(&server);
    settings.upsert(TOKEN_KEY, "ghp_live").unwrap();

    let status = credentials.auth_status().await.unwrap();
    assert!(status.has_token);
    assert_eq!(status.identity.unwrap().login, "thisisrober");
}
