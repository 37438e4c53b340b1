//! Shared helpers for client tests against a wiremock server

use brokkr_core::error::Result;
use brokkr_github::{GitHubClient, GitHubConfig, StaticToken, TokenSource};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "ghp_testtoken";

/// Token source with nothing configured
pub struct NoToken;

impl TokenSource for NoToken {
    fn token(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Client wired to the mock server with a static test token
pub fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::with_config(
        Arc::new(StaticToken(TEST_TOKEN.to_string())),
        GitHubConfig::for_base_url(&server.uri()),
    )
}

/// Client wired to the mock server with no credential configured
pub fn unauthenticated_client(server: &MockServer) -> GitHubClient {
    GitHubClient::with_config(Arc::new(NoToken), GitHubConfig::for_base_url(&server.uri()))
}

/// Minimal repository payload accepted by the `Repository` model
pub fn repo_json(name: &str) -> Value {
    json!({
        "id": 1000 + name.len() as u64,
        "name": name,
        "full_name": format!("thisisrober/{}", name),
        "owner": { "login": "thisisrober" },
        "description": "A test repository",
        "html_url": format!("https://github.com/thisisrober/{}", name),
        "language": "Rust",
        "stargazers_count": 3,
        "forks_count": 1,
        "open_issues_count": 0,
        "private": false,
        "archived": false,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-02-01T00:00:00Z",
        "pushed_at": "2026-02-01T00:00:00Z",
        "default_branch": "main",
        "topics": ["portfolio"],
        "visibility": "public"
    })
}

/// A page of distinct repository payloads
pub fn repo_page(prefix: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| repo_json(&format!("{}-{}", prefix, i)))
        .collect()
}

/// One public event payload
pub fn event_json(event_type: &str, repo: &str) -> Value {
    json!({
        "type": event_type,
        "repo": { "name": repo },
        "created_at": "2026-03-01T12:00:00Z"
    })
}

/// A page of event payloads
pub fn event_page(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| event_json("PushEvent", &format!("thisisrober/repo-{}", i)))
        .collect()
}
