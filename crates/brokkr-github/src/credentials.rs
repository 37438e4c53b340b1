//! Credential store: a single personal access token, settings-backed.
//!
//! One live token per process, last write wins. Validation happens lazily
//! against the provider's identity endpoint; there is no refresh loop.

use crate::config::GitHubConfig;
use crate::models::UserIdentity;
use brokkr_core::error::{Error, Result};
use brokkr_core::settings::SettingsStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Settings key the token is persisted under
pub const TOKEN_KEY: &str = "github_token";

/// Source of the bearer token the client authenticates with.
///
/// Injected into `GitHubClient` at construction; there is no module-level
/// token slot.
pub trait TokenSource: Send + Sync {
    /// The currently configured token, if any
    fn token(&self) -> Result<Option<String>>;
}

/// Fixed token, used for per-invocation overrides and tests
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenSource for StaticToken {
    fn token(&self) -> Result<Option<String>> {
        Ok(Some(self.0.clone()))
    }
}

/// Result of probing the stored credential
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatus {
    /// A token is stored *and* the provider still accepts it
    pub has_token: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<UserIdentity>,
}

/// Persists and validates the operator's personal access token
pub struct CredentialStore {
    settings: Arc<dyn SettingsStore>,
    config: GitHubConfig,
    http: reqwest::Client,
}

impl CredentialStore {
    pub fn new(settings: Arc<dyn SettingsStore>, config: GitHubConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .expect("Failed to create HTTP client");
        Self {
            settings,
            config,
            http,
        }
    }

    /// The persisted token, if any
    pub fn current(&self) -> Result<Option<String>> {
        self.settings.get(TOKEN_KEY)
    }

    /// Validate a token against the identity endpoint without persisting it.
    ///
    /// `Ok(None)` means the provider rejected the credential; transport
    /// faults and rate limiting are real errors.
    pub async fn validate(&self, token: &str) -> Result<Option<UserIdentity>> {
        let response = self
            .http
            .get(format!("{}/user", self.config.api_url))
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", &self.config.api_version)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::unexpected(format!("Token validation request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let identity: UserIdentity = response
                .json()
                .await
                .map_err(|e| Error::unexpected(format!("Malformed identity payload: {}", e)))?;
            debug!("Token validated for {}", identity.login);
            return Ok(Some(identity));
        }

        if status.as_u16() == 403 && rate_limit_exhausted(&response) {
            return Err(Error::RateLimited);
        }

        if matches!(status.as_u16(), 401 | 403) {
            return Ok(None);
        }

        Err(Error::unexpected(format!(
            "Token validation returned HTTP {}",
            status
        )))
    }

    /// Validate and persist a token. On rejection the previously stored
    /// token (if any) is left untouched.
    pub async fn save(&self, token: &str) -> Result<UserIdentity> {
        if token.trim().is_empty() {
            return Err(Error::validation("Token is required"));
        }

        match self.validate(token).await? {
            Some(identity) => {
                self.settings.upsert(TOKEN_KEY, token)?;
                info!("Stored GitHub token for {}", identity.login);
                Ok(identity)
            }
            None => Err(Error::invalid(
                "Token rejected by GitHub or missing required scopes",
            )),
        }
    }

    /// Report whether a stored token exists and still validates
    pub async fn auth_status(&self) -> Result<AuthStatus> {
        let Some(token) = self.current()? else {
            return Ok(AuthStatus {
                has_token: false,
                identity: None,
            });
        };

        match self.validate(&token).await? {
            Some(identity) => Ok(AuthStatus {
                has_token: true,
                identity: Some(identity),
            }),
            None => Ok(AuthStatus {
                has_token: false,
                identity: None,
            }),
        }
    }
}

impl TokenSource for CredentialStore {
    fn token(&self) -> Result<Option<String>> {
        self.current()
    }
}

pub(crate) fn rate_limit_exhausted(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "0")
        .unwrap_or(false)
}
