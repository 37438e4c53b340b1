//! GitHub REST and GraphQL client
//!
//! Stateless per request: every call resolves the token, issues the HTTP
//! request, and maps the response status to the error taxonomy. No caching,
//! no automatic retries.

use crate::config::GitHubConfig;
use crate::credentials::{rate_limit_exhausted, TokenSource};
use crate::models::{
    CollaboratorInfo, ContributionCalendar, CreateRepoRequest, EventSummary, EventsReport,
    PermissionLevel, RawCollaborator, RawEvent, RemoteFile, RepoPatch, Repository,
    RepositoryDetail, UserIdentity, UserProfile,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use brokkr_core::error::{Error, ErrorKind, Result};
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Page size for repository and event listings
const PAGE_SIZE: usize = 100;

/// Cap on best-effort event pages (the API stops at ~300 events anyway)
const MAX_EVENT_PAGES: usize = 10;

const CONTRIBUTION_QUERY: &str = "query($username: String!) {
  user(login: $username) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}";

/// Authenticated GitHub client
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    config: GitHubConfig,
    tokens: Arc<dyn TokenSource>,
    override_token: Option<String>,
}

impl GitHubClient {
    /// Create a client reading its credential from `tokens`
    pub fn new(tokens: Arc<dyn TokenSource>) -> Self {
        Self::with_config(tokens, GitHubConfig::default())
    }

    /// Create a client with explicit endpoints (tests, enterprise hosts)
    pub fn with_config(tokens: Arc<dyn TokenSource>, config: GitHubConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .expect("Failed to create HTTP client");
        Self {
            http,
            config,
            tokens,
            override_token: None,
        }
    }

    /// Use `token` for every call in this client's lifetime instead of the
    /// configured source. Lets an operator exercise an unsaved token.
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        self.override_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Resolve the effective token, failing before any network call when
    /// none is configured
    fn resolve_token(&self) -> Result<String> {
        if let Some(token) = &self.override_token {
            return Ok(token.clone());
        }
        self.tokens.token()?.ok_or(Error::Unauthenticated)
    }

    fn rest(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.config.api_url, path))
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", &self.config.api_version)
            .bearer_auth(token)
    }

    async fn send(&self, request: RequestBuilder, resource: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::unexpected(format!("Request to GitHub failed: {}", e)))?;
        check_status(response, resource).await
    }

    // ---- Identity -------------------------------------------------------

    /// The authenticated account's full profile
    pub async fn get_user(&self) -> Result<UserProfile> {
        let token = self.resolve_token()?;
        let response = self
            .send(self.rest(Method::GET, "/user", &token), "user")
            .await?;
        parse_json(response).await
    }

    /// Identity behind the effective token (login, display name, avatar)
    pub async fn get_identity(&self) -> Result<UserIdentity> {
        let token = self.resolve_token()?;
        let response = self
            .send(self.rest(Method::GET, "/user", &token), "user")
            .await?;
        parse_json(response).await
    }

    // ---- Repositories ---------------------------------------------------

    /// All repositories owned by the authenticated user.
    ///
    /// Pages at a fixed size until a short page signals the end; re-pages
    /// from scratch on every call.
    pub async fn list_repositories(&self) -> Result<Vec<Repository>> {
        let token = self.resolve_token()?;
        let mut repos = Vec::new();
        let mut page = 1usize;

        loop {
            let path = format!(
                "/user/repos?per_page={}&page={}&sort=updated&affiliation=owner",
                PAGE_SIZE, page
            );
            let response = self
                .send(self.rest(Method::GET, &path, &token), "repositories")
                .await?;
            let batch: Vec<Repository> = parse_json(response).await?;
            let batch_len = batch.len();
            repos.extend(batch);
            if batch_len < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        debug!("Listed {} repositories over {} page(s)", repos.len(), page);
        Ok(repos)
    }

    /// Single repository read
    pub async fn get_repository(&self, owner: &str, name: &str) -> Result<Repository> {
        let token = self.resolve_token()?;
        let path = format!("/repos/{}/{}", owner, name);
        let resource = format!("repository {}/{}", owner, name);
        let response = self
            .send(self.rest(Method::GET, &path, &token), &resource)
            .await?;
        parse_json(response).await
    }

    /// Language byte map for a repository
    pub async fn get_languages(&self, owner: &str, name: &str) -> Result<BTreeMap<String, u64>> {
        let token = self.resolve_token()?;
        let path = format!("/repos/{}/{}/languages", owner, name);
        let resource = format!("languages for {}/{}", owner, name);
        let response = self
            .send(self.rest(Method::GET, &path, &token), &resource)
            .await?;
        parse_json(response).await
    }

    /// Repository and its languages, fetched concurrently
    pub async fn get_repository_detail(&self, owner: &str, name: &str) -> Result<RepositoryDetail> {
        let (repository, languages) = tokio::try_join!(
            self.get_repository(owner, name),
            self.get_languages(owner, name)
        )?;
        Ok(RepositoryDetail {
            repository,
            languages,
        })
    }

    /// Create a repository for the authenticated user.
    ///
    /// Fails with `Conflict` when the name is already taken.
    pub async fn create_repository(&self, request: &CreateRepoRequest) -> Result<Repository> {
        let token = self.resolve_token()?;
        let resource = format!("repository {}", request.name);
        let response = self
            .send(
                self.rest(Method::POST, "/user/repos", &token).json(request),
                &resource,
            )
            .await?;
        parse_json(response).await
    }

    /// Patch repository metadata. Passthrough; diffing is the caller's job.
    pub async fn update_repository(
        &self,
        owner: &str,
        name: &str,
        patch: &RepoPatch,
    ) -> Result<Repository> {
        let token = self.resolve_token()?;
        let path = format!("/repos/{}/{}", owner, name);
        let resource = format!("repository {}/{}", owner, name);
        let response = self
            .send(self.rest(Method::PATCH, &path, &token).json(patch), &resource)
            .await?;
        parse_json(response).await
    }

    /// Delete a repository. Irreversible; never retried automatically.
    pub async fn delete_repository(&self, owner: &str, name: &str) -> Result<()> {
        let token = self.resolve_token()?;
        let path = format!("/repos/{}/{}", owner, name);
        let resource = format!("repository {}/{}", owner, name);
        self.send(self.rest(Method::DELETE, &path, &token), &resource)
            .await?;
        Ok(())
    }

    // ---- Contents -------------------------------------------------------

    /// Fetch one file. `None` when the file does not exist; callers must
    /// not treat a missing file as failure.
    pub async fn get_file_content(
        &self,
        owner: &str,
        name: &str,
        path: &str,
    ) -> Result<Option<RemoteFile>> {
        let token = self.resolve_token()?;
        let api_path = format!("/repos/{}/{}/contents/{}", owner, name, path);
        let resource = format!("file {} in {}/{}", path, owner, name);
        let response = match self
            .send(self.rest(Method::GET, &api_path, &token), &resource)
            .await
        {
            Ok(response) => response,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        #[derive(Deserialize)]
        struct ContentsPayload {
            content: String,
            sha: String,
        }

        let payload: ContentsPayload = parse_json(response).await?;
        Ok(Some(RemoteFile {
            content: decode_base64_content(&payload.content)?,
            sha: payload.sha,
        }))
    }

    /// Fetch the repository README via the dedicated endpoint. `None` when
    /// the repository has no README.
    pub async fn get_readme(&self, owner: &str, name: &str) -> Result<Option<String>> {
        let token = self.resolve_token()?;
        let api_path = format!("/repos/{}/{}/readme", owner, name);
        let resource = format!("readme of {}/{}", owner, name);
        let response = match self
            .send(self.rest(Method::GET, &api_path, &token), &resource)
            .await
        {
            Ok(response) => response,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        #[derive(Deserialize)]
        struct ReadmePayload {
            content: String,
        }

        let payload: ReadmePayload = parse_json(response).await?;
        Ok(Some(decode_base64_content(&payload.content)?))
    }

    /// Create or update a file through the contents API.
    ///
    /// With `sha` set, the write is an update and must match the file's
    /// current revision marker; without it, the write is a create and fails
    /// with `Conflict` if the file already exists.
    pub async fn create_or_update_file(
        &self,
        owner: &str,
        name: &str,
        path: &str,
        content: &str,
        message: &str,
        sha: Option<&str>,
    ) -> Result<()> {
        let token = self.resolve_token()?;
        let api_path = format!("/repos/{}/{}/contents/{}", owner, name, path);
        let resource = format!("file {} in {}/{}", path, owner, name);

        let mut body = json!({
            "message": message,
            "content": BASE64.encode(content.as_bytes()),
        });
        if let Some(sha) = sha {
            body["sha"] = json!(sha);
        }

        self.send(self.rest(Method::PUT, &api_path, &token).json(&body), &resource)
            .await?;
        Ok(())
    }

    // ---- Collaborators --------------------------------------------------

    /// Collaborators on a repository, mapped to display fields
    pub async fn list_collaborators(&self, owner: &str, name: &str) -> Result<Vec<CollaboratorInfo>> {
        let token = self.resolve_token()?;
        let path = format!("/repos/{}/{}/collaborators", owner, name);
        let resource = format!("collaborators of {}/{}", owner, name);
        let response = self
            .send(self.rest(Method::GET, &path, &token), &resource)
            .await?;
        let raw: Vec<RawCollaborator> = parse_json(response).await?;
        Ok(raw.into_iter().map(CollaboratorInfo::from).collect())
    }

    /// Invite a collaborator, or update the permission of an existing one
    pub async fn add_collaborator(
        &self,
        owner: &str,
        name: &str,
        login: &str,
        permission: PermissionLevel,
    ) -> Result<()> {
        let token = self.resolve_token()?;
        let path = format!("/repos/{}/{}/collaborators/{}", owner, name, login);
        let resource = format!("collaborator {} on {}/{}", login, owner, name);
        let body = json!({ "permission": permission.as_github_str() });
        self.send(self.rest(Method::PUT, &path, &token).json(&body), &resource)
            .await?;
        Ok(())
    }

    /// Remove a collaborator
    pub async fn remove_collaborator(&self, owner: &str, name: &str, login: &str) -> Result<()> {
        let token = self.resolve_token()?;
        let path = format!("/repos/{}/{}/collaborators/{}", owner, name, login);
        let resource = format!("collaborator {} on {}/{}", login, owner, name);
        self.send(self.rest(Method::DELETE, &path, &token), &resource)
            .await?;
        Ok(())
    }

    // ---- Activity -------------------------------------------------------

    /// Recent public events for a user, best-effort.
    ///
    /// Pages up to a fixed cap, stops early on a short page, and converts
    /// page-fetch failures into warnings instead of failing the call. Used
    /// only for display, never for control decisions.
    pub async fn get_user_events(&self, login: &str) -> Result<EventsReport> {
        let token = self.resolve_token()?;
        let mut events: Vec<EventSummary> = Vec::new();
        let mut warnings = Vec::new();

        for page in 1..=MAX_EVENT_PAGES {
            let path = format!(
                "/users/{}/events?per_page={}&page={}",
                login, PAGE_SIZE, page
            );
            let resource = format!("events for {}", login);
            let batch: Vec<RawEvent> = match self
                .send(self.rest(Method::GET, &path, &token), &resource)
                .await
            {
                Ok(response) => match parse_json(response).await {
                    Ok(batch) => batch,
                    Err(e) => {
                        warn!("Stopping event paging at page {}: {}", page, e);
                        warnings.push(format!("events page {}: {}", page, e));
                        break;
                    }
                },
                Err(e) => {
                    warn!("Stopping event paging at page {}: {}", page, e);
                    warnings.push(format!("events page {}: {}", page, e));
                    break;
                }
            };

            if batch.is_empty() {
                break;
            }
            let batch_len = batch.len();
            events.extend(batch.into_iter().map(EventSummary::from));
            if batch_len < PAGE_SIZE {
                break;
            }
        }

        Ok(EventsReport { events, warnings })
    }

    /// A year of daily contribution counts via a single GraphQL query
    pub async fn get_contribution_calendar(&self, login: &str) -> Result<ContributionCalendar> {
        let token = self.resolve_token()?;

        let body = json!({
            "query": CONTRIBUTION_QUERY,
            "variables": { "username": login },
        });

        let response = self
            .http
            .post(&self.config.graphql_url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::unexpected(format!("GraphQL request failed: {}", e)))?;

        let response = check_status(response, "contribution calendar").await?;

        #[derive(Deserialize)]
        struct Envelope {
            data: Option<Data>,
            errors: Option<Vec<GraphQlError>>,
        }
        #[derive(Deserialize)]
        struct Data {
            user: Option<UserNode>,
        }
        #[derive(Deserialize)]
        struct UserNode {
            #[serde(rename = "contributionsCollection")]
            contributions_collection: ContributionsCollection,
        }
        #[derive(Deserialize)]
        struct ContributionsCollection {
            #[serde(rename = "contributionCalendar")]
            contribution_calendar: ContributionCalendar,
        }
        #[derive(Deserialize)]
        struct GraphQlError {
            message: String,
        }

        let envelope: Envelope = parse_json(response).await?;

        if let Some(errors) = envelope.errors {
            if let Some(first) = errors.first() {
                return Err(Error::unexpected(format!(
                    "GitHub GraphQL error: {}",
                    first.message
                )));
            }
        }

        envelope
            .data
            .and_then(|d| d.user)
            .map(|u| u.contributions_collection.contribution_calendar)
            .ok_or_else(|| Error::not_found(format!("user {}", login)))
    }
}

/// Map a non-success response to the error taxonomy.
///
/// 403 with a zero remaining-quota header is `RateLimited`, distinct from
/// every auth failure.
async fn check_status(response: Response, resource: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let exhausted = rate_limit_exhausted(&response);
    let message = provider_message(response).await;

    match status.as_u16() {
        403 if exhausted => Err(Error::RateLimited),
        401 => Err(Error::invalid(
            message.unwrap_or_else(|| "Bad credentials".to_string()),
        )),
        403 => Err(Error::invalid(message.unwrap_or_else(|| {
            format!("Access to {} forbidden", resource)
        }))),
        404 => Err(Error::not_found(resource)),
        409 | 422 => Err(Error::conflict(message.unwrap_or_else(|| {
            format!("Conflicting state for {}", resource)
        }))),
        _ => Err(Error::unexpected(
            message.unwrap_or_else(|| format!("GitHub API error: {}", status)),
        )),
    }
}

/// Best-effort extraction of GitHub's `message` field from an error body
async fn provider_message(response: Response) -> Option<String> {
    #[derive(Deserialize)]
    struct ApiMessage {
        message: Option<String>,
    }
    response
        .json::<ApiMessage>()
        .await
        .ok()
        .and_then(|m| m.message)
}

async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| Error::unexpected(format!("Malformed provider response: {}", e)))
}

/// The contents API returns base64 with embedded newlines
fn decode_base64_content(raw: &str) -> Result<String> {
    let compact: String = raw.split_whitespace().collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| Error::unexpected(format!("Invalid base64 file content: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::unexpected(format!("File content is not UTF-8: {}", e)))
}
