//! Wire models for the GitHub REST and GraphQL APIs

use brokkr_core::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Repository owner as returned inside repo payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// A remote repository. Cached transiently per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: RepoOwner,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub private: bool,
    #[serde(default)]
    pub archived: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub default_branch: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub visibility: Option<String>,
}

/// Repository plus its language byte map, fetched concurrently
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryDetail {
    #[serde(flatten)]
    pub repository: Repository,
    pub languages: BTreeMap<String, u64>,
}

/// A file fetched through the contents API, already base64-decoded.
///
/// `sha` is the revision marker required to update the file in place.
#[derive(Debug, Clone)]
pub struct RemoteFile {
    pub content: String,
    pub sha: String,
}

/// Payload for `POST /user/repos`
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepoRequest {
    pub name: String,
    pub description: String,
    pub private: bool,
    pub auto_init: bool,
}

/// Partial update for `PATCH /repos/{owner}/{repo}`.
///
/// Only populated fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
}

impl RepoPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.private.is_none()
    }
}

/// Identity resolved during token validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    pub login: String,
    #[serde(rename = "name")]
    pub display_name: Option<String>,
    pub avatar_url: String,
}

/// Full profile of the authenticated account, for dashboard display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
    pub html_url: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Collaborator permission level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    Read,
    Write,
    Admin,
}

impl PermissionLevel {
    /// The string GitHub's collaborator endpoints expect
    pub fn as_github_str(&self) -> &'static str {
        match self {
            PermissionLevel::Read => "pull",
            PermissionLevel::Write => "push",
            PermissionLevel::Admin => "admin",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionLevel::Read => write!(f, "read"),
            PermissionLevel::Write => write!(f, "write"),
            PermissionLevel::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for PermissionLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "read" | "pull" => Ok(PermissionLevel::Read),
            "write" | "push" => Ok(PermissionLevel::Write),
            "admin" => Ok(PermissionLevel::Admin),
            other => Err(Error::validation(format!(
                "Unknown permission level '{}'. Expected read, write, or admin",
                other
            ))),
        }
    }
}

/// Raw collaborator payload from the provider
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawCollaborator {
    pub login: String,
    pub avatar_url: String,
    #[serde(default)]
    pub permissions: RawPermissions,
    #[serde(default)]
    pub role_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawPermissions {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub push: bool,
}

/// Collaborator mapped down to what the consuming layer displays
#[derive(Debug, Clone, Serialize)]
pub struct CollaboratorInfo {
    pub login: String,
    pub avatar_url: String,
    pub permission: PermissionLevel,
    pub role_label: String,
}

impl From<RawCollaborator> for CollaboratorInfo {
    fn from(raw: RawCollaborator) -> Self {
        let permission = if raw.permissions.admin {
            PermissionLevel::Admin
        } else if raw.permissions.push {
            PermissionLevel::Write
        } else {
            PermissionLevel::Read
        };
        let role_label = raw
            .role_name
            .unwrap_or_else(|| permission.to_string());
        Self {
            login: raw.login,
            avatar_url: raw.avatar_url,
            permission,
            role_label,
        }
    }
}

/// Raw event payload from `GET /users/{login}/events`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub repo: Option<EventRepo>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EventRepo {
    pub name: String,
}

/// One user activity event, reduced to display fields
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    pub event_type: String,
    pub repo: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<RawEvent> for EventSummary {
    fn from(raw: RawEvent) -> Self {
        Self {
            event_type: raw.event_type,
            repo: raw.repo.map(|r| r.name),
            created_at: raw.created_at,
        }
    }
}

/// Best-effort event fetch result. Page fetch errors end the paging loop
/// and land in `warnings` instead of failing the call.
#[derive(Debug, Clone, Serialize)]
pub struct EventsReport {
    pub events: Vec<EventSummary>,
    pub warnings: Vec<String>,
}

/// A year of daily activity counts plus a running total (GraphQL)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub total_contributions: u64,
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub contribution_count: u64,
    pub date: String,
}
