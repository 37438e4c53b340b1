//! # brokkr-github
//!
//! GitHub integration for the brokkr provisioning stack:
//! - Stateless REST/GraphQL client with pagination and rate-limit mapping
//! - Credential store (single personal access token, settings-backed)
//! - Wire models for repositories, collaborators, and activity data
//!
//! The client performs no automatic retries; every failure is surfaced
//! synchronously with a typed reason so callers compose their own policy.

pub mod client;
pub mod config;
pub mod credentials;
pub mod models;

pub use client::GitHubClient;
pub use config::GitHubConfig;
pub use credentials::{AuthStatus, CredentialStore, StaticToken, TokenSource, TOKEN_KEY};
pub use models::{
    CollaboratorInfo, ContributionCalendar, CreateRepoRequest, EventSummary, EventsReport,
    PermissionLevel, RemoteFile, RepoPatch, Repository, RepositoryDetail, UserIdentity,
    UserProfile,
};
