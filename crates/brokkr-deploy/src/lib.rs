//! # brokkr-deploy
//!
//! Local preview deployments: one shallow working clone per repository
//! under a fixed projects root. Directory existence is the sole source of
//! truth for "deployed"; there is no manifest.
//!
//! Lifecycle: created by clone, refreshed by fast-forward pull, destroyed
//! by recursive removal. Removal of a non-existent deployment is a no-op
//! success.

use brokkr_core::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tokio::process::Command;
use tracing::{debug, info};
use url::Url;

/// How a deploy call satisfied the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployAction {
    /// Fresh shallow clone
    Cloned,
    /// Existing checkout fast-forwarded
    Updated,
}

/// Result of a deploy call
#[derive(Debug, Clone, Serialize)]
pub struct DeployOutcome {
    pub path: Utf8PathBuf,
    pub action: DeployAction,
    /// Public preview path served by the site
    pub live_link: String,
}

/// Filesystem-derived deployment state
#[derive(Debug, Clone, Serialize)]
pub struct DeployStatus {
    pub deployed: bool,
    pub path: Option<Utf8PathBuf>,
    pub live_link: Option<String>,
}

/// Manages the local projects tree
#[derive(Debug, Clone)]
pub struct DeploymentManager {
    projects_root: Utf8PathBuf,
    transport_base: String,
}

impl DeploymentManager {
    pub fn new(projects_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            projects_root: projects_root.into(),
            transport_base: "https://github.com".to_string(),
        }
    }

    /// Clone from a different host (tests clone from `file://` mirrors)
    pub fn with_transport_base(mut self, base: impl Into<String>) -> Self {
        self.transport_base = base.into();
        self
    }

    pub fn projects_root(&self) -> &Utf8Path {
        &self.projects_root
    }

    fn target_dir(&self, name: &str) -> Utf8PathBuf {
        self.projects_root.join(name)
    }

    /// Public preview path for a deployed repository
    pub fn live_link(name: &str) -> String {
        format!("/projects/{}", name)
    }

    /// Build the transport URL, embedding the token as credentials only
    /// when one is supplied (private-repo access)
    pub fn clone_url(&self, owner: &str, name: &str, token: Option<&str>) -> Result<String> {
        let mut url = Url::parse(&format!("{}/{}/{}.git", self.transport_base, owner, name))
            .map_err(|e| Error::validation(format!("Invalid repository coordinates: {}", e)))?;
        if let Some(token) = token {
            if url.scheme().starts_with("http") {
                url.set_username(token)
                    .map_err(|_| Error::validation("Token cannot be embedded in clone URL"))?;
            }
        }
        Ok(url.into())
    }

    /// Clone the repository into the projects tree, or fast-forward an
    /// existing checkout. Returns the local path either way.
    pub async fn deploy(&self, owner: &str, name: &str, token: Option<&str>) -> Result<DeployOutcome> {
        let url = self.clone_url(owner, name, token)?;
        self.deploy_from(&url, name, token).await
    }

    /// Deploy from an explicit transport URL (tests, mirrors)
    pub async fn deploy_from(
        &self,
        url: &str,
        name: &str,
        token: Option<&str>,
    ) -> Result<DeployOutcome> {
        tokio::fs::create_dir_all(&self.projects_root).await?;
        let target = self.target_dir(name);

        let action = if target.exists() {
            debug!("Deployment exists, fast-forwarding: {}", target);
            let output = Command::new("git")
                .current_dir(&target)
                .args(["pull", "--ff-only"])
                .output()
                .await
                .map_err(|e| Error::deploy_failed(format!("Failed to run git: {}", e)))?;

            if !output.status.success() {
                return Err(Error::deploy_failed(redact(
                    String::from_utf8_lossy(&output.stderr).trim(),
                    token,
                )));
            }
            DeployAction::Updated
        } else {
            info!("Cloning {} into {}", name, target);
            let output = Command::new("git")
                .args(["clone", "--depth", "1", url, target.as_str()])
                .output()
                .await
                .map_err(|e| Error::deploy_failed(format!("Failed to run git: {}", e)))?;

            if !output.status.success() {
                return Err(Error::deploy_failed(redact(
                    String::from_utf8_lossy(&output.stderr).trim(),
                    token,
                )));
            }
            DeployAction::Cloned
        };

        Ok(DeployOutcome {
            path: target,
            action,
            live_link: Self::live_link(name),
        })
    }

    /// Remove a deployment. Removing one that does not exist is a no-op
    /// success; returns whether anything was deleted.
    pub async fn remove(&self, name: &str) -> Result<bool> {
        let target = self.target_dir(name);
        if !target.exists() {
            debug!("Deployment {} not present, nothing to remove", name);
            return Ok(false);
        }
        tokio::fs::remove_dir_all(&target).await?;
        info!("Removed deployment {}", target);
        Ok(true)
    }

    /// Pure filesystem existence check; available even when the provider
    /// is unreachable
    pub fn status(&self, name: &str) -> DeployStatus {
        let target = self.target_dir(name);
        if target.exists() {
            DeployStatus {
                deployed: true,
                live_link: Some(Self::live_link(name)),
                path: Some(target),
            }
        } else {
            DeployStatus {
                deployed: false,
                path: None,
                live_link: None,
            }
        }
    }
}

/// Strip the token from transport error messages before they surface
fn redact(message: &str, token: Option<&str>) -> String {
    match token {
        Some(token) if !token.is_empty() => message.replace(token, "***"),
        _ => message.to_string(),
    }
}
