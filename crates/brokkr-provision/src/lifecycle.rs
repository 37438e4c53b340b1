//! Repository lifecycle workflows
//!
//! Create-from-template runs as a fixed sequence: create with auto-init,
//! generate the file set, fetch the auto-initialized README's revision
//! marker, write every file. A write failure surfaces immediately as
//! `PartialFailure` with the files already written; the created repository
//! is not rolled back.

use crate::ProvisioningService;
use brokkr_core::error::{Error, Result};
use brokkr_github::{CollaboratorInfo, CreateRepoRequest, PermissionLevel, RepoPatch, Repository};
use brokkr_portfolio::PortfolioStore;
use serde::Serialize;
use tracing::{info, warn};

/// Request to provision a repository from a template
#[derive(Debug, Clone)]
pub struct CreateFromTemplate {
    pub name: String,
    pub description: String,
    pub template_id: String,
    pub private: bool,
}

/// Terminal success of the create-from-template workflow
#[derive(Debug, Clone, Serialize)]
pub struct CreatedRepository {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    /// Paths written through the contents API, in order
    pub files_written: Vec<String>,
}

/// Subset of repository metadata returned by the update workflow
#[derive(Debug, Clone, Serialize)]
pub struct RepoSummary {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub private: bool,
    pub html_url: String,
}

impl From<Repository> for RepoSummary {
    fn from(repo: Repository) -> Self {
        Self {
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            private: repo.private,
            html_url: repo.html_url,
        }
    }
}

/// Result of the update workflow
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// Requested fields already match; no provider call was made
    NoChange,
    Updated(RepoSummary),
}

/// Result of the delete workflow. The provider delete succeeded; failures
/// of the best-effort local steps are listed, not fatal.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteReport {
    pub deleted: String,
    pub warnings: Vec<String>,
}

impl ProvisioningService {
    /// Provision a repository from a template.
    ///
    /// Auto-initialization is mandatory: it guarantees a default branch and
    /// an initial `README.md` whose revision marker lets the generated
    /// README be written as an update instead of a rejected create.
    pub async fn create_from_template(
        &self,
        request: CreateFromTemplate,
    ) -> Result<CreatedRepository> {
        if request.name.trim().is_empty() {
            return Err(Error::validation("Repository name is required"));
        }
        if request.template_id.trim().is_empty() {
            return Err(Error::validation("Template is required"));
        }
        if !self.templates.contains(&request.template_id) {
            return Err(Error::not_found(format!("template {}", request.template_id)));
        }

        // Step 1: create on the provider
        let repo = self
            .github
            .create_repository(&CreateRepoRequest {
                name: request.name.clone(),
                description: request.description.clone(),
                private: request.private,
                auto_init: true,
            })
            .await?;
        let owner = repo.owner.login.clone();
        info!("Created repository {}/{}", owner, repo.name);

        // Step 2: generate the file set. The template may have raced away
        // since the pre-check; a miss here is terminal.
        let files = self
            .templates
            .generate(&request.template_id, &request.name, &request.description)?;

        // Step 3: populate. Only README.md carries the auto-init revision
        // marker; everything else is a fresh create.
        let existing_readme = self
            .github
            .get_file_content(&owner, &repo.name, "README.md")
            .await?;

        let mut written: Vec<String> = Vec::with_capacity(files.len());
        for file in &files {
            let sha = match (&existing_readme, file.path.as_str()) {
                (Some(readme), "README.md") => Some(readme.sha.as_str()),
                _ => None,
            };
            if let Err(e) = self
                .github
                .create_or_update_file(
                    &owner,
                    &repo.name,
                    &file.path,
                    &file.content,
                    &format!("Initial commit: add {}", file.path),
                    sha,
                )
                .await
            {
                // No rollback: the repository stays, partially populated
                warn!("Template population stopped at {}: {}", file.path, e);
                return Err(Error::partial_failure(
                    format!("Failed to write {}: {}", file.path, e),
                    written,
                ));
            }
            written.push(file.path.clone());
        }

        Ok(CreatedRepository {
            name: repo.name,
            full_name: repo.full_name,
            html_url: repo.html_url,
            description: repo.description,
            files_written: written,
        })
    }

    /// Update repository metadata, sending only the fields that differ
    /// from the live values. An empty diff short-circuits without a
    /// provider call.
    pub async fn update_repository(
        &self,
        owner: &str,
        name: &str,
        requested: RepoPatch,
    ) -> Result<UpdateOutcome> {
        let current = self.github.get_repository(owner, name).await?;

        let effective = RepoPatch {
            name: requested.name.filter(|n| *n != current.name),
            description: requested
                .description
                .filter(|d| Some(d.as_str()) != current.description.as_deref()),
            private: requested.private.filter(|p| *p != current.private),
        };

        if effective.is_empty() {
            info!("No changes for {}/{}, skipping provider call", owner, name);
            return Ok(UpdateOutcome::NoChange);
        }

        let updated = self.github.update_repository(owner, name, &effective).await?;
        Ok(UpdateOutcome::Updated(updated.into()))
    }

    /// Delete a repository and cascade to local state.
    ///
    /// The provider delete is terminal: if it fails nothing local is torn
    /// down. The local directory and portfolio entry removals are
    /// best-effort; their failures become warnings because the remote
    /// deletion the caller asked for already happened.
    pub async fn delete_repository(&self, owner: &str, name: &str) -> Result<DeleteReport> {
        self.github.delete_repository(owner, name).await?;
        info!("Deleted repository {}/{}", owner, name);

        let mut warnings = Vec::new();

        if let Err(e) = self.deploy.remove(name).await {
            warn!("Local deployment cleanup failed for {}: {}", name, e);
            warnings.push(format!("local deployment not removed: {}", e));
        }

        match self.portfolio.delete_by_repo_name(name) {
            Ok(removed) => {
                if removed {
                    info!("Removed portfolio entry for {}", name);
                }
            }
            Err(e) => {
                warn!("Portfolio cleanup failed for {}: {}", name, e);
                warnings.push(format!("portfolio entry not removed: {}", e));
            }
        }

        Ok(DeleteReport {
            deleted: format!("{}/{}", owner, name),
            warnings,
        })
    }

    // Collaborator workflows are direct passthroughs; the client already
    // maps the provider's raw structures to display fields.

    pub async fn list_collaborators(&self, owner: &str, name: &str) -> Result<Vec<CollaboratorInfo>> {
        self.github.list_collaborators(owner, name).await
    }

    pub async fn add_collaborator(
        &self,
        owner: &str,
        name: &str,
        login: &str,
        permission: PermissionLevel,
    ) -> Result<()> {
        self.github.add_collaborator(owner, name, login, permission).await
    }

    pub async fn remove_collaborator(&self, owner: &str, name: &str, login: &str) -> Result<()> {
        self.github.remove_collaborator(owner, name, login).await
    }
}
