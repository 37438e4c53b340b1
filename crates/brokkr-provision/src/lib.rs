//! # brokkr-provision
//!
//! Orchestration over the provider client, template engine, deployment
//! manager, and portfolio store:
//!
//! - **Lifecycle**: create-from-template, metadata patching with no-op
//!   short-circuit, delete with best-effort cascade, collaborator
//!   management
//! - **Reconciliation**: attach a repository to the portfolio (optionally
//!   deploying it first) and answer the composite "what is the status of
//!   repo X" question from provider, filesystem, and record store
//!
//! Workflows are bounded request/response cycles; there is no queue and no
//! rollback of partially completed remote work.

pub mod lifecycle;
pub mod reconcile;

pub use lifecycle::{CreateFromTemplate, CreatedRepository, DeleteReport, RepoSummary, UpdateOutcome};
pub use reconcile::{AttachOutcome, AttachRequest, RepoStatus};

use brokkr_deploy::DeploymentManager;
use brokkr_github::{GitHubClient, TokenSource};
use brokkr_portfolio::PortfolioStore;
use brokkr_templates::TemplateCatalog;
use std::sync::Arc;

/// Orchestrates every provisioning workflow
pub struct ProvisioningService {
    pub(crate) github: GitHubClient,
    pub(crate) templates: TemplateCatalog,
    pub(crate) deploy: DeploymentManager,
    pub(crate) portfolio: Arc<dyn PortfolioStore>,
    pub(crate) tokens: Arc<dyn TokenSource>,
    pub(crate) token_override: Option<String>,
}

impl ProvisioningService {
    pub fn new(
        github: GitHubClient,
        templates: TemplateCatalog,
        deploy: DeploymentManager,
        portfolio: Arc<dyn PortfolioStore>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            github,
            templates,
            deploy,
            portfolio,
            tokens,
            token_override: None,
        }
    }

    /// Use `token` for git transport in this service's lifetime instead of
    /// the configured source (pairs with the client-side override)
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        self.token_override = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn github(&self) -> &GitHubClient {
        &self.github
    }

    pub fn templates(&self) -> &TemplateCatalog {
        &self.templates
    }

    pub fn deployments(&self) -> &DeploymentManager {
        &self.deploy
    }

    /// Token used for git transport (clone of private repositories)
    pub(crate) fn transport_token(&self) -> Option<String> {
        self.token_override
            .clone()
            .or_else(|| self.tokens.token().ok().flatten())
    }
}
