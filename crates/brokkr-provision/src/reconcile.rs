//! Portfolio reconciliation
//!
//! Links repositories to showcase records and answers the tri-state
//! status question (on GitHub / deployed locally / attached to portfolio)
//! from its three independent sources at query time.

use crate::lifecycle::DeleteReport;
use crate::ProvisioningService;
use brokkr_core::error::{Error, Result};
use brokkr_core::types::RepoRef;
use brokkr_portfolio::{LocalizedText, NewPortfolioEntry, PortfolioStore};
use serde::Serialize;
use tracing::info;

/// Request to attach a repository to the portfolio
#[derive(Debug, Clone)]
pub struct AttachRequest {
    pub repo: RepoRef,
    pub name: LocalizedText,
    pub description: LocalizedText,
    /// `None` keeps an existing preview image on re-attach
    pub preview_image: Option<String>,
    /// Explicit live link; overridden by the deploy path when deploying
    pub live_link: Option<String>,
    pub technologies: Vec<String>,
    pub badge: String,
    /// Deploy the repository locally first and use its preview path
    pub deploy: bool,
}

/// Result of an attach
#[derive(Debug, Clone, Serialize)]
pub struct AttachOutcome {
    pub id: u64,
    /// `true` when an existing entry was updated rather than created
    pub updated: bool,
    pub live_link: String,
    pub deployed: bool,
}

/// Composite status view computed on demand, never stored
#[derive(Debug, Clone, Serialize)]
pub struct RepoStatus {
    pub exists_on_provider: bool,
    pub deployed_locally: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_link: Option<String>,
    pub attached_to_portfolio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_entry_id: Option<u64>,
}

impl ProvisioningService {
    /// Attach a repository to the portfolio.
    ///
    /// With `deploy` set, the repository is cloned (or fast-forwarded)
    /// first and the resulting preview path becomes the entry's
    /// `live_link`. The entry is upserted by `source_link`: an existing
    /// entry keeps its id, last write wins.
    pub async fn attach(&self, request: AttachRequest) -> Result<AttachOutcome> {
        if request.name.es.trim().is_empty() || request.name.en.trim().is_empty() {
            return Err(Error::validation("Names (ES/EN) are required"));
        }

        let mut live_link = request.live_link.clone().unwrap_or_default();
        let mut deployed = false;

        if request.deploy {
            let token = self.transport_token();
            let outcome = self
                .deploy
                .deploy(&request.repo.owner, &request.repo.name, token.as_deref())
                .await?;
            live_link = outcome.live_link;
            deployed = true;
        }

        let upsert = self.portfolio.upsert(NewPortfolioEntry {
            source_link: request.repo.html_url(),
            repo_owner: request.repo.owner.clone(),
            repo_name: request.repo.name.clone(),
            name: request.name,
            description: request.description,
            preview_image: request.preview_image,
            live_link: live_link.clone(),
            technologies: request.technologies,
            badge: request.badge,
        })?;

        info!(
            "Attached {} to portfolio (entry {}, {})",
            request.repo,
            upsert.id,
            if upsert.updated { "updated" } else { "created" }
        );

        Ok(AttachOutcome {
            id: upsert.id,
            updated: upsert.updated,
            live_link,
            deployed,
        })
    }

    /// Compose the tri-state status for a repository.
    ///
    /// `exists_on_provider` comes from the caller, which has typically
    /// just fetched (or failed to fetch) the repository; the other two
    /// legs are read fresh from the filesystem and the record store.
    pub fn status_of(&self, name: &str, exists_on_provider: bool) -> Result<RepoStatus> {
        let deployment = self.deploy.status(name);
        let entry = self.portfolio.find_by_repo_name(name)?;

        Ok(RepoStatus {
            exists_on_provider,
            deployed_locally: deployment.deployed,
            live_link: deployment.live_link,
            attached_to_portfolio: entry.is_some(),
            portfolio_entry_id: entry.map(|e| e.id),
        })
    }

    /// Detach a repository and delete it everywhere: delegates to the
    /// lifecycle delete workflow rather than duplicating the cascade.
    pub async fn detach_and_delete(&self, owner: &str, name: &str) -> Result<DeleteReport> {
        self.delete_repository(owner, name).await
    }
}
