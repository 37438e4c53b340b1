//! Application wiring: stores, client, and the provisioning service

use anyhow::Result;
use brokkr_core::paths;
use brokkr_core::settings::FileSettingsStore;
use brokkr_deploy::DeploymentManager;
use brokkr_github::{CredentialStore, GitHubClient, GitHubConfig};
use brokkr_portfolio::JsonPortfolioStore;
use brokkr_provision::ProvisioningService;
use brokkr_templates::TemplateCatalog;
use camino::Utf8PathBuf;
use std::sync::Arc;

/// Everything a command needs, built once per invocation
pub struct AppContext {
    pub credentials: Arc<CredentialStore>,
    pub github: GitHubClient,
    pub portfolio: Arc<JsonPortfolioStore>,
    pub service: ProvisioningService,
}

impl AppContext {
    /// Wire the stack from the platform data directory, honoring the
    /// per-invocation token override and projects-root flag
    pub fn build(token: Option<String>, projects_dir: Option<Utf8PathBuf>) -> Result<Self> {
        let data_dir = paths::data_dir()?;
        let config = GitHubConfig::default();

        let settings = Arc::new(FileSettingsStore::in_dir(&data_dir));
        let credentials = Arc::new(CredentialStore::new(settings.clone(), config.clone()));

        let github = GitHubClient::with_config(credentials.clone(), config)
            .with_token_override(token.clone());

        let projects_root = match projects_dir {
            Some(dir) => dir,
            None => paths::default_projects_dir()?,
        };
        let deploy = DeploymentManager::new(projects_root);
        let portfolio = Arc::new(JsonPortfolioStore::in_dir(&data_dir));

        let service = ProvisioningService::new(
            github.clone(),
            TemplateCatalog::embedded()?,
            deploy,
            portfolio.clone(),
            credentials.clone(),
        )
        .with_token_override(token);

        Ok(Self {
            credentials,
            github,
            portfolio,
            service,
        })
    }
}
