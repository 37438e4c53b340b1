//! Shared fixture: a full provisioning service wired to a mock provider,
//! a temp projects tree, and a temp portfolio store

use brokkr_deploy::DeploymentManager;
use brokkr_github::{GitHubClient, GitHubConfig, StaticToken};
use brokkr_portfolio::{JsonPortfolioStore, LocalizedText, NewPortfolioEntry};
use brokkr_provision::ProvisioningService;
use brokkr_templates::TemplateCatalog;
use camino::Utf8PathBuf;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::MockServer;

pub const OWNER: &str = "thisisrober";

pub struct TestStack {
    pub server: MockServer,
    pub service: ProvisioningService,
    pub portfolio: Arc<JsonPortfolioStore>,
    pub projects: TempDir,
    _store_dir: TempDir,
}

impl TestStack {
    pub fn projects_path(&self) -> std::path::PathBuf {
        self.projects.path().to_path_buf()
    }
}

pub async fn stack() -> TestStack {
    stack_with_transport(None).await
}

/// Build the stack; `transport_base` redirects git clones (file:// mirrors)
pub async fn stack_with_transport(transport_base: Option<String>) -> TestStack {
    let server = MockServer::start().await;
    let projects = TempDir::new().unwrap();
    let store_dir = TempDir::new().unwrap();

    let tokens = Arc::new(StaticToken("ghp_test".to_string()));
    let github = GitHubClient::with_config(
        tokens.clone(),
        GitHubConfig::for_base_url(&server.uri()),
    );

    let mut deploy =
        DeploymentManager::new(Utf8PathBuf::from_path_buf(projects.path().to_path_buf()).unwrap());
    if let Some(base) = transport_base {
        deploy = deploy.with_transport_base(base);
    }

    let portfolio = Arc::new(JsonPortfolioStore::new(
        Utf8PathBuf::from_path_buf(store_dir.path().join("portfolio.json")).unwrap(),
    ));

    let service = ProvisioningService::new(
        github,
        TemplateCatalog::embedded().unwrap(),
        deploy,
        portfolio.clone(),
        tokens,
    );

    TestStack {
        server,
        service,
        portfolio,
        projects,
        _store_dir: store_dir,
    }
}

/// Minimal repository payload accepted by the `Repository` model
pub fn repo_json(name: &str) -> Value {
    json!({
        "id": 4242,
        "name": name,
        "full_name": format!("{}/{}", OWNER, name),
        "owner": { "login": OWNER },
        "description": "A test repository",
        "html_url": format!("https://github.com/{}/{}", OWNER, name),
        "language": "Rust",
        "stargazers_count": 0,
        "forks_count": 0,
        "open_issues_count": 0,
        "private": false,
        "archived": false,
        "default_branch": "main",
        "topics": [],
        "visibility": "public"
    })
}

/// Seed a portfolio entry for `repo` directly in the store
pub fn seed_portfolio(portfolio: &JsonPortfolioStore, repo: &str) -> u64 {
    use brokkr_portfolio::PortfolioStore;
    portfolio
        .upsert(NewPortfolioEntry {
            source_link: format!("https://github.com/{}/{}", OWNER, repo),
            repo_owner: OWNER.into(),
            repo_name: repo.into(),
            name: LocalizedText::new("Demo", "Demo"),
            description: LocalizedText::new("Una demo", "A demo"),
            preview_image: None,
            live_link: format!("/projects/{}", repo),
            technologies: vec!["Rust".into()],
            badge: String::new(),
        })
        .unwrap()
        .id
}
