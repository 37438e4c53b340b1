//! Client configuration

/// Endpoints and identification for the GitHub client.
///
/// Defaults target the public API; tests point both URLs at a mock server.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// REST API base URL, no trailing slash
    pub api_url: String,

    /// GraphQL endpoint URL
    pub graphql_url: String,

    /// User agent sent with every request (GitHub requires one)
    pub user_agent: String,

    /// API version pinned via the `X-GitHub-Api-Version` header
    pub api_version: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            graphql_url: "https://api.github.com/graphql".to_string(),
            user_agent: format!("brokkr/{}", env!("CARGO_PKG_VERSION")),
            api_version: "2022-11-28".to_string(),
        }
    }
}

impl GitHubConfig {
    /// Point both endpoints at a test server
    pub fn for_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            api_url: base.to_string(),
            graphql_url: format!("{}/graphql", base),
            ..Self::default()
        }
    }
}
