//! CLI argument parsing with clap

use brokkr_core::types::RepoRef;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// brokkr - provision GitHub repositories, preview deployments, and the
/// portfolio showcase from one place
#[derive(Parser, Debug)]
#[command(name = "brokkr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Bearer token for this invocation only (falls back to the stored
    /// credential when absent; never persisted)
    #[arg(long, global = true, env = "BROKKR_GITHUB_TOKEN")]
    pub token: Option<String>,

    /// Root directory for local preview deployments
    #[arg(long, global = true)]
    pub projects_dir: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Credential management
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Repository lifecycle
    #[command(subcommand)]
    Repo(RepoCommands),

    /// Collaborator management
    #[command(subcommand)]
    Collab(CollabCommands),

    /// Template catalog
    #[command(subcommand)]
    Template(TemplateCommands),

    /// Local preview deployments
    #[command(subcommand)]
    Deploy(DeployCommands),

    /// Portfolio reconciliation
    #[command(subcommand)]
    Portfolio(PortfolioCommands),

    /// Account activity (heatmap data)
    #[command(subcommand)]
    Activity(ActivityCommands),
}

// Auth commands

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Report whether a stored token exists and still validates
    Status(AuthStatusArgs),

    /// Validate a token and persist it on success
    Save(AuthSaveArgs),

    /// Validate a token without persisting it
    Test(AuthTestArgs),

    /// Show the authenticated account's profile
    Profile(AuthProfileArgs),
}

#[derive(Args, Debug)]
pub struct AuthStatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AuthSaveArgs {
    /// Personal access token
    pub token: String,
}

#[derive(Args, Debug)]
pub struct AuthTestArgs {
    /// Personal access token
    pub token: String,
}

#[derive(Args, Debug)]
pub struct AuthProfileArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Repo commands

#[derive(Subcommand, Debug)]
pub enum RepoCommands {
    /// List every repository owned by the authenticated user
    List(RepoListArgs),

    /// Show one repository with its language breakdown
    Show(RepoShowArgs),

    /// Create a repository from a template
    Create(RepoCreateArgs),

    /// Update name, description, or visibility
    Update(RepoUpdateArgs),

    /// Delete a repository and cascade to local state
    Delete(RepoDeleteArgs),

    /// Print a repository's README
    Readme(RepoReadmeArgs),
}

#[derive(Args, Debug)]
pub struct RepoListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RepoShowArgs {
    /// Repository as owner/name
    pub repo: RepoRef,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RepoCreateArgs {
    /// Repository name
    pub name: String,

    /// Template id (see `brokkr template list`)
    #[arg(short, long)]
    pub template: String,

    /// Repository description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Create as private
    #[arg(long)]
    pub private: bool,
}

#[derive(Args, Debug)]
pub struct RepoUpdateArgs {
    /// Repository as owner/name
    pub repo: RepoRef,

    /// New repository name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New visibility
    #[arg(long, value_parser = ["public", "private"])]
    pub visibility: Option<String>,
}

#[derive(Args, Debug)]
pub struct RepoDeleteArgs {
    /// Repository as owner/name
    pub repo: RepoRef,

    /// Skip the interactive confirmation
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct RepoReadmeArgs {
    /// Repository as owner/name
    pub repo: RepoRef,
}

// Collaborator commands

#[derive(Subcommand, Debug)]
pub enum CollabCommands {
    /// List collaborators
    List(CollabListArgs),

    /// Invite a collaborator, or change an existing one's permission
    Add(CollabAddArgs),

    /// Remove a collaborator
    Remove(CollabRemoveArgs),
}

#[derive(Args, Debug)]
pub struct CollabListArgs {
    /// Repository as owner/name
    pub repo: RepoRef,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CollabAddArgs {
    /// Repository as owner/name
    pub repo: RepoRef,

    /// Collaborator login
    pub login: String,

    /// Permission level
    #[arg(short, long, default_value = "write")]
    pub permission: String,
}

#[derive(Args, Debug)]
pub struct CollabRemoveArgs {
    /// Repository as owner/name
    pub repo: RepoRef,

    /// Collaborator login
    pub login: String,
}

// Template commands

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// List the template catalog
    List(TemplateListArgs),

    /// Preview the files a template would generate
    Preview(TemplatePreviewArgs),
}

#[derive(Args, Debug)]
pub struct TemplateListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TemplatePreviewArgs {
    /// Template id
    pub template: String,

    /// Repository name used for substitution
    #[arg(short, long, default_value = "demo-app")]
    pub name: String,

    /// Description used for substitution
    #[arg(short, long, default_value = "")]
    pub description: String,
}

// Deploy commands

#[derive(Subcommand, Debug)]
pub enum DeployCommands {
    /// Clone (or fast-forward) a repository into the projects tree
    Run(DeployRunArgs),

    /// Remove a local deployment (no-op when absent)
    Remove(DeployRemoveArgs),

    /// Report deployment state for a repository name
    Status(DeployStatusArgs),
}

#[derive(Args, Debug)]
pub struct DeployRunArgs {
    /// Repository as owner/name
    pub repo: RepoRef,
}

#[derive(Args, Debug)]
pub struct DeployRemoveArgs {
    /// Repository name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct DeployStatusArgs {
    /// Repository name
    pub name: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Portfolio commands

#[derive(Subcommand, Debug)]
pub enum PortfolioCommands {
    /// Attach a repository to the portfolio (upsert by source link)
    Attach(PortfolioAttachArgs),

    /// Composite status: provider / local deployment / portfolio
    Status(PortfolioStatusArgs),

    /// Show the entry attached to a repository
    Show(PortfolioShowArgs),

    /// Update an entry's display fields in place
    Update(PortfolioUpdateArgs),

    /// Delete the repository and detach it everywhere
    Detach(PortfolioDetachArgs),
}

#[derive(Args, Debug)]
pub struct PortfolioAttachArgs {
    /// Repository as owner/name
    pub repo: RepoRef,

    /// Spanish display name
    #[arg(long)]
    pub name_es: String,

    /// English display name
    #[arg(long)]
    pub name_en: String,

    /// Spanish description
    #[arg(long, default_value = "")]
    pub description_es: String,

    /// English description
    #[arg(long, default_value = "")]
    pub description_en: String,

    /// Preview image filename (keeps the existing one when omitted)
    #[arg(long)]
    pub preview_image: Option<String>,

    /// Live link (overridden by the deploy path with --deploy)
    #[arg(long)]
    pub live_link: Option<String>,

    /// Comma-separated technology list
    #[arg(long, value_delimiter = ',')]
    pub technologies: Vec<String>,

    /// Badge label
    #[arg(long, default_value = "")]
    pub badge: String,

    /// Deploy locally first and use the preview path as live link
    #[arg(long)]
    pub deploy: bool,
}

#[derive(Args, Debug)]
pub struct PortfolioStatusArgs {
    /// Repository as owner/name
    pub repo: RepoRef,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PortfolioShowArgs {
    /// Repository name
    pub name: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PortfolioUpdateArgs {
    /// Portfolio entry id
    pub id: u64,

    #[arg(long)]
    pub name_es: Option<String>,

    #[arg(long)]
    pub name_en: Option<String>,

    #[arg(long)]
    pub description_es: Option<String>,

    #[arg(long)]
    pub description_en: Option<String>,

    #[arg(long)]
    pub preview_image: Option<String>,

    #[arg(long)]
    pub live_link: Option<String>,

    /// Comma-separated technology list
    #[arg(long, value_delimiter = ',')]
    pub technologies: Option<Vec<String>>,

    #[arg(long)]
    pub badge: Option<String>,
}

#[derive(Args, Debug)]
pub struct PortfolioDetachArgs {
    /// Repository as owner/name
    pub repo: RepoRef,

    /// Skip the interactive confirmation
    #[arg(long)]
    pub yes: bool,
}

// Activity commands

#[derive(Subcommand, Debug)]
pub enum ActivityCommands {
    /// Recent public events (best-effort)
    Events(ActivityArgs),

    /// Contribution calendar for the last year
    Calendar(ActivityArgs),
}

#[derive(Args, Debug)]
pub struct ActivityArgs {
    /// User login; defaults to the authenticated user
    pub login: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
