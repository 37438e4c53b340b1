//! brokkr - GitHub provisioning CLI
//!
//! The operator surface over the provisioning stack: token management,
//! repository lifecycle, template scaffolding, local preview deployments,
//! and portfolio reconciliation.

mod cli;
mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let ctx = context::AppContext::build(cli.token.clone(), cli.projects_dir.clone())?;

    match cli.command {
        Commands::Auth(args) => commands::auth::run(args, &ctx).await,
        Commands::Repo(args) => commands::repo::run(args, &ctx).await,
        Commands::Collab(args) => commands::collab::run(args, &ctx).await,
        Commands::Template(args) => commands::template::run(args, &ctx),
        Commands::Deploy(args) => commands::deploy::run(args, &ctx).await,
        Commands::Portfolio(args) => commands::portfolio::run(args, &ctx).await,
        Commands::Activity(args) => commands::activity::run(args, &ctx).await,
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
