//! `brokkr collab` command handlers

use anyhow::Result;
use brokkr_github::PermissionLevel;

use crate::cli::{CollabAddArgs, CollabCommands, CollabListArgs, CollabRemoveArgs};
use crate::context::AppContext;
use crate::output;

pub async fn run(args: CollabCommands, ctx: &AppContext) -> Result<()> {
    match args {
        CollabCommands::List(args) => list(args, ctx).await,
        CollabCommands::Add(args) => add(args, ctx).await,
        CollabCommands::Remove(args) => remove(args, ctx).await,
    }
}

async fn list(args: CollabListArgs, ctx: &AppContext) -> Result<()> {
    let collaborators = ctx
        .service
        .list_collaborators(&args.repo.owner, &args.repo.name)
        .await?;

    if args.json {
        return output::json(&collaborators);
    }

    output::header(&format!("Collaborators on {}", args.repo));
    for c in &collaborators {
        output::kv(&c.login, &format!("{} ({})", c.permission, c.role_label));
    }
    if collaborators.is_empty() {
        output::info("No collaborators");
    }
    Ok(())
}

async fn add(args: CollabAddArgs, ctx: &AppContext) -> Result<()> {
    let permission: PermissionLevel = args.permission.parse()?;
    ctx.service
        .add_collaborator(&args.repo.owner, &args.repo.name, &args.login, permission)
        .await?;

    // Adding someone already present updates their permission instead
    output::success(&format!(
        "{} now has {} access to {}",
        args.login, permission, args.repo
    ));
    Ok(())
}

async fn remove(args: CollabRemoveArgs, ctx: &AppContext) -> Result<()> {
    ctx.service
        .remove_collaborator(&args.repo.owner, &args.repo.name, &args.login)
        .await?;
    output::success(&format!("Removed {} from {}", args.login, args.repo));
    Ok(())
}
