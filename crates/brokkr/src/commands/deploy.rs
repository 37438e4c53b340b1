//! `brokkr deploy` command handlers

use anyhow::Result;
use brokkr_deploy::DeployAction;

use crate::cli::{DeployCommands, DeployRemoveArgs, DeployRunArgs, DeployStatusArgs};
use crate::context::AppContext;
use crate::output;

pub async fn run(args: DeployCommands, ctx: &AppContext) -> Result<()> {
    match args {
        DeployCommands::Run(args) => deploy(args, ctx).await,
        DeployCommands::Remove(args) => remove(args, ctx).await,
        DeployCommands::Status(args) => status(args, ctx),
    }
}

async fn deploy(args: DeployRunArgs, ctx: &AppContext) -> Result<()> {
    let token = ctx.credentials.current()?;
    let spinner = output::spinner(&format!("Deploying {}...", args.repo));
    let result = ctx
        .service
        .deployments()
        .deploy(&args.repo.owner, &args.repo.name, token.as_deref())
        .await;
    spinner.finish_and_clear();

    let outcome = result?;
    match outcome.action {
        DeployAction::Cloned => output::success(&format!("Cloned {} to {}", args.repo, outcome.path)),
        DeployAction::Updated => {
            output::success(&format!("Updated {} in {}", args.repo, outcome.path))
        }
    }
    output::kv("preview", &outcome.live_link);
    Ok(())
}

async fn remove(args: DeployRemoveArgs, ctx: &AppContext) -> Result<()> {
    if ctx.service.deployments().remove(&args.name).await? {
        output::success(&format!("Removed {} from the projects tree", args.name));
    } else {
        output::info(&format!("{} was not deployed", args.name));
    }
    Ok(())
}

fn status(args: DeployStatusArgs, ctx: &AppContext) -> Result<()> {
    let status = ctx.service.deployments().status(&args.name);

    if args.json {
        return output::json(&status);
    }

    if status.deployed {
        output::success(&format!("{} is deployed", args.name));
        if let Some(path) = &status.path {
            output::kv("path", path.as_str());
        }
        if let Some(live_link) = &status.live_link {
            output::kv("preview", live_link);
        }
    } else {
        output::info(&format!("{} is not deployed", args.name));
    }
    Ok(())
}
