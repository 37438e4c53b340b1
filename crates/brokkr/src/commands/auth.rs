//! `brokkr auth` command handlers

use anyhow::Result;

use crate::cli::{AuthCommands, AuthProfileArgs, AuthSaveArgs, AuthStatusArgs, AuthTestArgs};
use crate::context::AppContext;
use crate::output;

pub async fn run(args: AuthCommands, ctx: &AppContext) -> Result<()> {
    match args {
        AuthCommands::Status(args) => status(args, ctx).await,
        AuthCommands::Save(args) => save(args, ctx).await,
        AuthCommands::Test(args) => test(args, ctx).await,
        AuthCommands::Profile(args) => profile(args, ctx).await,
    }
}

async fn status(args: AuthStatusArgs, ctx: &AppContext) -> Result<()> {
    let status = ctx.credentials.auth_status().await?;

    if args.json {
        return output::json(&status);
    }

    match status.identity {
        Some(identity) if status.has_token => {
            output::success("GitHub token configured");
            output::kv("login", &identity.login);
            if let Some(name) = &identity.display_name {
                output::kv("name", name);
            }
        }
        _ => {
            output::warning("No valid GitHub token configured. Run: brokkr auth save <token>");
        }
    }
    Ok(())
}

async fn save(args: AuthSaveArgs, ctx: &AppContext) -> Result<()> {
    let spinner = output::spinner("Validating token against GitHub...");
    let result = ctx.credentials.save(&args.token).await;
    spinner.finish_and_clear();

    let identity = result?;
    output::success(&format!("Token saved for {}", identity.login));
    Ok(())
}

async fn profile(args: AuthProfileArgs, ctx: &AppContext) -> Result<()> {
    let profile = ctx.github.get_user().await?;

    if args.json {
        return output::json(&profile);
    }

    output::header(&profile.login);
    if let Some(name) = &profile.name {
        output::kv("name", name);
    }
    if let Some(bio) = &profile.bio {
        output::kv("bio", bio);
    }
    output::kv("public repos", &profile.public_repos.to_string());
    output::kv("followers", &profile.followers.to_string());
    output::kv("following", &profile.following.to_string());
    output::kv("url", &profile.html_url);
    Ok(())
}

async fn test(args: AuthTestArgs, ctx: &AppContext) -> Result<()> {
    let spinner = output::spinner("Validating token against GitHub...");
    let result = ctx.credentials.validate(&args.token).await;
    spinner.finish_and_clear();

    match result? {
        Some(identity) => {
            output::success(&format!("Token is valid for {}", identity.login));
        }
        None => {
            output::warning("Token rejected by GitHub (nothing was stored)");
        }
    }
    Ok(())
}
