//! `brokkr portfolio` command handlers

use anyhow::Result;
use brokkr_core::error::ErrorKind;
use brokkr_portfolio::{EntryPatch, LocalizedText, PortfolioStore};
use brokkr_provision::AttachRequest;

use crate::cli::{
    PortfolioAttachArgs, PortfolioCommands, PortfolioDetachArgs, PortfolioShowArgs,
    PortfolioStatusArgs, PortfolioUpdateArgs,
};
use crate::commands::repo::confirm_deletion;
use crate::context::AppContext;
use crate::output;

pub async fn run(args: PortfolioCommands, ctx: &AppContext) -> Result<()> {
    match args {
        PortfolioCommands::Attach(args) => attach(args, ctx).await,
        PortfolioCommands::Status(args) => status(args, ctx).await,
        PortfolioCommands::Show(args) => show(args, ctx),
        PortfolioCommands::Update(args) => update(args, ctx),
        PortfolioCommands::Detach(args) => detach(args, ctx).await,
    }
}

async fn attach(args: PortfolioAttachArgs, ctx: &AppContext) -> Result<()> {
    let spinner = output::spinner(&format!("Attaching {}...", args.repo));
    let result = ctx
        .service
        .attach(AttachRequest {
            repo: args.repo.clone(),
            name: LocalizedText::new(args.name_es, args.name_en),
            description: LocalizedText::new(args.description_es, args.description_en),
            preview_image: args.preview_image,
            live_link: args.live_link,
            technologies: args.technologies,
            badge: args.badge,
            deploy: args.deploy,
        })
        .await;
    spinner.finish_and_clear();

    let outcome = result?;
    if outcome.updated {
        output::success(&format!(
            "Updated portfolio entry {} for {}",
            outcome.id, args.repo
        ));
    } else {
        output::success(&format!(
            "Created portfolio entry {} for {}",
            outcome.id, args.repo
        ));
    }
    if outcome.deployed {
        output::kv("preview", &outcome.live_link);
    }
    Ok(())
}

async fn status(args: PortfolioStatusArgs, ctx: &AppContext) -> Result<()> {
    // The provider leg: a NotFound read means "not on GitHub", every
    // other failure is real
    let exists_on_provider = match ctx
        .github
        .get_repository(&args.repo.owner, &args.repo.name)
        .await
    {
        Ok(_) => true,
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => return Err(e.into()),
    };

    let status = ctx.service.status_of(&args.repo.name, exists_on_provider)?;

    if args.json {
        return output::json(&status);
    }

    output::header(&args.repo.to_string());
    output::kv(
        "on GitHub",
        if status.exists_on_provider { "yes" } else { "no" },
    );
    output::kv(
        "deployed locally",
        if status.deployed_locally { "yes" } else { "no" },
    );
    match status.portfolio_entry_id {
        Some(id) => output::kv("portfolio entry", &id.to_string()),
        None => output::kv("portfolio entry", "none"),
    }
    if let Some(live_link) = &status.live_link {
        output::kv("preview", live_link);
    }
    Ok(())
}

fn show(args: PortfolioShowArgs, ctx: &AppContext) -> Result<()> {
    let entry = ctx.portfolio.find_by_repo_name(&args.name)?;

    match entry {
        Some(entry) => {
            if args.json {
                return output::json(&entry);
            }
            output::header(&format!("Portfolio entry {}", entry.id));
            output::kv("repository", &format!("{}/{}", entry.repo_owner, entry.repo_name));
            output::kv("source", &entry.source_link);
            output::kv("name (es)", &entry.name.es);
            output::kv("name (en)", &entry.name.en);
            output::kv("live link", &entry.live_link);
            if !entry.technologies.is_empty() {
                output::kv("technologies", &entry.technologies.join(", "));
            }
            if !entry.badge.is_empty() {
                output::kv("badge", &entry.badge);
            }
        }
        None => output::info(&format!("No portfolio entry for {}", args.name)),
    }
    Ok(())
}

fn update(args: PortfolioUpdateArgs, ctx: &AppContext) -> Result<()> {
    let entry = ctx.portfolio.update_entry(
        args.id,
        EntryPatch {
            name_es: args.name_es,
            name_en: args.name_en,
            description_es: args.description_es,
            description_en: args.description_en,
            preview_image: args.preview_image,
            live_link: args.live_link,
            technologies: args.technologies,
            badge: args.badge,
        },
    )?;

    output::success(&format!("Updated portfolio entry {}", entry.id));
    Ok(())
}

async fn detach(args: PortfolioDetachArgs, ctx: &AppContext) -> Result<()> {
    confirm_deletion(&args.repo.name, args.yes)?;

    let report = ctx
        .service
        .detach_and_delete(&args.repo.owner, &args.repo.name)
        .await?;

    output::success(&format!("Deleted and detached {}", report.deleted));
    output::warnings(&report.warnings);
    Ok(())
}
