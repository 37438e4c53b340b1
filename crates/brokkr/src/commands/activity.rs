//! `brokkr activity` command handlers
//!
//! Display-only account activity: best-effort recent events and the
//! GraphQL contribution calendar. Never used for control decisions.

use anyhow::Result;

use crate::cli::{ActivityArgs, ActivityCommands};
use crate::context::AppContext;
use crate::output;

pub async fn run(args: ActivityCommands, ctx: &AppContext) -> Result<()> {
    match args {
        ActivityCommands::Events(args) => events(args, ctx).await,
        ActivityCommands::Calendar(args) => calendar(args, ctx).await,
    }
}

/// Resolve the target login, defaulting to the authenticated account
async fn resolve_login(login: Option<String>, ctx: &AppContext) -> Result<String> {
    match login {
        Some(login) => Ok(login),
        None => Ok(ctx.github.get_identity().await?.login),
    }
}

async fn events(args: ActivityArgs, ctx: &AppContext) -> Result<()> {
    let login = resolve_login(args.login, ctx).await?;
    let report = ctx.github.get_user_events(&login).await?;

    if args.json {
        return output::json(&report);
    }

    output::header(&format!("Recent activity for {}", login));
    for event in &report.events {
        let date = event
            .created_at
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "  {}  {}  {}",
            date,
            event.event_type,
            event.repo.as_deref().unwrap_or("-")
        );
    }
    output::info(&format!("{} events", report.events.len()));
    output::warnings(&report.warnings);
    Ok(())
}

async fn calendar(args: ActivityArgs, ctx: &AppContext) -> Result<()> {
    let login = resolve_login(args.login, ctx).await?;
    let calendar = ctx.github.get_contribution_calendar(&login).await?;

    if args.json {
        return output::json(&calendar);
    }

    output::header(&format!("Contributions for {}", login));
    output::kv("total", &calendar.total_contributions.to_string());

    // One line per week: a coarse terminal heatmap
    for week in &calendar.weeks {
        let line: String = week
            .contribution_days
            .iter()
            .map(|day| match day.contribution_count {
                0 => '·',
                1..=3 => '▪',
                4..=9 => '◼',
                _ => '█',
            })
            .collect();
        println!("  {}", line);
    }
    Ok(())
}
