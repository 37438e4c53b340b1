//! `brokkr repo` command handlers

use anyhow::{anyhow, Result};
use brokkr_github::RepoPatch;
use brokkr_provision::{CreateFromTemplate, UpdateOutcome};
use dialoguer::Input;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::{
    RepoCommands, RepoCreateArgs, RepoDeleteArgs, RepoListArgs, RepoReadmeArgs, RepoShowArgs,
    RepoUpdateArgs,
};
use crate::context::AppContext;
use crate::output;

pub async fn run(args: RepoCommands, ctx: &AppContext) -> Result<()> {
    match args {
        RepoCommands::List(args) => list(args, ctx).await,
        RepoCommands::Show(args) => show(args, ctx).await,
        RepoCommands::Create(args) => create(args, ctx).await,
        RepoCommands::Update(args) => update(args, ctx).await,
        RepoCommands::Delete(args) => delete(args, ctx).await,
        RepoCommands::Readme(args) => readme(args, ctx).await,
    }
}

#[derive(Tabled)]
struct RepoRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Visibility")]
    visibility: String,
    #[tabled(rename = "Language")]
    language: String,
    #[tabled(rename = "Stars")]
    stars: u64,
    #[tabled(rename = "Forks")]
    forks: u64,
    #[tabled(rename = "Updated")]
    updated: String,
}

async fn list(args: RepoListArgs, ctx: &AppContext) -> Result<()> {
    let spinner = output::spinner("Fetching repositories...");
    let result = ctx.github.list_repositories().await;
    spinner.finish_and_clear();
    let repos = result?;

    if args.json {
        return output::json(&repos);
    }

    let rows: Vec<RepoRow> = repos
        .iter()
        .map(|r| RepoRow {
            name: r.name.clone(),
            visibility: if r.private { "private" } else { "public" }.to_string(),
            language: r.language.clone().unwrap_or_default(),
            stars: r.stargazers_count,
            forks: r.forks_count,
            updated: r
                .updated_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
    output::info(&format!("{} repositories", repos.len()));
    Ok(())
}

async fn show(args: RepoShowArgs, ctx: &AppContext) -> Result<()> {
    let detail = ctx
        .github
        .get_repository_detail(&args.repo.owner, &args.repo.name)
        .await?;

    if args.json {
        return output::json(&detail);
    }

    let repo = &detail.repository;
    output::header(&repo.full_name);
    if let Some(description) = &repo.description {
        output::kv("description", description);
    }
    output::kv("url", &repo.html_url);
    output::kv("visibility", if repo.private { "private" } else { "public" });
    if let Some(branch) = &repo.default_branch {
        output::kv("default branch", branch);
    }
    output::kv("stars", &repo.stargazers_count.to_string());
    output::kv("forks", &repo.forks_count.to_string());
    output::kv("open issues", &repo.open_issues_count.to_string());
    if !repo.topics.is_empty() {
        output::kv("topics", &repo.topics.join(", "));
    }
    if !detail.languages.is_empty() {
        let languages: Vec<String> = detail
            .languages
            .iter()
            .map(|(language, bytes)| format!("{} ({})", language, bytes))
            .collect();
        output::kv("languages", &languages.join(", "));
    }
    Ok(())
}

async fn create(args: RepoCreateArgs, ctx: &AppContext) -> Result<()> {
    let spinner = output::spinner(&format!(
        "Creating {} from template {}...",
        args.name, args.template
    ));
    let result = ctx
        .service
        .create_from_template(CreateFromTemplate {
            name: args.name,
            description: args.description,
            template_id: args.template,
            private: args.private,
        })
        .await;
    spinner.finish_and_clear();

    let created = result?;
    output::success(&format!("Created {}", created.full_name));
    output::kv("url", &created.html_url);
    output::kv("files", &created.files_written.join(", "));
    Ok(())
}

async fn update(args: RepoUpdateArgs, ctx: &AppContext) -> Result<()> {
    let patch = RepoPatch {
        name: args.name,
        description: args.description,
        private: args.visibility.map(|v| v == "private"),
    };

    let outcome = ctx
        .service
        .update_repository(&args.repo.owner, &args.repo.name, patch)
        .await?;

    match outcome {
        UpdateOutcome::NoChange => output::info("Nothing to update"),
        UpdateOutcome::Updated(summary) => {
            output::success(&format!("Updated {}", summary.full_name));
            output::kv("url", &summary.html_url);
        }
    }
    Ok(())
}

async fn delete(args: RepoDeleteArgs, ctx: &AppContext) -> Result<()> {
    confirm_deletion(&args.repo.name, args.yes)?;

    let report = ctx
        .service
        .delete_repository(&args.repo.owner, &args.repo.name)
        .await?;

    output::success(&format!("Deleted {}", report.deleted));
    output::warnings(&report.warnings);
    Ok(())
}

async fn readme(args: RepoReadmeArgs, ctx: &AppContext) -> Result<()> {
    match ctx
        .github
        .get_readme(&args.repo.owner, &args.repo.name)
        .await?
    {
        Some(content) => println!("{}", content),
        None => output::info("Repository has no README"),
    }
    Ok(())
}

/// Repository deletion is irreversible and never rolled back; make the
/// operator re-type the exact name before the call goes out.
pub(crate) fn confirm_deletion(name: &str, skip: bool) -> Result<()> {
    if skip {
        return Ok(());
    }

    let typed: String = Input::new()
        .with_prompt(format!(
            "This permanently deletes '{}' from GitHub. Type the repository name to confirm",
            name
        ))
        .allow_empty(true)
        .interact_text()?;

    if typed != name {
        return Err(anyhow!("Confirmation did not match '{}'; aborted", name));
    }
    Ok(())
}
