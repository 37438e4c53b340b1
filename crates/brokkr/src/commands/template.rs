//! `brokkr template` command handlers

use anyhow::Result;

use crate::cli::{TemplateCommands, TemplateListArgs, TemplatePreviewArgs};
use crate::context::AppContext;
use crate::output;

pub fn run(args: TemplateCommands, ctx: &AppContext) -> Result<()> {
    match args {
        TemplateCommands::List(args) => list(args, ctx),
        TemplateCommands::Preview(args) => preview(args, ctx),
    }
}

fn list(args: TemplateListArgs, ctx: &AppContext) -> Result<()> {
    let templates = ctx.service.templates().list();

    if args.json {
        return output::json(&templates);
    }

    output::header("Available templates");
    for t in templates {
        println!("  {} {} — {}", t.icon, t.id, t.description);
    }
    Ok(())
}

fn preview(args: TemplatePreviewArgs, ctx: &AppContext) -> Result<()> {
    let files = ctx
        .service
        .templates()
        .generate(&args.template, &args.name, &args.description)?;

    output::header(&format!("{} ({} files)", args.template, files.len()));
    for file in files {
        output::kv(&file.path, &format!("{} bytes", file.content.len()));
    }
    Ok(())
}
