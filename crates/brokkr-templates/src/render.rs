//! Placeholder substitution for template content.
//!
//! Plain `{var}` replacement, no templating engine: the catalog only needs
//! the repository name, its description, derived slugs, and the year.

use chrono::{Datelike, Local};

/// Variables available to template content and paths
#[derive(Debug, Clone)]
pub(crate) struct TemplateVars {
    pub name: String,
    pub description: String,
    pub slug: String,
    pub snake: String,
    pub year: String,
}

impl TemplateVars {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            slug: sanitize(name, '-'),
            snake: sanitize(name, '_'),
            year: Local::now().year().to_string(),
        }
    }
}

/// Substitute every `{var}` placeholder
pub(crate) fn render(template: &str, vars: &TemplateVars) -> String {
    template
        .replace("{name}", &vars.name)
        .replace("{description}", &vars.description)
        .replace("{slug}", &vars.slug)
        .replace("{snake}", &vars.snake)
        .replace("{year}", &vars.year)
}

/// Lowercase and collapse every non-alphanumeric run to `separator`
fn sanitize(name: &str, separator: char) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push(separator);
            }
            pending_sep = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_slug() {
        assert_eq!(sanitize("Demo App", '-'), "demo-app");
        assert_eq!(sanitize("My__Cool  Project!", '-'), "my-cool-project");
        assert_eq!(sanitize("already-fine", '-'), "already-fine");
    }

    #[test]
    fn test_sanitize_snake() {
        assert_eq!(sanitize("Demo App", '_'), "demo_app");
        assert_eq!(sanitize("data-analysis", '_'), "data_analysis");
    }

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let vars = TemplateVars::new("Demo App", "a test");
        let out = render("# {name}\n{description}\n{slug}/{snake}", &vars);
        assert_eq!(out, "# Demo App\na test\ndemo-app/demo_app");
    }

    #[test]
    fn test_render_leaves_unknown_braces_alone() {
        let vars = TemplateVars::new("x", "y");
        assert_eq!(render("fn main() { }", &vars), "fn main() { }");
    }
}
