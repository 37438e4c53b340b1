//! Template catalog: embedded YAML definitions, typed access, generation

use crate::render::{render, TemplateVars};
use brokkr_core::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Embedded at compile time; the catalog is static by design
const EMBEDDED_CATALOG: &str = include_str!("../templates/repo-templates.yaml");

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    #[allow(dead_code)]
    version: String,
    templates: Vec<TemplateDef>,
}

#[derive(Debug, Clone, Deserialize)]
struct TemplateDef {
    id: String,
    name: String,
    description: String,
    icon: String,
    files: Vec<FileDef>,
}

#[derive(Debug, Clone, Deserialize)]
struct FileDef {
    path: String,
    #[serde(default)]
    content: String,
}

/// Catalog entry metadata shown to the operator
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// One generated file: repository-relative path and full content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateFile {
    pub path: String,
    pub content: String,
}

/// The static template catalog
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<TemplateDef>,
}

impl TemplateCatalog {
    /// Load the embedded catalog
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a YAML string (tests, experiments)
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml_ng::from_str(yaml)
            .map_err(|e| Error::unexpected(format!("Invalid template catalog: {}", e)))?;
        Ok(Self {
            templates: file.templates,
        })
    }

    /// Catalog metadata for every template, in definition order
    pub fn list(&self) -> Vec<TemplateInfo> {
        self.templates
            .iter()
            .map(|t| TemplateInfo {
                id: t.id.clone(),
                name: t.name.clone(),
                description: t.description.clone(),
                icon: t.icon.clone(),
            })
            .collect()
    }

    /// Whether a template id exists
    pub fn contains(&self, template_id: &str) -> bool {
        self.templates.iter().any(|t| t.id == template_id)
    }

    /// Generate the file set for a template.
    ///
    /// Pure and deterministic: identical arguments produce identical file
    /// lists. Unknown ids fail with `NotFound` and no partial output.
    pub fn generate(
        &self,
        template_id: &str,
        repo_name: &str,
        description: &str,
    ) -> Result<Vec<TemplateFile>> {
        let template = self
            .templates
            .iter()
            .find(|t| t.id == template_id)
            .ok_or_else(|| Error::not_found(format!("template {}", template_id)))?;

        let vars = TemplateVars::new(repo_name, description);
        Ok(template
            .files
            .iter()
            .map(|f| TemplateFile {
                path: render(&f.path, &vars),
                content: render(&f.content, &vars),
            })
            .collect())
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::embedded().expect("embedded template catalog must parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TemplateCatalog {
        TemplateCatalog::embedded().unwrap()
    }

    #[test]
    fn test_embedded_catalog_parses() {
        let c = catalog();
        let ids: Vec<String> = c.list().into_iter().map(|t| t.id).collect();
        assert!(ids.contains(&"basic".to_string()));
        assert!(ids.contains(&"data-analysis".to_string()));
        assert!(ids.contains(&"node-fullstack".to_string()));
        assert!(ids.contains(&"node-api".to_string()));
        assert!(ids.contains(&"react-vite".to_string()));
        assert!(ids.contains(&"static-site".to_string()));
        assert!(ids.contains(&"python-project".to_string()));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let c = catalog();
        let a = c.generate("basic", "demo-app", "test").unwrap();
        let b = c.generate("basic", "demo-app", "test").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_template_is_not_found() {
        let c = catalog();
        let err = c.generate("does-not-exist", "demo-app", "test").unwrap_err();
        assert_eq!(
            err.kind(),
            brokkr_core::error::ErrorKind::NotFound
        );
    }

    #[test]
    fn test_basic_template_file_set() {
        let c = catalog();
        let files = c.generate("basic", "demo-app", "test").unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert!(paths.contains(&"README.md"));
        assert!(paths.contains(&"LICENSE"));
        assert!(paths.contains(&".gitignore"));
    }

    #[test]
    fn test_readme_carries_name_and_description() {
        let c = catalog();
        let files = c.generate("basic", "demo-app", "A demo application").unwrap();
        let readme = files.iter().find(|f| f.path == "README.md").unwrap();
        assert!(readme.content.contains("# demo-app"));
        assert!(readme.content.contains("A demo application"));
        // No placeholder survives rendering
        assert!(!readme.content.contains("{name}"));
        assert!(!readme.content.contains("{description}"));
    }

    #[test]
    fn test_python_template_uses_snake_case_module() {
        let c = catalog();
        let files = c.generate("python-project", "demo-app", "test").unwrap();
        assert!(files.iter().any(|f| f.path == "demo_app/__init__.py"));
        assert!(files.iter().any(|f| f.path == "demo_app/main.py"));
    }

    #[test]
    fn test_every_template_includes_license_and_ignore_rules() {
        let c = catalog();
        for info in c.list() {
            let files = c.generate(&info.id, "demo-app", "test").unwrap();
            let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
            assert!(paths.contains(&"LICENSE"), "{} lacks LICENSE", info.id);
            assert!(paths.contains(&".gitignore"), "{} lacks .gitignore", info.id);
            assert!(paths.contains(&"README.md"), "{} lacks README.md", info.id);
        }
    }

    #[test]
    fn test_notebook_is_valid_json() {
        let c = catalog();
        let files = c.generate("data-analysis", "demo-app", "test").unwrap();
        let notebook = files
            .iter()
            .find(|f| f.path == "notebooks/analysis.ipynb")
            .unwrap();
        let parsed: serde_yaml_ng::Value = serde_yaml_ng::from_str(&notebook.content).unwrap();
        assert!(parsed.get("cells").is_some());
    }
}
