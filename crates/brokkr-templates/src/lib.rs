//! # brokkr-templates
//!
//! Repository scaffolding templates: a static catalog of named file-set
//! generators used when provisioning a fresh repository.
//!
//! Generation is a pure function: `(template id, repo name, description)`
//! always produces the same ordered list of `(path, content)` entries. The
//! engine never talks to the provider; merging the generated `README.md`
//! with the provider's auto-initialized one is the lifecycle layer's job.
//!
//! Templates are defined in an embedded YAML catalog
//! (`templates/repo-templates.yaml`) and rendered with simple `{var}`
//! placeholder substitution.

pub mod catalog;
pub mod render;

pub use catalog::{TemplateCatalog, TemplateFile, TemplateInfo};
