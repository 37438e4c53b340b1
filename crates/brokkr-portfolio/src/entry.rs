//! Portfolio entry model

use serde::{Deserialize, Serialize};

/// Bilingual display text (the site renders Spanish and English)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub es: String,
    pub en: String,
}

impl LocalizedText {
    pub fn new(es: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            es: es.into(),
            en: en.into(),
        }
    }
}

/// A showcase record linked to one remote repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    pub id: u64,
    /// Canonical repository URL; unique across entries
    pub source_link: String,
    pub repo_owner: String,
    pub repo_name: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub preview_image: String,
    pub live_link: String,
    pub technologies: Vec<String>,
    pub badge: String,
}

/// Input for the attach upsert; the store assigns or preserves the id
#[derive(Debug, Clone)]
pub struct NewPortfolioEntry {
    pub source_link: String,
    pub repo_owner: String,
    pub repo_name: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    /// `None` keeps the existing image on update
    pub preview_image: Option<String>,
    pub live_link: String,
    pub technologies: Vec<String>,
    pub badge: String,
}

/// Partial in-place update of display fields; each language merges
/// independently
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub name_es: Option<String>,
    pub name_en: Option<String>,
    pub description_es: Option<String>,
    pub description_en: Option<String>,
    pub preview_image: Option<String>,
    pub live_link: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub badge: Option<String>,
}
