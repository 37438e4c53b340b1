//! Portfolio persistence
//!
//! The store contract mirrors what the site's relational layer provides:
//! lookup by unique link, lookup by repo name, upsert, patch, delete. The
//! JSON-file implementation is the single-operator default; writes take an
//! exclusive file lock so racing callers resolve to last-write-wins.

use crate::entry::{EntryPatch, NewPortfolioEntry, PortfolioEntry};
use brokkr_core::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use fs4::fs_std::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{Read, Seek, Write};
use tracing::{debug, info};

/// Result of an attach upsert
#[derive(Debug, Clone, Serialize)]
pub struct UpsertOutcome {
    pub id: u64,
    /// `true` when an existing entry was updated in place
    pub updated: bool,
}

/// Storage contract for portfolio entries
pub trait PortfolioStore: Send + Sync {
    fn find_by_source_link(&self, source_link: &str) -> Result<Option<PortfolioEntry>>;

    fn find_by_repo_name(&self, repo_name: &str) -> Result<Option<PortfolioEntry>>;

    /// Insert, or update in place when an entry with the same
    /// `source_link` exists (its id is preserved)
    fn upsert(&self, entry: NewPortfolioEntry) -> Result<UpsertOutcome>;

    /// Merge non-empty patch fields into an existing entry
    fn update_entry(&self, id: u64, patch: EntryPatch) -> Result<PortfolioEntry>;

    /// Delete the entry attached to a repository; `false` when none was
    fn delete_by_repo_name(&self, repo_name: &str) -> Result<bool>;

    fn list(&self) -> Result<Vec<PortfolioEntry>>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    next_id: u64,
    entries: Vec<PortfolioEntry>,
}

/// JSON-file-backed portfolio store
#[derive(Debug, Clone)]
pub struct JsonPortfolioStore {
    path: Utf8PathBuf,
}

impl JsonPortfolioStore {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/portfolio.json`
    pub fn in_dir(dir: &Utf8Path) -> Self {
        Self::new(dir.join("portfolio.json"))
    }

    fn read(&self) -> Result<StoreFile> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            Ok(_) => Ok(StoreFile::default()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreFile::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Read-modify-write under an exclusive file lock
    fn mutate<T>(&self, f: impl FnOnce(&mut StoreFile) -> T) -> Result<T> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        file.lock_exclusive()?;

        let mut raw = String::new();
        file.read_to_string(&mut raw)?;
        let mut store: StoreFile = if raw.trim().is_empty() {
            StoreFile::default()
        } else {
            serde_json::from_str(&raw)?
        };

        let result = f(&mut store);

        file.set_len(0)?;
        file.rewind()?;
        file.write_all(serde_json::to_string_pretty(&store)?.as_bytes())?;
        file.sync_all()?;

        Ok(result)
    }
}

impl PortfolioStore for JsonPortfolioStore {
    fn find_by_source_link(&self, source_link: &str) -> Result<Option<PortfolioEntry>> {
        Ok(self
            .read()?
            .entries
            .into_iter()
            .find(|e| e.source_link == source_link))
    }

    fn find_by_repo_name(&self, repo_name: &str) -> Result<Option<PortfolioEntry>> {
        Ok(self
            .read()?
            .entries
            .into_iter()
            .find(|e| e.repo_name == repo_name))
    }

    fn upsert(&self, entry: NewPortfolioEntry) -> Result<UpsertOutcome> {
        self.mutate(|store| {
            if let Some(existing) = store
                .entries
                .iter_mut()
                .find(|e| e.source_link == entry.source_link)
            {
                existing.repo_owner = entry.repo_owner;
                existing.repo_name = entry.repo_name;
                existing.name = entry.name;
                existing.description = entry.description;
                if let Some(image) = entry.preview_image {
                    existing.preview_image = image;
                }
                existing.live_link = entry.live_link;
                existing.technologies = entry.technologies;
                existing.badge = entry.badge;
                debug!("Updated portfolio entry {}", existing.id);
                UpsertOutcome {
                    id: existing.id,
                    updated: true,
                }
            } else {
                store.next_id += 1;
                let id = store.next_id;
                store.entries.push(PortfolioEntry {
                    id,
                    source_link: entry.source_link,
                    repo_owner: entry.repo_owner,
                    repo_name: entry.repo_name,
                    name: entry.name,
                    description: entry.description,
                    preview_image: entry.preview_image.unwrap_or_default(),
                    live_link: entry.live_link,
                    technologies: entry.technologies,
                    badge: entry.badge,
                });
                info!("Created portfolio entry {}", id);
                UpsertOutcome { id, updated: false }
            }
        })
    }

    fn update_entry(&self, id: u64, patch: EntryPatch) -> Result<PortfolioEntry> {
        self.mutate(|store| {
            let entry = store.entries.iter_mut().find(|e| e.id == id)?;
            if let Some(name_es) = patch.name_es {
                entry.name.es = name_es;
            }
            if let Some(name_en) = patch.name_en {
                entry.name.en = name_en;
            }
            if let Some(description_es) = patch.description_es {
                entry.description.es = description_es;
            }
            if let Some(description_en) = patch.description_en {
                entry.description.en = description_en;
            }
            if let Some(image) = patch.preview_image {
                entry.preview_image = image;
            }
            if let Some(live_link) = patch.live_link {
                entry.live_link = live_link;
            }
            if let Some(technologies) = patch.technologies {
                entry.technologies = technologies;
            }
            if let Some(badge) = patch.badge {
                entry.badge = badge;
            }
            Some(entry.clone())
        })?
        .ok_or_else(|| Error::not_found(format!("portfolio entry {}", id)))
    }

    fn delete_by_repo_name(&self, repo_name: &str) -> Result<bool> {
        self.mutate(|store| {
            let before = store.entries.len();
            store.entries.retain(|e| e.repo_name != repo_name);
            before != store.entries.len()
        })
    }

    fn list(&self) -> Result<Vec<PortfolioEntry>> {
        Ok(self.read()?.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::LocalizedText;
    use tempfile::TempDir;

    fn store() -> (TempDir, JsonPortfolioStore) {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("portfolio.json")).unwrap();
        (dir, JsonPortfolioStore::new(path))
    }

    fn entry_for(repo: &str) -> NewPortfolioEntry {
        NewPortfolioEntry {
            source_link: format!("https://github.com/thisisrober/{}", repo),
            repo_owner: "thisisrober".into(),
            repo_name: repo.into(),
            name: LocalizedText::new("Aplicación demo", "Demo app"),
            description: LocalizedText::new("Una demo", "A demo"),
            preview_image: None,
            live_link: format!("/projects/{}", repo),
            technologies: vec!["Rust".into(), "React".into()],
            badge: "new".into(),
        }
    }

    #[test]
    fn test_insert_creates_one_row() {
        let (_dir, store) = store();
        let outcome = store.upsert(entry_for("demo-app")).unwrap();
        assert!(!outcome.updated);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_same_source_link_preserves_id() {
        let (_dir, store) = store();
        let first = store.upsert(entry_for("demo-app")).unwrap();

        let mut second = entry_for("demo-app");
        second.name = LocalizedText::new("Nuevo nombre", "New name");
        let outcome = store.upsert(second).unwrap();

        assert!(outcome.updated);
        assert_eq!(outcome.id, first.id);
        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name.en, "New name");
    }

    #[test]
    fn test_distinct_source_links_create_distinct_rows() {
        let (_dir, store) = store();
        store.upsert(entry_for("demo-app")).unwrap();
        store.upsert(entry_for("other-app")).unwrap();
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_update_keeps_image_when_absent() {
        let (_dir, store) = store();
        let mut with_image = entry_for("demo-app");
        with_image.preview_image = Some("shot.png".into());
        store.upsert(with_image).unwrap();

        // Re-attach without a new image
        store.upsert(entry_for("demo-app")).unwrap();
        let entry = store.find_by_repo_name("demo-app").unwrap().unwrap();
        assert_eq!(entry.preview_image, "shot.png");
    }

    #[test]
    fn test_find_by_repo_name_uses_structured_field() {
        let (_dir, store) = store();
        store.upsert(entry_for("app")).unwrap();
        store.upsert(entry_for("my-app")).unwrap();

        // "app" must not match the "my-app" entry by suffix
        let found = store.find_by_repo_name("app").unwrap().unwrap();
        assert_eq!(found.repo_name, "app");
    }

    #[test]
    fn test_patch_merges_fields() {
        let (_dir, store) = store();
        let id = store.upsert(entry_for("demo-app")).unwrap().id;

        let patched = store
            .update_entry(
                id,
                EntryPatch {
                    name_en: Some("Renamed demo".into()),
                    badge: Some("featured".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(patched.badge, "featured");
        assert_eq!(patched.name.en, "Renamed demo");
        // Untouched fields survive, including the other language
        assert_eq!(patched.name.es, "Aplicación demo");
    }

    #[test]
    fn test_patch_unknown_id_is_not_found() {
        let (_dir, store) = store();
        let err = store.update_entry(99, EntryPatch::default()).unwrap_err();
        assert_eq!(err.kind(), brokkr_core::error::ErrorKind::NotFound);
    }

    #[test]
    fn test_delete_by_repo_name() {
        let (_dir, store) = store();
        store.upsert(entry_for("demo-app")).unwrap();
        assert!(store.delete_by_repo_name("demo-app").unwrap());
        assert!(!store.delete_by_repo_name("demo-app").unwrap());
        assert!(store.list().unwrap().is_empty());
    }
}
