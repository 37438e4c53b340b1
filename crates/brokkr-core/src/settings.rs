//! Key/value settings store
//!
//! Fulfills the settings-store contract the provisioning stack consumes:
//! `get(key) -> Option<String>` and `upsert(key, value)`. The file-backed
//! implementation keeps a single JSON object on disk and takes an exclusive
//! lock for the read-modify-write cycle, so concurrent writers resolve to
//! last-write-wins without torn files.

use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use fs4::fs_std::FileExt;
use serde_json::{Map, Value};
use std::fs::OpenOptions;
use std::io::{Read, Seek, Write};

/// Key/value settings storage
pub trait SettingsStore: Send + Sync {
    /// Fetch a value by key
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value
    fn upsert(&self, key: &str, value: &str) -> Result<()>;
}

/// JSON-file-backed settings store
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: Utf8PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/settings.json`
    pub fn in_dir(dir: &Utf8Path) -> Self {
        Self::new(dir.join("settings.json"))
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if !raw.trim().is_empty() => {
                let value: Value = serde_json::from_str(&raw)?;
                Ok(value.as_object().cloned().unwrap_or_default())
            }
            Ok(_) => Ok(Map::new()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.read_map()?;
        Ok(map.get(key).and_then(|v| v.as_str()).map(String::from))
    }

    fn upsert(&self, key: &str, value: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;

        // Exclusive lock held for the whole read-modify-write cycle
        file.lock_exclusive()?;

        let mut raw = String::new();
        file.read_to_string(&mut raw)?;
        let mut map: Map<String, Value> = if raw.trim().is_empty() {
            Map::new()
        } else {
            serde_json::from_str::<Value>(&raw)?
                .as_object()
                .cloned()
                .unwrap_or_default()
        };

        map.insert(key.to_string(), Value::String(value.to_string()));

        file.set_len(0)?;
        file.rewind()?;
        file.write_all(serde_json::to_string_pretty(&Value::Object(map))?.as_bytes())?;
        file.sync_all()?;

        Ok(())
    }
}
