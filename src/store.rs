use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context as _;

use crate::page::ThemeStore;

/// Key-value store persisted as a flat JSON object.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl FileStore {
    /// A missing file opens as an empty store.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("parse store {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("read store {}", path.display()));
            }
        };
        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    /// Writes the store back if anything changed since it was opened.
    pub fn save(&mut self) -> anyhow::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries).context("encode store")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("write store {}", self.path.display()))?;
        self.dirty = false;
        tracing::debug!(path = %self.path.display(), "saved store");
        Ok(())
    }
}

impl ThemeStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.entries.get(key).map(String::as_str) != Some(value) {
            self.entries.insert(key.to_string(), value.to_string());
            self.dirty = true;
        }
    }
}
