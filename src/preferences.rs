//! Durable key-value storage for the user's language preference.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::debug;

/// Key under which the selected language is stored.
pub const PREFERRED_LANGUAGE_KEY: &str = "preferredLanguage";

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("preference file is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
    #[error("preference store lock was poisoned")]
    Poisoned,
}

/// Minimal get/set store, in the spirit of a browser's local storage.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Stores every key in one JSON object on disk.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/localized-page/preferences.json`, when a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("localized-page").join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn io_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        let serialized = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, serialized).map_err(|source| self.io_error(source))?;
        debug!("Stored preference {key}={value} in {}", self.path.display());
        Ok(())
    }
}

/// In-memory store. Clones share the same entries, which lets a test keep a
/// handle while the page owns another and then "reload" against it.
#[derive(Clone, Default)]
pub struct MemoryPreferenceStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let entries = self.entries.lock().map_err(|_| PreferenceError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut entries = self.entries.lock().map_err(|_| PreferenceError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
