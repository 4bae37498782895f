/*!
 * Loaded-once dictionary cache.
 *
 * Dictionaries are compiled at most once per (directory, script) and then
 * handed out as shared read-only `Arc`s.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::ConfigError;

use super::Dictionary;

/// Cache key combining dictionary directory and script
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    dir: PathBuf,
    script: String,
}

/// Shared store of compiled dictionaries
#[derive(Debug, Clone, Default)]
pub struct DictionaryCache {
    /// Internal cache storage
    entries: Arc<RwLock<HashMap<CacheKey, Arc<Dictionary>>>>,
}

impl DictionaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached dictionary, loading and compiling it on first use
    pub fn get_or_load(&self, dir: &Path, script: &str) -> Result<Arc<Dictionary>, ConfigError> {
        let key = CacheKey {
            dir: dir.to_path_buf(),
            script: script.to_string(),
        };

        if let Some(dictionary) = self.entries.read().get(&key) {
            debug!("Dictionary cache hit for '{}'", script);
            return Ok(Arc::clone(dictionary));
        }

        let mut entries = self.entries.write();
        // Another caller may have loaded it while we waited for the write lock
        if let Some(dictionary) = entries.get(&key) {
            return Ok(Arc::clone(dictionary));
        }

        let dictionary = Arc::new(Dictionary::load(dir, script)?);
        entries.insert(key, Arc::clone(&dictionary));
        Ok(dictionary)
    }

    /// Number of cached dictionaries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every cached dictionary
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
