//! Cache of loaded datasets.
//!
//! Loading and parsing a dataset is the only expensive step of a session, so
//! loaded collections are kept by path and the full set of load options
//! (text column, encoding, delimiter, missing-value markers). Entries
//! are never invalidated automatically; the dataset is assumed static until
//! [`CollectionCache::invalidate`] or [`CollectionCache::clear`] is called.
//!
//! Collections are handed out as `Arc<AnnotationCollection>`. They are
//! immutable, so a caller deriving filtered views can never affect what
//! another caller sees.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ahash::AHashMap;
use log::debug;
use parking_lot::RwLock;

use crate::document::collection::AnnotationCollection;
use crate::document::loader::{CsvLoader, LoadOptions};
use crate::error::Result;

/// Key identifying one loaded dataset.
///
/// Every option that changes the parse is part of the key, so two callers
/// loading the same file differently never share an entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub path: PathBuf,
    pub options: LoadOptions,
}

impl CacheKey {
    /// Create a cache key.
    pub fn new<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Self {
        CacheKey {
            path: path.as_ref().to_path_buf(),
            options: options.clone(),
        }
    }
}

/// Process-wide store of loaded collections, owned by the caller.
#[derive(Debug, Default)]
pub struct CollectionCache {
    entries: RwLock<AHashMap<CacheKey, Arc<AnnotationCollection>>>,
}

impl CollectionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached collection for `options` and `path`, loading it on a miss.
    ///
    /// Load failures are returned and nothing is cached.
    pub fn get_or_load<P: AsRef<Path>>(
        &self,
        path: P,
        options: &LoadOptions,
    ) -> Result<Arc<AnnotationCollection>> {
        let key = CacheKey::new(path, options);

        if let Some(collection) = self.entries.read().get(&key) {
            debug!("cache hit for {}", key.path.display());
            return Ok(Arc::clone(collection));
        }

        let collection = Arc::new(CsvLoader::new(key.options.clone()).load(&key.path)?);
        let mut entries = self.entries.write();
        let entry = entries.entry(key).or_insert(collection);
        Ok(Arc::clone(entry))
    }

    /// Return the cached collection for `key` without loading.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<AnnotationCollection>> {
        self.entries.read().get(key).cloned()
    }

    /// Drop the entry for `key`. Returns whether an entry was present.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        self.entries.write().remove(key).is_some()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of cached datasets.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use crate::document::loader::Encoding;

    use tempfile::TempDir;

    fn dataset(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("annotations.csv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_loads_once() {
        let dir = TempDir::new().unwrap();
        let path = dataset(&dir, "full_text\nfirst\nsecond\n");
        let cache = CollectionCache::new();
        let options = LoadOptions::new("full_text");

        let a = cache.get_or_load(&path, &options).unwrap();
        fs::write(&path, "full_text\nchanged\n").unwrap();
        let b = cache.get_or_load(&path, &options).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(b.len(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_reloads() {
        let dir = TempDir::new().unwrap();
        let path = dataset(&dir, "full_text\nfirst\nsecond\n");
        let cache = CollectionCache::new();
        let options = LoadOptions::new("full_text");

        cache.get_or_load(&path, &options).unwrap();
        fs::write(&path, "full_text\nchanged\n").unwrap();

        let key = CacheKey::new(&path, &options);
        assert!(cache.invalidate(&key));
        assert!(!cache.invalidate(&key));

        let reloaded = cache.get_or_load(&path, &options).unwrap();
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_keys_distinguish_column_and_encoding() {
        let dir = TempDir::new().unwrap();
        let path = dataset(&dir, "label,full_text\nx,first\n");
        let cache = CollectionCache::new();

        cache.get_or_load(&path, &LoadOptions::new("full_text")).unwrap();
        cache.get_or_load(&path, &LoadOptions::new("label")).unwrap();
        cache
            .get_or_load(
                &path,
                &LoadOptions::new("full_text").with_encoding(Encoding::Latin1),
            )
            .unwrap();

        assert_eq!(cache.len(), 3);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_keys_distinguish_parse_options() {
        let dir = TempDir::new().unwrap();
        let path = dataset(&dir, "full_text\nNA\nhello\n");
        let cache = CollectionCache::new();

        let defaults = cache.get_or_load(&path, &LoadOptions::new("full_text")).unwrap();
        let keep_markers = cache
            .get_or_load(&path, &LoadOptions::new("full_text").with_na_values(Vec::new()))
            .unwrap();

        assert_eq!(defaults.texts().flatten().count(), 1);
        assert_eq!(keep_markers.texts().flatten().count(), 2);
        assert!(!Arc::ptr_eq(&defaults, &keep_markers));

        cache
            .get_or_load(&path, &LoadOptions::new("full_text").with_delimiter(b';'))
            .unwrap();
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_failed_load_not_cached() {
        let dir = TempDir::new().unwrap();
        let path = dataset(&dir, "body\nfirst\n");
        let cache = CollectionCache::new();

        assert!(cache.get_or_load(&path, &LoadOptions::new("full_text")).is_err());
        assert!(cache.is_empty());
    }
}
