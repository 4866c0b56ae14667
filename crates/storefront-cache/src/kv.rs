//! Key-Value store wrapper with automatic serialization.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::backend::{FileBackend, KvBackend, MemoryBackend};
use crate::CacheError;

/// Type-safe cache over a [`KvBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn KvBackend>,
}

impl Cache {
    /// Open a file-backed store rooted at `dir`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open("/home/me/.local/share/storefront")?;
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let backend = FileBackend::open(dir)?;
        tracing::debug!(dir = %backend.dir().display(), "opened snapshot store");
        Ok(Self::with_backend(Arc::new(backend)))
    }

    /// Create a cache that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()))
    }

    /// Wrap an existing backend.
    pub fn with_backend(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// bytes don't deserialize into `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let lines: Option<Vec<CartLine>> = cache.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("cart", &lines)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.backend.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.backend.keys()
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: u64,
        quantity: u32,
    }

    #[test]
    fn test_typed_roundtrip_in_memory() {
        let cache = Cache::in_memory();
        let entries = vec![Entry { id: 1, quantity: 2 }];

        cache.set("cart", &entries).unwrap();
        let loaded: Option<Vec<Entry>> = cache.get("cart").unwrap();
        assert_eq!(loaded, Some(entries));
    }

    #[test]
    fn test_get_missing_key() {
        let cache = Cache::in_memory();
        let loaded: Option<Vec<Entry>> = cache.get("cart").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_get_wrong_shape_is_serialize_error() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set("cart", b"{\"not\":\"a list\"}").unwrap();
        let cache = Cache::with_backend(backend);

        let result: Result<Option<Vec<Entry>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_file_cache_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let cache = Cache::open(dir.path()).unwrap();
            cache.set("cart", &vec![Entry { id: 7, quantity: 1 }]).unwrap();
        }
        let cache = Cache::open(dir.path()).unwrap();
        let loaded: Option<Vec<Entry>> = cache.get("cart").unwrap();
        assert_eq!(loaded, Some(vec![Entry { id: 7, quantity: 1 }]));
        assert_eq!(cache.keys().unwrap(), vec!["cart".to_string()]);
    }

    #[test]
    fn test_delete_and_exists() {
        let cache = Cache::in_memory();
        cache.set("cart", &Vec::<Entry>::new()).unwrap();
        assert!(cache.exists("cart").unwrap());
        cache.delete("cart").unwrap();
        assert!(!cache.exists("cart").unwrap());
    }
}
