//! Durable key-value storage backends
//!
//! The table core only sees `KeyValueStore`. Backends:
//! - `LocalStorage`: browser LocalStorage (wasm only)
//! - `FileStore`: one JSON object on disk, written via tmp + rename (native only)
//! - `MemoryStore`: process-local map, used in tests and as a fallback

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::StorageError;

/// String-keyed, string-valued durable store.
///
/// Methods take `&self`; backends use interior mutability so one store can be
/// shared between several persisted values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::KeyValueStore;
    use crate::error::StorageError;

    /// Store backed by a single JSON object file
    #[derive(Debug)]
    pub struct FileStore {
        path: PathBuf,
        entries: RefCell<BTreeMap<String, String>>,
    }

    impl FileStore {
        /// Open the store at `path`. A missing file is an empty store; an
        /// unreadable one is an error the caller decides how to handle.
        pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
            let path = path.into();
            let entries = match fs::read_to_string(&path) {
                Ok(json) => serde_json::from_str(&json)?,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    log::info!("No state file at {}, starting fresh", path.display());
                    BTreeMap::new()
                }
                Err(e) => return Err(e.into()),
            };
            Ok(Self {
                path,
                entries: RefCell::new(entries),
            })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn flush(&self) -> Result<(), StorageError> {
            let json = serde_json::to_string_pretty(&*self.entries.borrow())?;
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let tmp = self.path.with_extension("tmp");
            fs::write(&tmp, json)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.entries.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            let previous = self
                .entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            if let Err(e) = self.flush() {
                // Keep the map in step with what is on disk
                let mut entries = self.entries.borrow_mut();
                match previous {
                    Some(old) => entries.insert(key.to_string(), old),
                    None => entries.remove(key),
                };
                return Err(e);
            }
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::KeyValueStore;
    use crate::error::StorageError;

    /// Browser LocalStorage
    pub struct LocalStorage {
        storage: web_sys::Storage,
    }

    impl LocalStorage {
        /// Grab the window's LocalStorage (fails in sandboxed iframes, some
        /// private-browsing modes, or outside a window context)
        pub fn open() -> Result<Self, StorageError> {
            let storage = web_sys::window()
                .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?
                .local_storage()
                .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
                .ok_or_else(|| StorageError::Unavailable("LocalStorage disabled".to_string()))?;
            Ok(Self { storage })
        }
    }

    impl KeyValueStore for LocalStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.storage
                .get_item(key)
                .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            // Throws QuotaExceededError when full
            self.storage
                .set_item(key, value)
                .map_err(|e| StorageError::WriteRejected {
                    key: key.to_string(),
                    reason: format!("{:?}", e),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "\"v\"").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("\"v\""));
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        {
            let store = FileStore::open(&path).unwrap();
            assert_eq!(store.get("comments_pageSize").unwrap(), None);
            store.set("comments_pageSize", "50").unwrap();
        }
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("comments_pageSize").unwrap().as_deref(),
            Some("50")
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_creates_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let store = FileStore::open(&path).unwrap();
        store.set("comments_searchTerm", "\"bo\"").unwrap();
        assert!(path.exists());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(StorageError::Serialization(_))
        ));
    }
}
