//! Values mirrored into a durable key-value store
//!
//! A `PersistentValue` starts at its default, is rehydrated from storage in a
//! separate `hydrate` step, and is written back on every change. Storage
//! failures never reach the caller: reads fall back to the default and writes
//! leave the in-memory value authoritative, both with an error log.

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;
use crate::platform::storage::KeyValueStore;

pub struct PersistentValue<T> {
    key: String,
    default: T,
    value: T,
    store: Rc<dyn KeyValueStore>,
}

impl<T> PersistentValue<T>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned,
{
    /// Create at the default value. Storage is not touched until `hydrate`.
    pub fn new(key: impl Into<String>, default: T, store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            key: key.into(),
            value: default.clone(),
            default,
            store,
        }
    }

    /// `new` followed by `hydrate`
    pub fn load(key: impl Into<String>, default: T, store: Rc<dyn KeyValueStore>) -> Self {
        let mut value = Self::new(key, default, store);
        value.hydrate();
        value
    }

    /// Replace the in-memory value with the stored one, if any.
    ///
    /// Missing keys keep the default and corrupt payloads reset to it; both
    /// are then repaired by writing the default back. When the backend itself
    /// fails to read, the default is used in memory but storage is left alone
    /// so a transient failure cannot erase saved state.
    pub fn hydrate(&mut self) {
        let stored = match self.store.get(&self.key) {
            Ok(stored) => stored,
            Err(e) => {
                log::error!("Error reading from storage for key \"{}\": {}", self.key, e);
                self.value = self.default.clone();
                return;
            }
        };
        match stored.map(|json| serde_json::from_str::<T>(&json)) {
            Some(Ok(value)) => {
                log::debug!("Rehydrated \"{}\" from storage", self.key);
                self.value = value;
            }
            Some(Err(e)) => {
                log::error!("Error parsing stored value for key \"{}\": {}", self.key, e);
                self.value = self.default.clone();
            }
            None => {}
        }
        self.persist();
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and write it through
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.persist();
    }

    /// Modify the value in place and write it through
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.persist();
    }

    /// Write rule: a non-default value is always written. The default is
    /// written only when storage disagrees with it, so resetting to the
    /// default still reaches storage.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.value) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Error serializing value for key \"{}\": {}", self.key, e);
                return;
            }
        };

        if self.value == self.default {
            match self.store.get(&self.key) {
                Ok(Some(stored)) if stored == json => return,
                Ok(_) => {}
                Err(e) => {
                    log::warn!("Error reading from storage for key \"{}\": {}", self.key, e);
                }
            }
        }

        if let Err(e) = self.store.set(&self.key, &json) {
            log::error!("Error writing to storage for key \"{}\": {}", self.key, e);
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for PersistentValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentValue")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("default", &self.default)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use super::*;
    use crate::platform::storage::MemoryStore;

    /// Store that counts writes and can be told to fail
    #[derive(Default)]
    pub(crate) struct FlakyStore {
        pub entries: RefCell<HashMap<String, String>>,
        pub fail_reads: Cell<bool>,
        pub fail_writes: Cell<bool>,
        pub writes: Cell<usize>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_reads.get() {
                return Err(StorageError::Unavailable("reads disabled".to_string()));
            }
            Ok(self.entries.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes.get() {
                return Err(StorageError::WriteRejected {
                    key: key.to_string(),
                    reason: "quota exceeded".to_string(),
                });
            }
            self.writes.set(self.writes.get() + 1);
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn memory() -> Rc<MemoryStore> {
        Rc::new(MemoryStore::new())
    }

    #[test]
    fn test_starts_at_default_without_touching_storage() {
        let store = memory();
        let value = PersistentValue::new("page", 1usize, store.clone());
        assert_eq!(*value.get(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_round_trip_through_fresh_instance() {
        let store = memory();
        let mut value = PersistentValue::load("term", String::new(), store.clone());
        value.set("bo".to_string());

        // Any default: the stored value wins
        let fresh = PersistentValue::load("term", "zzz".to_string(), store.clone());
        assert_eq!(fresh.get(), "bo");
    }

    #[test]
    fn test_hydrate_writes_default_when_missing() {
        let store = memory();
        let value = PersistentValue::load("size", 10usize, store.clone());
        assert_eq!(*value.get(), 10);
        assert_eq!(store.get("size").unwrap().as_deref(), Some("10"));
    }

    #[test]
    fn test_corrupt_payload_falls_back_and_is_repaired() {
        let store = memory();
        store.set("size", "{not json").unwrap();
        let value = PersistentValue::load("size", 10usize, store.clone());
        assert_eq!(*value.get(), 10);
        assert_eq!(store.get("size").unwrap().as_deref(), Some("10"));
    }

    #[test]
    fn test_wrong_type_payload_falls_back() {
        let store = memory();
        store.set("size", "\"fifty\"").unwrap();
        let value = PersistentValue::load("size", 10usize, store.clone());
        assert_eq!(*value.get(), 10);
    }

    #[test]
    fn test_reset_to_default_is_persisted() {
        let store = memory();
        let mut value = PersistentValue::load("page", 1usize, store.clone());
        value.set(4);
        assert_eq!(store.get("page").unwrap().as_deref(), Some("4"));
        value.set(1);
        assert_eq!(store.get("page").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_default_written_through_when_storage_disagrees() {
        let store = Rc::new(FlakyStore::default());
        let mut value = PersistentValue::new("page", 1usize, store.clone());
        // Something else wrote behind our back while we sit at the default
        store.set("page", "7").unwrap();
        value.set(1);
        assert_eq!(store.entries.borrow().get("page").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_default_not_rewritten_when_storage_agrees() {
        let store = Rc::new(FlakyStore::default());
        let mut value = PersistentValue::load("page", 1usize, store.clone());
        let writes = store.writes.get();
        value.set(1);
        value.set(1);
        assert_eq!(store.writes.get(), writes);
    }

    #[test]
    fn test_read_failure_uses_default() {
        let store = Rc::new(FlakyStore::default());
        store.set("term", "\"saved\"").unwrap();
        store.fail_reads.set(true);
        let value = PersistentValue::load("term", String::new(), store.clone());
        assert_eq!(value.get(), "");
    }

    #[test]
    fn test_read_failure_leaves_stored_value_intact() {
        let store = Rc::new(FlakyStore::default());
        store.set("term", "\"saved\"").unwrap();
        let writes = store.writes.get();
        store.fail_reads.set(true);
        let _value = PersistentValue::load("term", String::new(), store.clone());
        assert_eq!(store.writes.get(), writes);

        // Once the backend recovers the saved value comes back
        store.fail_reads.set(false);
        let value = PersistentValue::load("term", String::new(), store.clone());
        assert_eq!(value.get(), "saved");
    }

    #[test]
    fn test_write_failure_keeps_in_memory_value() {
        let store = Rc::new(FlakyStore::default());
        let mut value = PersistentValue::load("term", String::new(), store.clone());
        store.fail_writes.set(true);
        value.set("kept".to_string());
        assert_eq!(value.get(), "kept");
        assert_eq!(store.entries.borrow().get("term").map(String::as_str), Some("\"\""));
    }

    #[test]
    fn test_update_in_place() {
        let store = memory();
        let mut value = PersistentValue::load("page", 1usize, store.clone());
        value.update(|p| *p += 2);
        assert_eq!(*value.get(), 3);
        assert_eq!(store.get("page").unwrap().as_deref(), Some("3"));
    }
}
