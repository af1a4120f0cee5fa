use std::collections::HashMap;
use std::sync::RwLock;

use hearth_core::{KeyValueStore, StorageError};

/// In-memory key/value store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`, for inspection.
    pub fn get(&self, key: &str) -> Option<String> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut keys: Vec<_> = map.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StorageError::backend("in-memory store lock poisoned"))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StorageError::backend("in-memory store lock poisoned"))?;
        Ok(map.get(key).cloned())
    }
}
