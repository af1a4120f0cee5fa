//! File-backed key/value store: one JSON document per key.
//!
//! Each file is an envelope `{ "saved_at": <rfc3339>, "data": <payload> }`.
//! Writes go to a temporary sibling and are renamed into place.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hearth_core::{KeyValueStore, StorageError};

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    saved_at: DateTime<Utc>,
    data: String,
}

#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// When `key` was last saved, if ever.
    pub fn saved_at(&self, key: &str) -> Result<Option<DateTime<Utc>>, StorageError> {
        Ok(self.read_envelope(key)?.map(|e| e.saved_at))
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn read_envelope(&self, key: &str) -> Result<Option<Envelope>, StorageError> {
        let path = self.path_for(key)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let envelope = serde_json::from_str(&raw).map_err(|e| {
            StorageError::backend(format!("malformed envelope at {}: {e}", path.display()))
        })?;
        Ok(Some(envelope))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let envelope = Envelope {
            saved_at: Utc::now(),
            data: value.to_string(),
        };
        let raw = serde_json::to_string(&envelope)
            .map_err(|e| StorageError::backend(format!("failed to encode envelope: {e}")))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &path)?;

        tracing::trace!(key, path = %path.display(), "slot written");
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_envelope(key)?.map(|e| e.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path().join("nested")).unwrap();

        assert_eq!(store.load("shopping_items_v1").unwrap(), None);
        assert_eq!(store.saved_at("shopping_items_v1").unwrap(), None);

        store.save("shopping_items_v1", r#"[{"name":"Milk"}]"#).unwrap();
        assert_eq!(
            store.load("shopping_items_v1").unwrap().as_deref(),
            Some(r#"[{"name":"Milk"}]"#)
        );
        assert!(store.saved_at("shopping_items_v1").unwrap().is_some());
        assert!(dir.path().join("nested/shopping_items_v1.json").exists());
        assert!(!dir.path().join("nested/shopping_items_v1.json.tmp").exists());
    }

    #[test]
    fn reopening_sees_previous_writes() {
        let dir = tempfile::tempdir().unwrap();
        FileKeyValueStore::open(dir.path())
            .unwrap()
            .save("recipes_v1", "[]")
            .unwrap();

        let reopened = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(reopened.load("recipes_v1").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn path_escaping_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();

        for key in ["../evil", "a/b", "", ".hidden"] {
            match store.save(key, "x") {
                Err(StorageError::InvalidKey(k)) => assert_eq!(k, key),
                other => panic!("expected InvalidKey for {key:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_envelope_is_a_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("kitchen_items_v1.json"), "garbage").unwrap();

        assert!(matches!(
            store.load("kitchen_items_v1"),
            Err(StorageError::Backend(_))
        ));
    }
}
