//! Key/value persistence collaborator.
//!
//! The domain saves each collection under its own key after every mutation and
//! loads each key once at startup. How bytes reach disk (or memory) is up to
//! the adapter.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage-level failure reported by a [`KeyValueStore`] adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key cannot be used by this backend (e.g. it would escape a directory).
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Underlying IO failed.
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure (lock poisoning, malformed envelope, ...).
    #[error("storage backend failed: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Abstract key/value store holding serialized collections.
pub trait KeyValueStore: Send + Sync {
    /// Overwrite the value stored under `key`.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Return the value stored under `key`, or `None` when nothing was saved yet.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }

    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }
}

/// Names of the three independent storage slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    pub shopping: String,
    pub kitchen: String,
    pub recipes: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            shopping: "shopping_items_v1".to_string(),
            kitchen: "kitchen_items_v1".to_string(),
            recipes: "recipes_v1".to_string(),
        }
    }
}
