//! Collection <-> storage slot encoding.
//!
//! Each slot holds a JSON array of records. Failures here are reported by the
//! store and never undo an in-memory mutation.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use hearth_core::{KeyValueStore, StorageError};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to encode slot `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode slot `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage failed for slot `{key}`: {source}")]
    Storage {
        key: String,
        #[source]
        source: StorageError,
    },
}

/// Serialize `value` and write it under `key`.
pub fn save_slot<S, T>(storage: &S, key: &str, value: &T) -> Result<(), PersistError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string(value).map_err(|source| PersistError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage
        .save(key, &payload)
        .map_err(|source| PersistError::Storage {
            key: key.to_string(),
            source,
        })
}

/// Read and decode the records stored under `key`. An absent slot is `Ok(None)`.
pub fn load_slot<S, T>(storage: &S, key: &str) -> Result<Option<Vec<T>>, PersistError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(payload) = storage.load(key).map_err(|source| PersistError::Storage {
        key: key.to_string(),
        source,
    })?
    else {
        return Ok(None);
    };

    serde_json::from_str(&payload)
        .map(Some)
        .map_err(|source| PersistError::Decode {
            key: key.to_string(),
            source,
        })
}
