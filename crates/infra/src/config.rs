//! Configuration loading and representation.

use std::path::PathBuf;

use anyhow::Context;

use hearth_core::StorageKeys;

use crate::kv::FileKeyValueStore;

/// Overrides the data directory.
pub const DATA_DIR_VAR: &str = "HEARTH_DATA_DIR";

/// Where and under which keys the household is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub keys: StorageKeys,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            keys: StorageKeys::default(),
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through `lookup`, falling back to the OS data directory.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Self::resolve(lookup, default_data_dir)
    }

    fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        fallback: impl FnOnce() -> anyhow::Result<PathBuf>,
    ) -> anyhow::Result<Self> {
        let data_dir = match lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => fallback()?,
        };
        Ok(Self::new(data_dir))
    }

    pub fn open_store(&self) -> anyhow::Result<FileKeyValueStore> {
        FileKeyValueStore::open(&self.data_dir)
            .with_context(|| format!("failed to open data directory at {:?}", self.data_dir))
    }
}

/// `{app_data_dir}/hearth`, or `~/.local/share/hearth` when the OS gives no data dir.
fn default_data_dir() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;
    dir.push("hearth");
    Ok(dir)
}
