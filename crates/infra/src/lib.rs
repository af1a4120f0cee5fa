//! Infrastructure layer: storage adapters and configuration.

pub mod config;
pub mod kv;

pub use config::StorageConfig;
pub use kv::{FileKeyValueStore, InMemoryKeyValueStore};
