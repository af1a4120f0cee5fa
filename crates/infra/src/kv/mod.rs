//! `KeyValueStore` adapters.

pub mod file;
pub mod in_memory;

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;
