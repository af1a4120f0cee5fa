//! `hearth-core` — foundation building blocks for the household tracker.
//!
//! This crate contains **pure** primitives (identifiers, errors, the storage
//! collaborator contract). Concrete storage lives in `hearth-infra`.

pub mod entity;
pub mod error;
pub mod id;
pub mod storage;

pub use entity::Entity;
pub use error::DomainError;
pub use id::{IngredientId, ItemId, RecipeId};
pub use storage::{KeyValueStore, StorageError, StorageKeys};
