//! Household inventory domain: shopping list, kitchen stock and recipes.
//!
//! This crate contains the reconciliation engine, implemented as
//! deterministic domain logic. Storage is reached only through the
//! `KeyValueStore` collaborator from `hearth-core`.

mod collection;
pub mod kitchen;
pub mod name;
pub mod persistence;
pub mod quantity;
pub mod recipe;
pub mod reconcile;
pub mod sample;
pub mod shared;
pub mod shopping;
pub mod store;

pub use kitchen::{Kitchen, KitchenItem};
pub use name::normalize;
pub use persistence::PersistError;
pub use recipe::{Recipe, RecipeBook, RecipeIngredient};
pub use reconcile::MissingIngredient;
pub use shared::SharedInventoryStore;
pub use shopping::{ShoppingItem, ShoppingList, ShoppingView};
pub use store::InventoryStore;
