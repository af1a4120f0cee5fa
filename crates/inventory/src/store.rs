//! `InventoryStore`: the only way to mutate the three collections.
//!
//! Every operation updates in-memory state first, then saves the affected
//! slot(s). Save failures are logged and leave the in-memory result in place.

use std::collections::HashSet;

use serde::Serialize;
use serde::de::DeserializeOwned;

use hearth_core::{IngredientId, ItemId, KeyValueStore, RecipeId, StorageKeys};

use crate::kitchen::Kitchen;
use crate::persistence::{load_slot, save_slot};
use crate::recipe::RecipeBook;
use crate::reconcile::{self, MissingIngredient};
use crate::shopping::{ShoppingList, ShoppingView};

#[derive(Debug)]
pub struct InventoryStore<S> {
    storage: S,
    keys: StorageKeys,
    shopping: ShoppingList,
    kitchen: Kitchen,
    recipes: RecipeBook,
}

impl<S> InventoryStore<S>
where
    S: KeyValueStore,
{
    /// Load all three slots. Missing or undecodable slots start empty.
    pub fn open(storage: S, keys: StorageKeys) -> Self {
        let shopping = load_collection(&storage, &keys.shopping, ShoppingList::from_records);
        let kitchen = load_collection(&storage, &keys.kitchen, Kitchen::from_records);
        let recipes = load_collection(&storage, &keys.recipes, RecipeBook::from_records);

        tracing::debug!(
            shopping = shopping.len(),
            kitchen = kitchen.len(),
            recipes = recipes.len(),
            "inventory store opened"
        );

        Self {
            storage,
            keys,
            shopping,
            kitchen,
            recipes,
        }
    }

    pub fn shopping(&self) -> &ShoppingList {
        &self.shopping
    }

    pub fn kitchen(&self) -> &Kitchen {
        &self.kitchen
    }

    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.shopping.is_empty() && self.kitchen.is_empty() && self.recipes.is_empty()
    }

    // --- shopping list ---

    pub fn add_or_increment_shopping(&mut self, name: &str, quantity: i64) {
        if self.shopping.add_or_increment(name, quantity) {
            tracing::debug!(name, quantity, "shopping item added");
            self.save_shopping();
        }
    }

    pub fn toggle(&mut self, id: ItemId) {
        if self.shopping.toggle(id) {
            self.save_shopping();
        }
    }

    pub fn delete_shopping(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        let ids: HashSet<ItemId> = ids.into_iter().collect();
        if self.shopping.remove_ids(&ids) {
            self.save_shopping();
        }
    }

    /// Delete entries by their positions in a filtered view.
    ///
    /// Offsets are resolved to ids against the current view before anything is removed.
    pub fn delete_shopping_at(&mut self, view: ShoppingView, offsets: &[usize]) {
        let ids = self.shopping.ids_at(view, offsets);
        self.delete_shopping(ids);
    }

    /// Transfer every checked entry into the kitchen, then clear them from the list.
    ///
    /// Both collections are updated before either is saved.
    pub fn complete_shopping(&mut self) -> usize {
        let moved = reconcile::complete_shopping(&mut self.shopping, &mut self.kitchen);
        if moved > 0 {
            tracing::info!(moved, "shopping completed");
            self.save_kitchen();
            self.save_shopping();
        }
        moved
    }

    // --- kitchen ---

    pub fn add_to_kitchen(&mut self, name: &str, delta: i64) {
        if self.kitchen.add(name, delta) {
            tracing::debug!(name, delta, "kitchen stock adjusted");
            self.save_kitchen();
        }
    }

    /// Set an entry to an exact quantity. Zero removes it; negative values are ignored.
    pub fn set_kitchen_quantity(&mut self, id: ItemId, quantity: i64) {
        if self.kitchen.set_quantity(id, quantity) {
            tracing::debug!(%id, quantity, "kitchen quantity set");
            self.save_kitchen();
        }
    }

    pub fn delete_kitchen(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        let ids: HashSet<ItemId> = ids.into_iter().collect();
        if self.kitchen.remove_ids(&ids) {
            self.save_kitchen();
        }
    }

    // --- recipes ---

    /// Create an empty recipe. A blank name creates nothing and returns `None`.
    pub fn add_recipe(&mut self, name: &str) -> Option<RecipeId> {
        let id = self.recipes.add_recipe(name)?;
        tracing::debug!(%id, name = name.trim(), "recipe added");
        self.save_recipes();
        Some(id)
    }

    pub fn add_ingredient(
        &mut self,
        name: &str,
        quantity: i64,
        recipe_id: RecipeId,
    ) -> Option<IngredientId> {
        let id = self.recipes.add_ingredient(name, quantity, recipe_id)?;
        self.save_recipes();
        Some(id)
    }

    pub fn delete_ingredient(
        &mut self,
        ids: impl IntoIterator<Item = IngredientId>,
        recipe_id: RecipeId,
    ) {
        let ids: HashSet<IngredientId> = ids.into_iter().collect();
        if self.recipes.remove_ingredients(&ids, recipe_id) {
            self.save_recipes();
        }
    }

    pub fn delete_recipe(&mut self, ids: impl IntoIterator<Item = RecipeId>) {
        let ids: HashSet<RecipeId> = ids.into_iter().collect();
        if self.recipes.remove_recipes(&ids) {
            self.save_recipes();
        }
    }

    // --- reconciliation ---

    /// What `recipe_id` would still need, without queueing anything.
    pub fn missing_ingredients(&self, recipe_id: RecipeId) -> Vec<MissingIngredient> {
        match self.recipes.get(recipe_id) {
            Some(recipe) => reconcile::missing_ingredients(recipe, &self.kitchen, &self.shopping),
            None => Vec::new(),
        }
    }

    /// Queue what `recipe_id` needs beyond kitchen stock and queued purchases.
    ///
    /// Returns one entry per item actually added; unknown recipes add nothing.
    pub fn add_missing_ingredients_to_shopping(
        &mut self,
        recipe_id: RecipeId,
    ) -> Vec<MissingIngredient> {
        let Some(recipe) = self.recipes.get(recipe_id) else {
            return Vec::new();
        };

        let added = reconcile::add_missing_ingredients(recipe, &self.kitchen, &mut self.shopping);
        if !added.is_empty() {
            tracing::info!(%recipe_id, items = added.len(), "missing ingredients queued");
            self.save_shopping();
        }
        added
    }

    // --- persistence ---

    fn save_shopping(&self) {
        self.save(&self.keys.shopping, &self.shopping);
    }

    fn save_kitchen(&self) {
        self.save(&self.keys.kitchen, &self.kitchen);
    }

    fn save_recipes(&self) {
        self.save(&self.keys.recipes, &self.recipes);
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(err) = save_slot(&self.storage, key, value) {
            tracing::error!("failed to persist inventory slot: {err}");
        }
    }
}

fn load_collection<S, T, C>(storage: &S, key: &str, rebuild: fn(Vec<T>) -> (C, bool)) -> C
where
    S: KeyValueStore,
    T: DeserializeOwned,
    C: Default,
{
    match load_slot(storage, key) {
        Ok(Some(records)) => {
            let (collection, repaired) = rebuild(records);
            if repaired {
                tracing::warn!(key, "stored collection violated invariants and was repaired");
            }
            collection
        }
        Ok(None) => C::default(),
        Err(err) => {
            tracing::error!("failed to load inventory slot, starting empty: {err}");
            C::default()
        }
    }
}
