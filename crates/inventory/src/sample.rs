//! A small sample household, used to populate an empty store.

use hearth_core::{Entity, KeyValueStore};

use crate::store::InventoryStore;

impl<S> InventoryStore<S>
where
    S: KeyValueStore,
{
    /// Add the sample shopping list, kitchen stock and two recipes.
    ///
    /// Goes through the regular operations, so it merges with existing state.
    pub fn seed_sample(&mut self) {
        self.add_or_increment_shopping("Apples", 2);
        self.add_or_increment_shopping("Milk", 1);
        self.add_or_increment_shopping("Pasta", 3);
        if let Some(milk) = self
            .shopping()
            .items()
            .iter()
            .find(|i| i.name() == "Milk" && !i.is_checked())
            .map(|i| *i.id())
        {
            self.toggle(milk);
        }

        self.add_to_kitchen("Eggs", 6);
        self.add_to_kitchen("Flour", 1);

        if let Some(spaghetti) = self.add_recipe("Spaghetti") {
            self.add_ingredient("Pasta", 1, spaghetti);
            self.add_ingredient("Tomato Sauce", 2, spaghetti);
        }
        if let Some(omelette) = self.add_recipe("Omelette") {
            self.add_ingredient("Eggs", 3, omelette);
            self.add_ingredient("Milk", 1, omelette);
        }
    }
}
