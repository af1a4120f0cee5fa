//! Kitchen inventory: stock on hand.
//!
//! Every quantity change goes through [`Kitchen::add`], which floors at zero
//! and removes records that reach it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use hearth_core::{Entity, ItemId};

use crate::collection::remove_by_ids;
use crate::name::{normalize, trimmed};
use crate::quantity::settle;

/// On-hand stock of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitchenItem {
    id: ItemId,
    name: String,
    quantity: i64,
}

impl KitchenItem {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

impl Entity for KitchenItem {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.id
    }
}

/// Ordered kitchen inventory.
///
/// Invariants: no two entries share a normalized name; every quantity is >= 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Kitchen {
    items: Vec<KitchenItem>,
}

impl Kitchen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored records by replaying each one as an addition.
    ///
    /// Valid records keep their ids; merged or dropped records mark the result as repaired.
    pub(crate) fn from_records(records: Vec<KitchenItem>) -> (Self, bool) {
        let mut kitchen = Self::new();
        let mut repaired = false;

        for record in records {
            match trimmed(&record.name) {
                Some(name) if record.quantity > 0 && kitchen.position(name).is_none() => {
                    if name.len() != record.name.len() {
                        repaired = true;
                    }
                    kitchen.items.push(KitchenItem {
                        id: record.id,
                        name: name.to_string(),
                        quantity: record.quantity,
                    });
                }
                _ => {
                    if record.quantity > 0 {
                        kitchen.add(&record.name, record.quantity);
                    }
                    repaired = true;
                }
            }
        }

        (kitchen, repaired)
    }

    pub fn items(&self) -> &[KitchenItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&KitchenItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Sum of quantities whose name normalizes to the same key as `name`.
    ///
    /// The invariant allows at most one match; the sum tolerates more.
    pub fn quantity_of(&self, name: &str) -> i64 {
        let key = normalize(name);
        self.items
            .iter()
            .filter(|i| normalize(&i.name) == key)
            .map(|i| i.quantity)
            .sum()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let key = normalize(name);
        self.items.iter().position(|i| normalize(&i.name) == key)
    }

    /// Apply a signed `delta` to the entry named `name`.
    ///
    /// - existing entry: quantity becomes `max(0, current + delta)`; zero removes it
    /// - no entry, positive delta: a new entry is appended
    /// - no entry, negative delta, zero delta, blank name: no-op
    pub(crate) fn add(&mut self, name: &str, delta: i64) -> bool {
        let Some(name) = trimmed(name) else {
            return false;
        };
        if delta == 0 {
            return false;
        }

        match self.position(name) {
            Some(idx) => {
                match settle(self.items[idx].quantity, delta) {
                    Some(quantity) => self.items[idx].quantity = quantity,
                    None => {
                        self.items.remove(idx);
                    }
                }
                true
            }
            None if delta > 0 => {
                self.items.push(KitchenItem {
                    id: ItemId::new(),
                    name: name.to_string(),
                    quantity: delta,
                });
                true
            }
            None => false,
        }
    }

    /// Set the entry `id` to exactly `quantity` by feeding the difference through [`Kitchen::add`].
    pub(crate) fn set_quantity(&mut self, id: ItemId, quantity: i64) -> bool {
        if quantity < 0 {
            return false;
        }
        let Some(item) = self.get(id) else {
            return false;
        };
        let name = item.name.clone();
        let delta = quantity.saturating_sub(item.quantity);
        self.add(&name, delta)
    }

    pub(crate) fn remove_ids(&mut self, ids: &HashSet<ItemId>) -> bool {
        remove_by_ids(&mut self.items, ids)
    }
}

impl<'de> Deserialize<'de> for Kitchen {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let records = Vec::<KitchenItem>::deserialize(deserializer)?;
        Ok(Self::from_records(records).0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn negative_delta_on_empty_kitchen_is_noop() {
        let mut kitchen = Kitchen::new();
        assert!(!kitchen.add("Eggs", -100));
        assert!(kitchen.is_empty());
    }

    #[test]
    fn reaching_zero_removes_the_entry() {
        let mut kitchen = Kitchen::new();
        kitchen.add("Eggs", 3);
        assert!(kitchen.add("eggs", -3));
        assert!(kitchen.is_empty());
        assert_eq!(kitchen.quantity_of("EGGS"), 0);
    }

    #[test]
    fn overdraw_floors_and_removes() {
        let mut kitchen = Kitchen::new();
        kitchen.add("Flour", 2);
        kitchen.add(" flour ", -10);
        assert!(kitchen.is_empty());
    }

    #[test]
    fn merge_keeps_first_display_name_and_id() {
        let mut kitchen = Kitchen::new();
        kitchen.add("Milk", 1);
        let id = *kitchen.items()[0].id();
        kitchen.add("MILK ", 2);

        assert_eq!(kitchen.len(), 1);
        let item = kitchen.get(id).unwrap();
        assert_eq!(item.name(), "Milk");
        assert_eq!(item.quantity(), 3);
    }

    #[test]
    fn zero_delta_and_blank_name_are_ignored() {
        let mut kitchen = Kitchen::new();
        kitchen.add("Salt", 1);
        assert!(!kitchen.add("Salt", 0));
        assert!(!kitchen.add("  ", 5));
        assert_eq!(kitchen.quantity_of("salt"), 1);
    }

    #[test]
    fn set_quantity_derives_delta() {
        let mut kitchen = Kitchen::new();
        kitchen.add("Eggs", 6);
        let id = *kitchen.items()[0].id();

        assert!(kitchen.set_quantity(id, 2));
        assert_eq!(kitchen.quantity_of("eggs"), 2);

        assert!(!kitchen.set_quantity(id, 2));
        assert!(!kitchen.set_quantity(id, -1));
        assert!(!kitchen.set_quantity(ItemId::new(), 4));

        assert!(kitchen.set_quantity(id, 0));
        assert!(kitchen.is_empty());
    }

    #[test]
    fn rebuild_merges_duplicates_and_drops_empty_records() {
        let keep = ItemId::new();
        let records = vec![
            KitchenItem { id: keep, name: "Rice".into(), quantity: 2 },
            KitchenItem { id: ItemId::new(), name: "rice".into(), quantity: 1 },
            KitchenItem { id: ItemId::new(), name: "Oil".into(), quantity: 0 },
        ];

        let (kitchen, repaired) = Kitchen::from_records(records);
        assert!(repaired);
        assert_eq!(kitchen.len(), 1);
        assert_eq!(kitchen.get(keep).unwrap().quantity(), 3);
    }

    #[test]
    fn valid_records_rebuild_unchanged() {
        let mut kitchen = Kitchen::new();
        kitchen.add("Rice", 2);
        kitchen.add("Oil", 1);

        let (rebuilt, repaired) = Kitchen::from_records(kitchen.items().to_vec());
        assert!(!repaired);
        assert_eq!(rebuilt, kitchen);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: kitchen quantities are never zero or negative and names stay unique,
        /// whatever sequence of signed deltas is applied.
        #[test]
        fn deltas_preserve_kitchen_invariants(
            ops in prop::collection::vec(("(eggs|Eggs| EGGS|flour|Flour)", -10i64..10), 0..60)
        ) {
            let mut kitchen = Kitchen::new();
            for (name, delta) in &ops {
                kitchen.add(name, *delta);

                let mut keys = HashSet::new();
                for item in kitchen.items() {
                    prop_assert!(item.quantity() >= 1);
                    prop_assert!(keys.insert(normalize(item.name())));
                }
            }
        }
    }
}
