//! Shopping list: requested purchases, merged by normalized name.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use hearth_core::{Entity, ItemId};

use crate::collection::remove_by_ids;
use crate::name::{normalize, trimmed};

/// A requested purchase.
///
/// `is_checked` marks "acquired, pending transfer to the kitchen".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    id: ItemId,
    name: String,
    quantity: i64,
    #[serde(rename = "isChecked")]
    is_checked: bool,
}

impl ShoppingItem {
    fn new(name: &str, quantity: i64) -> Self {
        Self {
            id: ItemId::new(),
            name: name.to_string(),
            quantity,
            is_checked: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn is_checked(&self) -> bool {
        self.is_checked
    }
}

impl Entity for ShoppingItem {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.id
    }
}

/// Filtered projections the shell renders as separate sections.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShoppingView {
    All,
    ToBuy,
    Checked,
}

impl ShoppingView {
    pub fn includes(self, item: &ShoppingItem) -> bool {
        match self {
            ShoppingView::All => true,
            ShoppingView::ToBuy => !item.is_checked,
            ShoppingView::Checked => item.is_checked,
        }
    }
}

/// Ordered shopping list.
///
/// Invariants: no two entries share a normalized name; every quantity is >= 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a list from stored records, re-establishing the invariants.
    ///
    /// Returns the list and whether any record had to be merged, trimmed or dropped.
    pub(crate) fn from_records(records: Vec<ShoppingItem>) -> (Self, bool) {
        let mut list = Self::new();
        let mut repaired = false;

        for mut record in records {
            let Some(name) = trimmed(&record.name).map(str::to_string) else {
                repaired = true;
                continue;
            };
            if record.quantity <= 0 {
                repaired = true;
                continue;
            }
            if name.len() != record.name.len() {
                record.name = name;
                repaired = true;
            }

            match list.position(&record.name) {
                Some(idx) => {
                    list.items[idx].quantity =
                        list.items[idx].quantity.saturating_add(record.quantity);
                    repaired = true;
                }
                None => list.items.push(record),
            }
        }

        (list, repaired)
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&ShoppingItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Entries visible in `view`, in master-list order.
    pub fn view(&self, view: ShoppingView) -> Vec<&ShoppingItem> {
        self.items.iter().filter(|i| view.includes(i)).collect()
    }

    /// Resolve positions in a filtered view back to stable ids.
    ///
    /// Out-of-range offsets are ignored.
    pub fn ids_at(&self, view: ShoppingView, offsets: &[usize]) -> HashSet<ItemId> {
        let visible = self.view(view);
        offsets
            .iter()
            .filter_map(|&offset| visible.get(offset).map(|item| item.id))
            .collect()
    }

    /// Sum of quantities whose name normalizes to the same key as `name`.
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

    /// Add `quantity` of `name`, merging into an existing entry by normalized name.
    ///
    /// No-op for blank names or non-positive quantities.
    pub(crate) fn add_or_increment(&mut self, name: &str, quantity: i64) -> bool {
        let Some(name) = trimmed(name) else {
            return false;
        };
        if quantity <= 0 {
            return false;
        }

        match self.position(name) {
            Some(idx) => {
                let item = &mut self.items[idx];
                item.quantity = item.quantity.saturating_add(quantity);
            }
            None => self.items.push(ShoppingItem::new(name, quantity)),
        }
        true
    }

    pub(crate) fn toggle(&mut self, id: ItemId) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.is_checked = !item.is_checked;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_ids(&mut self, ids: &HashSet<ItemId>) -> bool {
        remove_by_ids(&mut self.items, ids)
    }

    /// Remove and return every checked entry, preserving order.
    pub(crate) fn take_checked(&mut self) -> Vec<ShoppingItem> {
        let (checked, remaining): (Vec<_>, Vec<_>) =
            self.items.drain(..).partition(|i| i.is_checked);
        self.items = remaining;
        checked
    }
}

impl<'de> Deserialize<'de> for ShoppingList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let records = Vec::<ShoppingItem>::deserialize(deserializer)?;
        Ok(Self::from_records(records).0)
    }
}
