//! Cross-collection reconciliation.
//!
//! Shopping, kitchen and recipes have no links to each other; these functions
//! match them by normalized name at call time.

use std::collections::{HashMap, HashSet};

use crate::kitchen::Kitchen;
use crate::name::normalize;
use crate::quantity::shortfall;
use crate::recipe::Recipe;
use crate::shopping::ShoppingList;

/// An amount added to the shopping list on behalf of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingIngredient {
    pub name: String,
    pub quantity: i64,
}

/// Move every checked shopping entry into the kitchen and drop it from the list.
///
/// Returns how many entries were transferred.
pub(crate) fn complete_shopping(shopping: &mut ShoppingList, kitchen: &mut Kitchen) -> usize {
    let checked = shopping.take_checked();
    for item in &checked {
        kitchen.add(item.name(), item.quantity());
    }
    checked.len()
}

/// What `recipe` still needs beyond kitchen stock and queued purchases,
/// without touching the shopping list.
pub(crate) fn missing_ingredients(
    recipe: &Recipe,
    kitchen: &Kitchen,
    shopping: &ShoppingList,
) -> Vec<MissingIngredient> {
    summarize(recipe, &line_shortfalls(recipe, kitchen, shopping))
}

/// Queue whatever `recipe` needs beyond kitchen stock and already-queued purchases.
///
/// Each ingredient line is netted against the kitchen and shopping state as it
/// was before this call, so repeated lines for one item add up instead of
/// covering each other. The result lists each normalized name once, at its
/// first line's position and display name, with the accumulated amount.
pub(crate) fn add_missing_ingredients(
    recipe: &Recipe,
    kitchen: &Kitchen,
    shopping: &mut ShoppingList,
) -> Vec<MissingIngredient> {
    let needs = line_shortfalls(recipe, kitchen, shopping);
    for &(name, needed) in &needs {
        if needed > 0 {
            shopping.add_or_increment(name, needed);
        }
    }
    summarize(recipe, &needs)
}

/// Shortfall of every ingredient line, in recipe order.
fn line_shortfalls<'a>(
    recipe: &'a Recipe,
    kitchen: &Kitchen,
    shopping: &ShoppingList,
) -> Vec<(&'a str, i64)> {
    recipe
        .ingredients()
        .iter()
        .map(|ingredient| {
            let have = kitchen.quantity_of(ingredient.name());
            let queued = shopping.quantity_of(ingredient.name());
            (ingredient.name(), shortfall(ingredient.quantity(), have, queued))
        })
        .collect()
}

/// Accumulate line shortfalls per normalized name, emitted at first occurrence.
fn summarize(recipe: &Recipe, needs: &[(&str, i64)]) -> Vec<MissingIngredient> {
    let mut totals: HashMap<String, i64> = HashMap::new();
    for &(name, needed) in needs {
        if needed > 0 {
            let total = totals.entry(normalize(name)).or_insert(0);
            *total = total.saturating_add(needed);
        }
    }

    let mut emitted = HashSet::new();
    recipe
        .ingredients()
        .iter()
        .filter_map(|ingredient| {
            let key = normalize(ingredient.name());
            let quantity = *totals.get(&key)?;
            emitted.insert(key).then(|| MissingIngredient {
                name: ingredient.name().to_string(),
                quantity,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::RecipeBook;
    use proptest::prelude::*;

    fn recipe(lines: &[(&str, i64)]) -> Recipe {
        let mut book = RecipeBook::new();
        let id = book.add_recipe("Test").unwrap();
        for (name, qty) in lines {
            book.add_ingredient(name, *qty, id);
        }
        book.get(id).unwrap().clone()
    }

    fn pairs(missing: &[MissingIngredient]) -> Vec<(&str, i64)> {
        missing.iter().map(|m| (m.name.as_str(), m.quantity)).collect()
    }

    #[test]
    fn nets_against_kitchen_and_is_stable_on_second_call() {
        let mut kitchen = Kitchen::new();
        kitchen.add("Flour", 1);
        let mut shopping = ShoppingList::new();
        let recipe = recipe(&[("Flour", 3), ("Sugar", 1)]);

        let first = add_missing_ingredients(&recipe, &kitchen, &mut shopping);
        assert_eq!(pairs(&first), vec![("Flour", 2), ("Sugar", 1)]);
        assert_eq!(shopping.quantity_of("flour"), 2);
        assert_eq!(shopping.quantity_of("sugar"), 1);

        let second = add_missing_ingredients(&recipe, &kitchen, &mut shopping);
        assert!(second.is_empty());
        assert_eq!(shopping.len(), 2);
    }

    #[test]
    fn duplicate_lines_accumulate_under_first_display_name() {
        let kitchen = Kitchen::new();
        let mut shopping = ShoppingList::new();
        let recipe = recipe(&[("Egg", 2), ("egg", 1)]);

        let added = add_missing_ingredients(&recipe, &kitchen, &mut shopping);
        assert_eq!(pairs(&added), vec![("Egg", 3)]);
        assert_eq!(shopping.len(), 1);
        assert_eq!(shopping.items()[0].name(), "Egg");
        assert_eq!(shopping.items()[0].quantity(), 3);
    }

    #[test]
    fn queued_purchases_count_as_covered() {
        let kitchen = Kitchen::new();
        let mut shopping = ShoppingList::new();
        shopping.add_or_increment("MILK", 1);
        let recipe = recipe(&[("Milk", 3), ("Butter", 1)]);

        let added = add_missing_ingredients(&recipe, &kitchen, &mut shopping);
        assert_eq!(pairs(&added), vec![("Milk", 2), ("Butter", 1)]);
        assert_eq!(shopping.items()[0].name(), "MILK");
        assert_eq!(shopping.items()[0].quantity(), 3);
    }

    #[test]
    fn query_matches_what_reconciliation_adds() {
        let mut kitchen = Kitchen::new();
        kitchen.add("Egg", 1);
        let mut shopping = ShoppingList::new();
        shopping.add_or_increment("Milk", 1);
        let recipe = recipe(&[("Egg", 2), ("egg", 2), ("Milk", 2)]);

        let planned = missing_ingredients(&recipe, &kitchen, &shopping);
        assert_eq!(pairs(&planned), vec![("Egg", 2), ("Milk", 1)]);
        assert_eq!(shopping.len(), 1);

        let added = add_missing_ingredients(&recipe, &kitchen, &mut shopping);
        assert_eq!(added, planned);
        assert!(missing_ingredients(&recipe, &kitchen, &shopping).is_empty());
    }

    #[test]
    fn fully_stocked_recipe_adds_nothing() {
        let mut kitchen = Kitchen::new();
        kitchen.add("Pasta", 5);
        let mut shopping = ShoppingList::new();
        let recipe = recipe(&[("pasta", 1)]);

        assert!(add_missing_ingredients(&recipe, &kitchen, &mut shopping).is_empty());
        assert!(shopping.is_empty());
    }

    #[test]
    fn complete_shopping_moves_checked_into_kitchen() {
        let mut shopping = ShoppingList::new();
        shopping.add_or_increment("Milk", 1);
        shopping.add_or_increment("Bread", 2);
        let milk = *hearth_core::Entity::id(&shopping.items()[0]);
        shopping.toggle(milk);

        let mut kitchen = Kitchen::new();
        kitchen.add("milk", 2);

        assert_eq!(complete_shopping(&mut shopping, &mut kitchen), 1);
        assert_eq!(shopping.len(), 1);
        assert_eq!(shopping.items()[0].name(), "Bread");
        assert_eq!(kitchen.len(), 1);
        assert_eq!(kitchen.items()[0].name(), "milk");
        assert_eq!(kitchen.quantity_of("Milk"), 3);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: with no state change in between, a second reconciliation adds nothing.
        #[test]
        fn reconciliation_is_idempotent(
            lines in prop::collection::vec(("(egg|Egg|flour|milk)", 1i64..6), 0..8),
            stock in prop::collection::vec(("(egg|flour|milk)", 1i64..6), 0..4),
            queued in prop::collection::vec(("(egg|flour|milk)", 1i64..6), 0..4),
        ) {
            let mut kitchen = Kitchen::new();
            for (name, qty) in &stock {
                kitchen.add(name, *qty);
            }
            let mut shopping = ShoppingList::new();
            for (name, qty) in &queued {
                shopping.add_or_increment(name, *qty);
            }
            let lines: Vec<(&str, i64)> = lines.iter().map(|(n, q)| (n.as_str(), *q)).collect();
            let recipe = recipe(&lines);

            let first = add_missing_ingredients(&recipe, &kitchen, &mut shopping);
            let mut keys = HashSet::new();
            for m in &first {
                prop_assert!(m.quantity > 0);
                prop_assert!(keys.insert(normalize(&m.name)));
            }

            let after_first = shopping.clone();
            let second = add_missing_ingredients(&recipe, &kitchen, &mut shopping);
            prop_assert!(second.is_empty());
            prop_assert_eq!(shopping, after_first);
        }
    }
}
