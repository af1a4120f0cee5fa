//! Recipes and their ingredient lines.
//!
//! A recipe owns its ingredients outright. Ingredient lines are a raw record
//! of what the recipe calls for, so duplicate names are allowed here.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use hearth_core::{Entity, IngredientId, RecipeId};

use crate::collection::remove_by_ids;
use crate::name::trimmed;

/// One line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    id: IngredientId,
    name: String,
    quantity: i64,
}

impl RecipeIngredient {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

impl Entity for RecipeIngredient {
    type Id = IngredientId;

    fn id(&self) -> &IngredientId {
        &self.id
    }
}

/// A named recipe with ingredients in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    id: RecipeId,
    name: String,
    ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ingredients(&self) -> &[RecipeIngredient] {
        &self.ingredients
    }
}

impl Entity for Recipe {
    type Id = RecipeId;

    fn id(&self) -> &RecipeId {
        &self.id
    }
}

/// Ordered recipe collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored records: names are trimmed, blank recipes and
    /// blank or non-positive ingredient lines are dropped.
    ///
    /// Returns the book and whether any record had to change.
    pub(crate) fn from_records(records: Vec<Recipe>) -> (Self, bool) {
        let mut repaired = false;
        let mut recipes = Vec::with_capacity(records.len());

        for mut recipe in records {
            match trim_name(&mut recipe.name) {
                Some(changed) => repaired |= changed,
                None => {
                    repaired = true;
                    continue;
                }
            }

            let before = recipe.ingredients.len();
            recipe.ingredients.retain_mut(|line| {
                if line.quantity <= 0 {
                    return false;
                }
                match trim_name(&mut line.name) {
                    Some(changed) => {
                        repaired |= changed;
                        true
                    }
                    None => false,
                }
            });
            repaired |= recipe.ingredients.len() != before;
            recipes.push(recipe);
        }

        (Self { recipes }, repaired)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    fn get_mut(&mut self, id: RecipeId) -> Option<&mut Recipe> {
        self.recipes.iter_mut().find(|r| r.id == id)
    }

    /// Insert a new empty recipe. Blank names produce no recipe and no handle.
    pub(crate) fn add_recipe(&mut self, name: &str) -> Option<RecipeId> {
        let name = trimmed(name)?;
        let id = RecipeId::new();
        self.recipes.push(Recipe {
            id,
            name: name.to_string(),
            ingredients: Vec::new(),
        });
        Some(id)
    }

    /// Append an ingredient line to `recipe_id`. No merging.
    pub(crate) fn add_ingredient(
        &mut self,
        name: &str,
        quantity: i64,
        recipe_id: RecipeId,
    ) -> Option<IngredientId> {
        let name = trimmed(name)?;
        if quantity <= 0 {
            return None;
        }
        let recipe = self.get_mut(recipe_id)?;
        let id = IngredientId::new();
        recipe.ingredients.push(RecipeIngredient {
            id,
            name: name.to_string(),
            quantity,
        });
        Some(id)
    }

    pub(crate) fn remove_ingredients(
        &mut self,
        ids: &HashSet<IngredientId>,
        recipe_id: RecipeId,
    ) -> bool {
        match self.get_mut(recipe_id) {
            Some(recipe) => remove_by_ids(&mut recipe.ingredients, ids),
            None => false,
        }
    }

    /// Remove recipes; their ingredient lines go with them.
    pub(crate) fn remove_recipes(&mut self, ids: &HashSet<RecipeId>) -> bool {
        remove_by_ids(&mut self.recipes, ids)
    }
}

/// Trim `name` in place. `None` if it is blank, otherwise whether it changed.
fn trim_name(name: &mut String) -> Option<bool> {
    let clean = trimmed(name.as_str())?.to_string();
    let changed = clean.len() != name.len();
    *name = clean;
    Some(changed)
}

impl<'de> Deserialize<'de> for RecipeBook {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let records = Vec::<Recipe>::deserialize(deserializer)?;
        Ok(Self::from_records(records).0)
    }
}
