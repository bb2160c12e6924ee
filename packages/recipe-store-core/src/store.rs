//! Owned, ordered in-memory recipe collection.

use crate::config::ServiceConfig;
use crate::error::StoreError;
use crate::recipe::{NewRecipe, Recipe, RecipeId};

/// Recipes present in a freshly seeded store.
const SEED_RECIPES: [(&str, [&str; 3]); 2] = [
    (
        "boiled white rice",
        ["1 cup white rice", "2 cups water", "pinch of salt"],
    ),
    (
        "milkshake",
        ["2 tbsp cocoa", "2 cups vanilla ice cream", "1 cup milk"],
    ),
];

/// Ordered recipe collection addressable by id.
///
/// The store performs no validation of its own; callers hand it
/// `NewRecipe` values that have already passed `crate::validation`.
#[derive(Debug, Default)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the seed recipes.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        for (name, ingredients) in SEED_RECIPES {
            store.create(NewRecipe::new(name, ingredients));
        }
        store
    }

    /// Creates a store as described by the service configuration.
    pub fn from_config(config: &ServiceConfig) -> Self {
        if config.seed {
            Self::seeded()
        } else {
            Self::new()
        }
    }

    /// Returns all recipes in insertion order.
    pub fn list(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Looks up a recipe by id.
    pub fn get(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| &recipe.id == id)
    }

    /// Appends a recipe under a freshly generated id.
    ///
    /// # Returns
    /// The stored recipe, including its id.
    pub fn create(&mut self, recipe: NewRecipe) -> Recipe {
        let mut id = RecipeId::generate();
        while self.get(&id).is_some() {
            id = RecipeId::generate();
        }

        let recipe = Recipe {
            id,
            name: recipe.name,
            ingredients: recipe.ingredients,
        };
        self.recipes.push(recipe.clone());
        tracing::info!("Created recipe {} ({})", recipe.id, recipe.name);
        recipe
    }

    /// Replaces the name and ingredients of an existing recipe in place.
    ///
    /// # Returns
    /// `Result<Recipe, StoreError>` with the updated recipe, or
    /// `StoreError::RecipeNotFound` if no recipe has the given id.
    pub fn update(&mut self, id: &RecipeId, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let stored = self
            .recipes
            .iter_mut()
            .find(|stored| &stored.id == id)
            .ok_or_else(|| StoreError::RecipeNotFound { id: id.to_string() })?;

        stored.name = recipe.name;
        stored.ingredients = recipe.ingredients;
        tracing::info!("Updated recipe {}", id);
        Ok(stored.clone())
    }

    /// Removes a recipe if present.
    ///
    /// # Returns
    /// The removed recipe, or `None` when nothing matched.
    pub fn delete(&mut self, id: &RecipeId) -> Option<Recipe> {
        let index = self.recipes.iter().position(|recipe| &recipe.id == id)?;
        let removed = self.recipes.remove(index);
        tracing::info!("Deleted recipe {}", id);
        Some(removed)
    }
}
