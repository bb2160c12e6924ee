//! Recipe records and the request payloads that create or replace them.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque recipe identifier, assigned by the store on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecipeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A stored recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub ingredients: Vec<String>,
}

/// Validated recipe contents, ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
}

impl NewRecipe {
    pub fn new<I, S>(name: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

/// Body of a create request. Fields are optional so that absence can be
/// reported as a validation failure instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
}

/// Body of an update request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeUpdate {
    #[serde(default)]
    pub id: Option<RecipeId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_serializes_with_plain_string_id() {
        let recipe = Recipe {
            id: RecipeId::from("abc"),
            name: "salsa".to_string(),
            ingredients: vec!["tomatoes".to_string(), "salt".to_string()],
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "abc",
                "name": "salsa",
                "ingredients": ["tomatoes", "salt"]
            })
        );
    }

    #[test]
    fn test_draft_tolerates_missing_and_unknown_keys() {
        let draft: RecipeDraft =
            serde_json::from_str(r#"{"ingredients": ["a"], "cuisine": "mexican"}"#).unwrap();
        assert!(draft.name.is_none());
        assert_eq!(draft.ingredients, Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(RecipeId::generate(), RecipeId::generate());
    }
}
