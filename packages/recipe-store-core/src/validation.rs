//! Write-time validation of create and update payloads.

use crate::error::StoreError;
use crate::recipe::{NewRecipe, RecipeDraft, RecipeId, RecipeUpdate};

/// Validates a create payload.
///
/// # Returns
/// `Result<NewRecipe, StoreError>` with `StoreError::Validation` listing every
/// absent required field.
pub fn validate_draft(draft: RecipeDraft) -> Result<NewRecipe, StoreError> {
    require_fields(draft.name, draft.ingredients)
}

/// Validates an update payload against the id named in the request path.
///
/// Field presence is checked before identity, so a body that is missing
/// `name` and carries the wrong id reports the missing field.
pub fn validate_update(path_id: &RecipeId, update: RecipeUpdate) -> Result<NewRecipe, StoreError> {
    let recipe = require_fields(update.name, update.ingredients)?;

    match update.id {
        Some(ref body_id) if body_id == path_id => Ok(recipe),
        other => Err(StoreError::IdentityMismatch {
            path: path_id.to_string(),
            body: other.map(|id| id.to_string()).unwrap_or_default(),
        }),
    }
}

fn require_fields(
    name: Option<String>,
    ingredients: Option<Vec<String>>,
) -> Result<NewRecipe, StoreError> {
    let mut missing = Vec::new();
    if name.is_none() {
        missing.push("name");
    }
    if ingredients.is_none() {
        missing.push("ingredients");
    }

    match (name, ingredients) {
        (Some(name), Some(ingredients)) => {
            if name.trim().is_empty() {
                return Err(StoreError::Validation {
                    missing,
                    message: "Field `name` must not be empty".to_string(),
                });
            }
            Ok(NewRecipe { name, ingredients })
        }
        _ => {
            let fields = missing
                .iter()
                .map(|field| format!("`{}`", field))
                .collect::<Vec<_>>()
                .join(", ");
            Err(StoreError::Validation {
                message: format!("Missing required field(s) {} in request body", fields),
                missing,
            })
        }
    }
}
