//! API request types

use recipe_store_core::{Recipe, RecipeDraft, RecipeId, RecipeUpdate};

use crate::ResponseSender;

/// API request from REST server
#[derive(Debug)]
pub enum ApiRequest {
    /// List all recipes
    List {
        response: ResponseSender<Vec<Recipe>>,
    },
    /// Create a recipe from an unvalidated draft
    Create {
        draft: RecipeDraft,
        response: ResponseSender<Recipe>,
    },
    /// Replace the recipe named by `id`
    Update {
        id: RecipeId,
        update: RecipeUpdate,
        response: ResponseSender<Recipe>,
    },
    /// Delete a recipe; succeeds whether or not it exists
    Delete {
        id: RecipeId,
        response: ResponseSender<()>,
    },
}

impl ApiRequest {
    /// Returns true if this request may change the collection.
    pub fn is_mutation(&self) -> bool {
        match self {
            ApiRequest::List { .. } => false,
            ApiRequest::Create { .. } => true,
            ApiRequest::Update { .. } => true,
            ApiRequest::Delete { .. } => true,
        }
    }

    /// Short operation name for logging.
    pub fn operation(&self) -> &'static str {
        match self {
            ApiRequest::List { .. } => "list",
            ApiRequest::Create { .. } => "create",
            ApiRequest::Update { .. } => "update",
            ApiRequest::Delete { .. } => "delete",
        }
    }
}
