//! Core data model for the recipe store.
//!
//! Provides the recipe types, write-time validation, the owned
//! in-memory collection, and service configuration.

pub mod config;
pub mod error;
pub mod recipe;
pub mod store;
pub mod validation;

pub use error::StoreError;
pub use recipe::{NewRecipe, Recipe, RecipeDraft, RecipeId, RecipeUpdate};
pub use store::RecipeStore;
