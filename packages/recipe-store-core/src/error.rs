//! Store error types.

use thiserror::Error;

/// Recipe store operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Required field absent or blank on a create or update body
    #[error("Validation failed: {message}")]
    Validation {
        /// Names of the required fields that were absent
        missing: Vec<&'static str>,
        message: String,
    },

    /// Embedded id in an update body disagrees with the path id
    #[error("Request path id '{path}' does not match body id '{body}'")]
    IdentityMismatch { path: String, body: String },

    /// No recipe with the given id
    #[error("Recipe '{id}' not found")]
    RecipeNotFound { id: String },
}
