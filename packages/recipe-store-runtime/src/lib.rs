//! Single-owner runtime for the recipe store.
//!
//! The runtime owns the `RecipeStore` and applies API requests received over
//! a channel strictly one at a time, replying to each over a oneshot channel.

use recipe_store_core::StoreError;
use tokio::sync::oneshot;

mod api_handlers;
mod api_request;
mod runtime;

pub use api_handlers::{handle_api_request, RequestOutcome};
pub use api_request::ApiRequest;
pub use runtime::{Runtime, RuntimeStats};

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Response sender for API requests
pub type ResponseSender<T> = oneshot::Sender<Result<T>>;
