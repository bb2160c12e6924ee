//! API request handlers

use recipe_store_core::validation::{validate_draft, validate_update};
use recipe_store_core::RecipeStore;

use crate::api_request::ApiRequest;
use crate::{ResponseSender, Result};

/// Result of applying one request to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Request succeeded (mutation applied, or read answered)
    Applied,
    /// Request succeeded without changing the store
    Unchanged,
    /// Request was rejected before touching the store
    Rejected,
}

/// Applies a single API request to the store and sends the reply.
///
/// Validation runs here, immediately before the write, so a rejected
/// request never mutates the collection.
pub fn handle_api_request(store: &mut RecipeStore, req: ApiRequest) -> RequestOutcome {
    let operation = req.operation();
    match req {
        ApiRequest::List { response } => {
            let recipes = store.list().to_vec();
            tracing::debug!("Listing {} recipes", recipes.len());
            reply(response, Ok(recipes), operation)
        }
        ApiRequest::Create { draft, response } => {
            let result = validate_draft(draft).map(|recipe| store.create(recipe));
            reply(response, result, operation)
        }
        ApiRequest::Update {
            id,
            update,
            response,
        } => {
            let result =
                validate_update(&id, update).and_then(|recipe| store.update(&id, recipe));
            reply(response, result, operation)
        }
        ApiRequest::Delete { id, response } => {
            if store.delete(&id).is_some() {
                return reply(response, Ok(()), operation);
            }
            tracing::debug!("Delete of unknown recipe {} ignored", id);
            reply(response, Ok(()), operation);
            RequestOutcome::Unchanged
        }
    }
}

fn reply<T>(response: ResponseSender<T>, result: Result<T>, operation: &str) -> RequestOutcome {
    let outcome = match &result {
        Ok(_) => RequestOutcome::Applied,
        Err(e) => {
            tracing::warn!("Rejected {} request: {}", operation, e);
            RequestOutcome::Rejected
        }
    };
    if response.send(result).is_err() {
        tracing::debug!("Caller dropped before {} response was sent", operation);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_store_core::{RecipeDraft, RecipeId, RecipeUpdate, StoreError};
    use tokio::sync::oneshot;

    #[test]
    fn test_rejected_create_leaves_store_unchanged() {
        let mut store = RecipeStore::seeded();
        let (tx, mut rx) = oneshot::channel();
        let draft = RecipeDraft {
            name: None,
            ingredients: Some(vec!["salt".to_string()]),
        };

        let outcome = handle_api_request(
            &mut store,
            ApiRequest::Create {
                draft,
                response: tx,
            },
        );

        assert_eq!(outcome, RequestOutcome::Rejected);
        assert!(matches!(
            rx.try_recv().unwrap(),
            Err(StoreError::Validation { .. })
        ));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_of_missing_recipe_is_rejected() {
        let mut store = RecipeStore::seeded();
        let (tx, mut rx) = oneshot::channel();
        let update = RecipeUpdate {
            id: Some(RecipeId::from("1234")),
            name: Some("salsa".to_string()),
            ingredients: Some(vec!["salt".to_string()]),
        };

        let outcome = handle_api_request(
            &mut store,
            ApiRequest::Update {
                id: RecipeId::from("1234"),
                update,
                response: tx,
            },
        );

        assert_eq!(outcome, RequestOutcome::Rejected);
        assert!(matches!(
            rx.try_recv().unwrap(),
            Err(StoreError::RecipeNotFound { .. })
        ));
    }

    #[test]
    fn test_dropped_receiver_does_not_prevent_mutation() {
        let mut store = RecipeStore::seeded();
        let (tx, rx) = oneshot::channel();
        drop(rx);
        let id = store.list()[0].id.clone();

        let outcome = handle_api_request(&mut store, ApiRequest::Delete { id, response: tx });

        assert_eq!(outcome, RequestOutcome::Applied);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_of_missing_recipe_is_unchanged() {
        let mut store = RecipeStore::seeded();
        let (tx, mut rx) = oneshot::channel();

        let outcome = handle_api_request(
            &mut store,
            ApiRequest::Delete {
                id: RecipeId::from("1234"),
                response: tx,
            },
        );

        assert_eq!(outcome, RequestOutcome::Unchanged);
        assert_eq!(rx.try_recv().unwrap(), Ok(()));
        assert_eq!(store.len(), 2);
    }
}
