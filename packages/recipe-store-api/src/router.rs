//! Matchit routing configuration.

use std::fmt::Display;
use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use matchit::Router as MatchitRouter;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::handlers;
use recipe_store_core::config::ServiceConfig;
use recipe_store_core::StoreError;
use recipe_store_runtime::ApiRequest;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<ServiceConfig>,
    /// API request sender to runtime
    pub api_tx: mpsc::Sender<ApiRequest>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with the recipe routes.
    ///
    /// # Arguments
    /// * `api_tx` - Sender half of the runtime request channel
    /// * `config` - Service configuration
    pub fn new(
        api_tx: mpsc::Sender<ApiRequest>,
        config: Arc<ServiceConfig>,
    ) -> Result<Self, matchit::InsertError> {
        let mut router = MatchitRouter::new();
        router.insert("/recipes", RouteHandler::Collection)?;
        router.insert("/recipes/{id}", RouteHandler::Item)?;

        Ok(Self {
            inner: router,
            state: AppState { config, api_tx },
        })
    }

    /// Returns the service configuration the router was built with.
    pub fn config(&self) -> &ServiceConfig {
        &self.state.config
    }

    /// Routes an incoming request to the appropriate handler.
    ///
    /// # Returns
    /// `Result<Response<Bytes>, RouterError>` containing the response or an error
    /// that the caller renders through `Response::from`.
    pub async fn route<B>(&self, req: Request<B>) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: Display,
    {
        let path = req.uri().path().to_string();

        match self.inner.at(&path) {
            Ok(matched) => {
                matched
                    .value
                    .handle(req, matched.params, self.state.clone())
                    .await
            }
            Err(_) => Err(RouterError::NotFound(format!("No route found for {}", path))),
        }
    }
}

/// Route handler function.
enum RouteHandler {
    Collection,
    Item,
}

impl RouteHandler {
    /// Handles a request with the given route parameters.
    async fn handle<B>(
        &self,
        req: Request<B>,
        params: matchit::Params<'_, '_>,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: Display,
    {
        let method = req.method().clone();
        match (self, method) {
            (RouteHandler::Collection, Method::GET) => {
                handlers::list_recipes(req, params, state).await
            }
            (RouteHandler::Collection, Method::POST) => {
                handlers::create_recipe(req, params, state).await
            }
            (RouteHandler::Item, Method::PUT) => handlers::update_recipe(req, params, state).await,
            (RouteHandler::Item, Method::DELETE) => {
                handlers::delete_recipe(req, params, state).await
            }
            _ => Err(RouterError::MethodNotAllowed),
        }
    }
}

/// Router error type.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Request Timeout")]
    Timeout,
    #[error("Service Unavailable: {0}")]
    Unavailable(String),
    #[error("Internal Error: {0}")]
    InternalError(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RouterError {
    /// HTTP status code reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RouterError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RouterError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RouterError::NotFound(_) => StatusCode::NOT_FOUND,
            RouterError::Timeout => StatusCode::REQUEST_TIMEOUT,
            RouterError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            RouterError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RouterError::Store(StoreError::RecipeNotFound { .. }) => StatusCode::NOT_FOUND,
            RouterError::Store(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message_and_details(&self) -> (String, Option<String>) {
        match self {
            RouterError::BadRequest(msg)
            | RouterError::NotFound(msg)
            | RouterError::Unavailable(msg)
            | RouterError::InternalError(msg) => (msg.clone(), None),
            RouterError::Store(StoreError::Validation { missing, message }) => {
                let details = (!missing.is_empty())
                    .then(|| format!("missing fields: {}", missing.join(", ")));
                (message.clone(), details)
            }
            other => (other.to_string(), None),
        }
    }
}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let status = err.status();
        let (message, details) = err.message_and_details();

        let error_response = handlers::error_response(status.as_u16(), message, details);
        let body = serde_json::to_vec(&error_response)
            .unwrap_or_else(|e| format!("{{\"success\":false,\"error\":{{\"code\":\"500\",\"message\":\"Failed to serialize error: {}\"}}}}", e).into_bytes());

        let mut response = Response::new(Bytes::from(body));
        *response.status_mut() = status;
        response.headers_mut().insert(
            hyper::header::CONTENT_TYPE,
            hyper::header::HeaderValue::from_static("application/json"),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_client_statuses() {
        let validation = RouterError::from(StoreError::Validation {
            missing: vec!["name"],
            message: "Missing required field(s) `name` in request body".to_string(),
        });
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            validation.message_and_details().1.as_deref(),
            Some("missing fields: name")
        );

        let mismatch = RouterError::from(StoreError::IdentityMismatch {
            path: "1234".to_string(),
            body: "abc".to_string(),
        });
        assert_eq!(mismatch.status(), StatusCode::BAD_REQUEST);

        let missing = RouterError::from(StoreError::RecipeNotFound {
            id: "1234".to_string(),
        });
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_response_is_json_envelope() {
        let response = Response::<Bytes>::from(RouterError::MethodNotAllowed);
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers()[hyper::header::CONTENT_TYPE],
            "application/json"
        );

        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "405");
        assert!(body["error"].get("details").is_none());
    }
}
