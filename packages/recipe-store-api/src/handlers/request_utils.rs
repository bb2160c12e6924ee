//! Request parsing, runtime round-trips, and response building.

use std::fmt::Display;

use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::oneshot;
use tokio::time;

use crate::router::{AppState, RouterError};
use recipe_store_core::RecipeId;
use recipe_store_runtime::{ApiRequest, ResponseSender};

/// Type alias for matchit parameters with explicit lifetimes
pub type MatchitParams<'a, 'b> = matchit::Params<'a, 'b>;

/// Helper to build a JSON HTTP response
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    data: &T,
) -> Result<Response<Bytes>, RouterError> {
    let json = serde_json::to_vec(data)
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    Response::builder()
        .status(status)
        .header(hyper::header::CONTENT_TYPE, "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Helper to build empty HTTP response (for 204 No Content)
pub fn build_empty_response(status: StatusCode) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Reads the full request body, giving up after `timeout_ms`.
pub async fn read_request_body_with_timeout<B>(
    req: Request<B>,
    timeout_ms: u64,
) -> Result<Bytes, RouterError>
where
    B: Body,
    B::Error: Display,
{
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let body = time::timeout(timeout_duration, req.into_body().collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Failed to read request body: {}", e)))?;
    Ok(body.to_bytes())
}

/// Deserializes a JSON request body.
pub fn parse_json_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, RouterError> {
    serde_json::from_slice(bytes)
        .map_err(|e| RouterError::BadRequest(format!("Malformed request body: {}", e)))
}

/// Extracts and percent-decodes the `id` path parameter.
pub fn path_recipe_id(params: &MatchitParams<'_, '_>) -> Result<RecipeId, RouterError> {
    let raw = params
        .get("id")
        .ok_or_else(|| RouterError::BadRequest("Missing recipe id in path".to_string()))?;
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|e| RouterError::BadRequest(format!("Invalid recipe id '{}': {}", raw, e)))?;
    Ok(RecipeId::from(decoded.as_ref()))
}

/// Sends a request to the runtime and waits for its reply.
///
/// # Arguments
/// * `state` - Application state holding the runtime channel
/// * `build` - Builds the request around the reply sender
pub async fn call_runtime<T>(
    state: &AppState,
    build: impl FnOnce(ResponseSender<T>) -> ApiRequest,
) -> Result<T, RouterError> {
    let (tx, rx) = oneshot::channel();
    state
        .api_tx
        .send(build(tx))
        .await
        .map_err(|e| RouterError::Unavailable(format!("Runtime channel closed: {}", e)))?;

    let result = wait_for_response_with_timeout(rx, state.config.response_timeout_ms).await?;
    Ok(result?)
}

/// Helper function to wait for response with timeout
async fn wait_for_response_with_timeout<T>(
    rx: oneshot::Receiver<T>,
    timeout_ms: u64,
) -> Result<T, RouterError> {
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    time::timeout(timeout_duration, rx)
        .await
        .map_err(|_| RouterError::Unavailable("Timed out waiting for runtime".to_string()))?
        .map_err(|e| RouterError::Unavailable(format!("Response channel closed: {}", e)))
}
