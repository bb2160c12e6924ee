//! HTTP endpoint implementations for the recipe collection.

use std::fmt::Display;

use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};

use crate::router::{AppState, RouterError};
use recipe_store_core::{RecipeDraft, RecipeUpdate};
use recipe_store_runtime::ApiRequest;

mod request_utils;
mod response;

pub use request_utils::MatchitParams;
pub use response::{error_response, ApiError, ErrorResponse};

use request_utils::{
    build_empty_response, build_json_response, call_runtime, parse_json_body, path_recipe_id,
    read_request_body_with_timeout,
};

/// Lists all recipes.
///
/// # Endpoint
/// `GET /recipes`
///
/// # Response
/// - **200 OK**: Returns every recipe in insertion order
/// ```json
/// [
///   {
///     "id": "6c1d0c5e-2f2b-4c5e-9d6a-2b8f0f3f1a11",
///     "name": "boiled white rice",
///     "ingredients": ["1 cup white rice", "2 cups water", "pinch of salt"]
///   }
/// ]
/// ```
///
/// # Example
/// ```bash
/// curl http://localhost:8080/recipes
/// ```
pub async fn list_recipes<B>(
    _req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let recipes = call_runtime(&state, |response| ApiRequest::List { response }).await?;
    build_json_response(StatusCode::OK, &recipes)
}

/// Creates a new recipe.
///
/// # Endpoint
/// `POST /recipes`
///
/// # Request Body
/// ```json
/// {
///   "name": "salsa",
///   "ingredients": ["tomatoes", "salt", "onions", "cilantro"]
/// }
/// ```
///
/// # Response
/// - **201 Created**: Returns the stored recipe with its generated id
///
/// # Errors
/// - **400 Bad Request**: Malformed body, or `name`/`ingredients` missing
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:8080/recipes \
///   -H "Content-Type: application/json" \
///   -d '{"name": "salsa", "ingredients": ["tomatoes", "salt"]}'
/// ```
pub async fn create_recipe<B>(
    req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: Display,
{
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;
    let draft: RecipeDraft = parse_json_body(&body_bytes)?;

    let recipe = call_runtime(&state, |response| ApiRequest::Create { draft, response }).await?;
    build_json_response(StatusCode::CREATED, &recipe)
}

/// Replaces a recipe's name and ingredients.
///
/// # Endpoint
/// `PUT /recipes/{id}`
///
/// # Request Body
/// ```json
/// {
///   "id": "6c1d0c5e-2f2b-4c5e-9d6a-2b8f0f3f1a11",
///   "name": "salsa",
///   "ingredients": ["tomatoes", "salt", "onions", "cilantro"]
/// }
/// ```
///
/// # Response
/// - **200 OK**: Returns the updated recipe
///
/// # Errors
/// - **400 Bad Request**: Malformed body, `name`/`ingredients` missing, or the
///   body `id` differs from the path id
/// - **404 Not Found**: No recipe with that id
pub async fn update_recipe<B>(
    req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: Display,
{
    let id = path_recipe_id(&params)?;
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;
    let update: RecipeUpdate = parse_json_body(&body_bytes)?;

    let recipe = call_runtime(&state, |response| ApiRequest::Update {
        id,
        update,
        response,
    })
    .await?;
    build_json_response(StatusCode::OK, &recipe)
}

/// Deletes a recipe.
///
/// # Endpoint
/// `DELETE /recipes/{id}`
///
/// # Response
/// - **204 No Content**: Returned whether or not the recipe existed
pub async fn delete_recipe<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = path_recipe_id(&params)?;
    call_runtime(&state, |response| ApiRequest::Delete { id, response }).await?;
    build_empty_response(StatusCode::NO_CONTENT)
}
