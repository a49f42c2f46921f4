//! Handlers for favorites, the shopping cart and the shopping list download.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::recipe::RecipeBriefResponse;
use crate::api::middleware::CurrentUser;
use crate::domain::entities::Collection;
use crate::error::AppError;
use crate::state::AppState;

async fn add(
    state: &AppState,
    collection: Collection,
    CurrentUser(user): CurrentUser,
    recipe_id: i64,
) -> Result<(StatusCode, Json<RecipeBriefResponse>), AppError> {
    let brief = state
        .collection_service
        .add(collection, &user, recipe_id)
        .await?;

    Ok((StatusCode::CREATED, Json(brief.into())))
}

async fn remove(
    state: &AppState,
    collection: Collection,
    CurrentUser(user): CurrentUser,
    recipe_id: i64,
) -> Result<StatusCode, AppError> {
    state
        .collection_service
        .remove(collection, &user, recipe_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/recipes/{id}/favorite`
pub async fn add_to_favorites_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeBriefResponse>), AppError> {
    add(&state, Collection::Favorites, user, id).await
}

/// `DELETE /api/recipes/{id}/favorite`
pub async fn remove_from_favorites_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    remove(&state, Collection::Favorites, user, id).await
}

/// `POST /api/recipes/{id}/shopping_cart`
pub async fn add_to_cart_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeBriefResponse>), AppError> {
    add(&state, Collection::ShoppingCart, user, id).await
}

/// `DELETE /api/recipes/{id}/shopping_cart`
pub async fn remove_from_cart_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    remove(&state, Collection::ShoppingCart, user, id).await
}

/// Downloads the aggregated shopping list of the cart.
///
/// # Endpoint
///
/// `GET /api/recipes/download_shopping_cart`
///
/// # Response
///
/// `200 OK` with the rendered document as an attachment:
///
/// ```text
/// Content-Type: text/plain; charset=utf-8
/// Content-Disposition: attachment; filename="shopping-list.txt"
/// ```
///
/// An empty cart yields a document without ingredient lines.
pub async fn download_shopping_cart_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    let document = state.collection_service.export_shopping_list(&user).await?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        document.file_name
    ))
    .map_err(|_| {
        AppError::internal(
            "Invalid document file name",
            json!({ "file_name": document.file_name }),
        )
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(document.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response())
}
