//! Read-only handlers for tags and ingredients.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::catalog::{IngredientResponse, IngredientSearchParams, TagResponse};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/tags`
pub async fn tags_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, AppError> {
    let tags = state.catalog_service.list_tags().await?;
    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

/// `GET /api/tags/{id}`
pub async fn tag_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TagResponse>, AppError> {
    Ok(Json(state.catalog_service.get_tag(id).await?.into()))
}

/// Lists ingredients, optionally filtered by a case-insensitive name prefix.
///
/// # Endpoint
///
/// `GET /api/ingredients?name=tom`
pub async fn ingredients_handler(
    State(state): State<AppState>,
    Query(params): Query<IngredientSearchParams>,
) -> Result<Json<Vec<IngredientResponse>>, AppError> {
    let ingredients = state
        .catalog_service
        .search_ingredients(params.name)
        .await?;

    Ok(Json(ingredients.into_iter().map(Into::into).collect()))
}

/// `GET /api/ingredients/{id}`
pub async fn ingredient_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<IngredientResponse>, AppError> {
    Ok(Json(state.catalog_service.get_ingredient(id).await?.into()))
}
