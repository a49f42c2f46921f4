//! Handlers for issuing and following recipe short links.

use axum::{
    Json,
    extract::{Path, State},
    response::Redirect,
};

use crate::api::dto::recipe::ShortLinkResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the short link of a recipe.
///
/// # Endpoint
///
/// `GET /api/recipes/{id}/get-link`
///
/// # Response
///
/// ```json
/// { "short-link": "https://recipes.example.com/s/21" }
/// ```
///
/// # Errors
///
/// Returns 404 if the recipe does not exist.
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ShortLinkResponse>, AppError> {
    let code = state.recipe_service.short_link(id).await?;

    Ok(Json(ShortLinkResponse {
        short_link: state.absolute_url(&format!("/s/{code}")),
    }))
}

/// Follows a short link to the recipe page.
///
/// # Endpoint
///
/// `GET /s/{code}`
///
/// # Response Codes
///
/// - **307 Temporary Redirect**: `Location: /recipes/{id}`
/// - **404 Not Found**: the code is malformed or the recipe does not exist
///
/// Resolved codes are cached; see
/// [`crate::application::services::RecipeService::resolve_short_link`].
pub async fn short_link_redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Redirect, AppError> {
    let id = state.recipe_service.resolve_short_link(&code).await?;

    Ok(Redirect::temporary(&format!("/recipes/{id}")))
}
