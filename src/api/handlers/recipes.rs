//! Handlers for recipe CRUD.

use axum::{
    Json,
    extract::{OriginalUri, Path, Query, RawQuery, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::pagination::Page;
use crate::api::dto::recipe::{
    CreateRecipeRequest, RecipeListParams, RecipeResponse, UpdateRecipeRequest, tag_slugs,
};
use crate::api::middleware::{CurrentUser, MaybeUser};
use crate::application::services::RecipeQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Lists recipes, newest first.
///
/// # Endpoint
///
/// `GET /api/recipes`
///
/// # Query Parameters
///
/// - `page`, `limit` - pagination
/// - `author` - author id
/// - `tags` - tag slug, may repeat; a recipe matches if it has any of them
/// - `is_favorited`, `is_in_shopping_cart` - `1` to restrict to the viewer's
///   collections; ignored for anonymous viewers
pub async fn list_recipes_handler(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Query(params): Query<RecipeListParams>,
    RawQuery(raw_query): RawQuery,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Page<RecipeResponse>>, AppError> {
    let request = params.pagination.resolve(state.page_size)?;

    let query = RecipeQuery {
        author_id: params.author,
        tags: tag_slugs(raw_query.as_deref()),
        only_favorited: params.is_favorited,
        only_in_cart: params.is_in_shopping_cart,
    };

    let (recipes, total) = state
        .recipe_service
        .list(viewer.as_ref(), query, request.offset(), request.limit())
        .await?;

    Ok(Json(Page::new(
        recipes.into_iter().map(Into::into).collect(),
        total,
        request,
        &state.public_base_url,
        uri.path(),
        uri.query(),
    )))
}

/// Publishes a recipe.
///
/// # Endpoint
///
/// `POST /api/recipes`
///
/// # Request Body
///
/// ```json
/// {
///   "ingredients": [{ "id": 1123, "amount": 10 }],
///   "tags": [1, 2],
///   "image": "data:image/png;base64,...",
///   "name": "Omelette",
///   "text": "Whisk and fry.",
///   "cooking_time": 10
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if a field is invalid, tags or ingredients are empty,
/// repeated or unknown.
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), AppError> {
    payload.validate()?;

    let recipe = state.recipe_service.create(&user, payload.into()).await?;

    Ok((StatusCode::CREATED, Json(recipe.into())))
}

/// `GET /api/recipes/{id}`
pub async fn get_recipe_handler(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(id): Path<i64>,
) -> Result<Json<RecipeResponse>, AppError> {
    let recipe = state.recipe_service.get(viewer.as_ref(), id).await?;
    Ok(Json(recipe.into()))
}

/// Updates a recipe.
///
/// # Endpoint
///
/// `PATCH /api/recipes/{id}`
///
/// # Errors
///
/// - **403 Forbidden**: the caller is not the author
/// - **404 Not Found**: recipe does not exist
pub async fn update_recipe_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, AppError> {
    payload.validate()?;

    let recipe = state
        .recipe_service
        .update(&user, id, payload.into())
        .await?;

    Ok(Json(recipe.into()))
}

/// `DELETE /api/recipes/{id}`, author only.
pub async fn delete_recipe_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.recipe_service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
