//! Handlers for author subscriptions.

use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::pagination::Page;
use crate::api::dto::user::{SubscriptionParams, UserWithRecipesResponse};
use crate::api::middleware::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists authors the user is subscribed to, with their latest recipes.
///
/// # Endpoint
///
/// `GET /api/users/subscriptions?page=1&limit=6&recipes_limit=3`
///
/// Without `recipes_limit` every recipe of each author is included.
pub async fn subscriptions_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<SubscriptionParams>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Page<UserWithRecipesResponse>>, AppError> {
    let request = params.pagination.resolve(state.page_size)?;

    let (authors, total) = state
        .user_service
        .subscriptions(
            &user,
            request.offset(),
            request.limit(),
            params.recipes_limit.map(i64::from),
        )
        .await?;

    Ok(Json(Page::new(
        authors.into_iter().map(Into::into).collect(),
        total,
        request,
        &state.public_base_url,
        uri.path(),
        uri.query(),
    )))
}

/// Subscribes the user to an author.
///
/// # Endpoint
///
/// `POST /api/users/{id}/subscribe?recipes_limit=3`
///
/// # Errors
///
/// - **404 Not Found**: author does not exist
/// - **400 Bad Request**: self-subscription or already subscribed
pub async fn subscribe_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(author_id): Path<i64>,
    Query(params): Query<SubscriptionParams>,
) -> Result<(StatusCode, Json<UserWithRecipesResponse>), AppError> {
    let author = state
        .user_service
        .subscribe(&user, author_id, params.recipes_limit.map(i64::from))
        .await?;

    Ok((StatusCode::CREATED, Json(author.into())))
}

/// Unsubscribes the user from an author.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}/subscribe`
pub async fn unsubscribe_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(author_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.user_service.unsubscribe(&user, author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
