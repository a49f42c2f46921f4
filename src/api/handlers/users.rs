//! Handlers for user profiles and avatars.

use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::pagination::{Page, PaginationParams};
use crate::api::dto::user::{AvatarRequest, AvatarResponse, UserResponse};
use crate::api::middleware::{CurrentUser, MaybeUser};
use crate::error::AppError;
use crate::state::AppState;

/// Lists users.
///
/// # Endpoint
///
/// `GET /api/users?page=1&limit=6`
///
/// `is_subscribed` is always `false` for anonymous viewers.
pub async fn list_users_handler(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Query(params): Query<PaginationParams>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Page<UserResponse>>, AppError> {
    let request = params.resolve(state.page_size)?;

    let (users, total) = state
        .user_service
        .list_users(viewer.as_ref(), request.offset(), request.limit())
        .await?;

    Ok(Json(Page::new(
        users.into_iter().map(Into::into).collect(),
        total,
        request,
        &state.public_base_url,
        uri.path(),
        uri.query(),
    )))
}

/// Fetches one user's profile.
///
/// # Endpoint
///
/// `GET /api/users/{id}`
///
/// # Errors
///
/// Returns 404 if the user does not exist.
pub async fn get_user_handler(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get_user(viewer.as_ref(), id).await?;
    Ok(Json(user.into()))
}

/// Returns the authenticated user's profile.
///
/// # Endpoint
///
/// `GET /api/users/me`
pub async fn me_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<UserResponse> {
    Json(state.user_service.me(user).into())
}

/// Sets the avatar of the authenticated user.
///
/// # Endpoint
///
/// `PUT /api/users/me/avatar`
///
/// # Request Body
///
/// ```json
/// { "avatar": "https://cdn.example.com/me.png" }
/// ```
pub async fn set_avatar_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<AvatarRequest>,
) -> Result<Json<AvatarResponse>, AppError> {
    payload.validate()?;

    let updated = state.user_service.set_avatar(&user, payload.avatar).await?;

    Ok(Json(AvatarResponse {
        avatar: updated.avatar,
    }))
}

/// Removes the avatar of the authenticated user.
///
/// # Endpoint
///
/// `DELETE /api/users/me/avatar`
pub async fn delete_avatar_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_avatar(&user).await?;
    Ok(StatusCode::NO_CONTENT)
}
