//! Bearer token authentication.
//!
//! [`layer`] identifies the caller when an `Authorization` header is present
//! and stores the [`User`] in request extensions. Requests without the header
//! pass through anonymously. Handlers then choose their policy with an
//! extractor:
//!
//! - [`CurrentUser`] - rejects anonymous requests with 401
//! - [`MaybeUser`] - accepts both

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;
use std::convert::Infallible;

use crate::domain::entities::User;
use crate::{error::AppError, state::AppState};

/// Resolves the Bearer token, if any, to a user.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer`) if the
/// header is present but malformed, or the token is unknown or revoked.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !req.headers().contains_key(header::AUTHORIZATION) {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is invalid" }),
            )
        })?;

    let user = st.auth_service.authenticate(&token).await?;
    tracing::debug!(user_id = user.id, "Authenticated request");
    parts.extensions.insert(user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// The authenticated caller. Rejects anonymous requests.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Authentication credentials were not provided",
                    json!({ "reason": "Authorization header is missing" }),
                )
            })
    }
}

/// The caller if authenticated, `None` for anonymous requests.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl MaybeUser {
    pub fn as_ref(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<User>().cloned()))
    }
}
