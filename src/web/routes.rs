//! Public HTML route configuration.

use crate::state::AppState;
use crate::web::handlers::recipe_page_handler;
use axum::{Router, routing::get};

/// Public page routes, nested under `/recipes`.
///
/// # Endpoints
///
/// - `GET /{id}` - Recipe page
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(recipe_page_handler))
}
