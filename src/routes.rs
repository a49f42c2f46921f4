//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /s/{code}`       - Short link redirect (public)
//! - `GET  /health`         - Health check: DB and cache (public)
//! - `GET  /recipes/{id}`   - Recipe page (public)
//! - `/api/*`               - REST API (Bearer token optional or required per endpoint)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token identification on `/api`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, short_link_redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

fn api_routes(state: &AppState) -> Router<AppState> {
    api::routes::routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/s/{code}", get(short_link_redirect_handler))
        .nest("/recipes", web::routes::public_routes())
}

fn assemble(
    state: AppState,
    api_router: Router<AppState>,
    public_router: Router<AppState>,
) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .merge(public_router)
        .with_state(state)
        .layer(tracing::layer())
}

/// All routes with authentication and tracing, without rate limiting.
///
/// Tests drive this router directly since it needs no peer address.
pub fn router(state: AppState) -> Router {
    let api_router = api_routes(&state);
    assemble(state, api_router, public_routes())
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_router = rate_limit::apply(api_routes(&state), behind_proxy, rate_limit::API);
    let public_router = rate_limit::apply(public_routes(), behind_proxy, rate_limit::PUBLIC);

    NormalizePathLayer::trim_trailing_slash().layer(assemble(state, api_router, public_router))
}
