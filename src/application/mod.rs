//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::AuthService`] - API token authentication
//! - [`services::UserService`] - Profiles, avatars and subscriptions
//! - [`services::CatalogService`] - Tags and ingredients
//! - [`services::RecipeService`] - Recipes and short links
//! - [`services::CollectionService`] - Favorites, cart and shopping list export

pub mod services;
pub mod views;
