//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries
//! are checked at runtime and mapped with `FromRow`.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] / [`PgSubscriptionRepository`] - Accounts and subscriptions
//! - [`PgTokenRepository`] - API token storage and validation
//! - [`PgTagRepository`] / [`PgIngredientRepository`] - Reference data
//! - [`PgRecipeRepository`] - Recipes with tags and ingredient lines
//! - [`PgCollectionRepository`] - Favorites and shopping cart

pub mod pg_catalog_repository;
pub mod pg_collection_repository;
pub mod pg_recipe_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_catalog_repository::{PgIngredientRepository, PgTagRepository};
pub use pg_collection_repository::PgCollectionRepository;
pub use pg_recipe_repository::PgRecipeRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::{PgSubscriptionRepository, PgUserRepository};
