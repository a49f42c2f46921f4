//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] / [`SubscriptionRepository`] - Accounts and author subscriptions
//! - [`TokenRepository`] - API token authentication
//! - [`TagRepository`] / [`IngredientRepository`] - Reference data
//! - [`RecipeRepository`] - Recipes with tags and ingredient lines
//! - [`CollectionRepository`] - Favorites and shopping cart
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod catalog_repository;
pub mod recipe_repository;
pub mod token_repository;
pub mod user_repository;

pub use catalog_repository::{IngredientRepository, TagRepository};
pub use recipe_repository::{CollectionRepository, RecipeRepository};
pub use token_repository::{ApiToken, TokenRepository};
pub use user_repository::{SubscriptionRepository, UserRepository};

#[cfg(test)]
pub use catalog_repository::{MockIngredientRepository, MockTagRepository};
#[cfg(test)]
pub use recipe_repository::{MockCollectionRepository, MockRecipeRepository};
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::{MockSubscriptionRepository, MockUserRepository};
