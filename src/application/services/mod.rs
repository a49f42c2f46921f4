//! Business logic services for the application layer.

pub mod auth_service;
pub mod catalog_service;
pub mod collection_service;
pub mod recipe_service;
pub mod user_service;

pub use auth_service::{AuthService, hash_token};
pub use catalog_service::CatalogService;
pub use collection_service::CollectionService;
pub use recipe_service::{RecipeQuery, RecipeService};
pub use user_service::UserService;
