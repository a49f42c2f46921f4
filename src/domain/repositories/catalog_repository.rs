//! Repository traits for tags and ingredients.

use crate::domain::entities::{Ingredient, NewIngredient, NewTag, Tag};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recipe tags.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Lists all tags ordered by name.
    async fn list(&self) -> Result<Vec<Tag>, AppError>;

    /// Finds a tag by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, AppError>;

    /// Returns which of `ids` exist.
    async fn existing_ids(&self, ids: Vec<i64>) -> Result<Vec<i64>, AppError>;

    /// Creates a tag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name or slug is taken.
    async fn create(&self, new_tag: NewTag) -> Result<Tag, AppError>;
}

/// Repository interface for the ingredient catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Lists ingredients whose name starts with `prefix` (case-insensitive),
    /// or all ingredients when `prefix` is `None`. Ordered by name.
    async fn search(&self, prefix: Option<String>) -> Result<Vec<Ingredient>, AppError>;

    /// Finds an ingredient by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, AppError>;

    /// Returns which of `ids` exist.
    async fn existing_ids(&self, ids: Vec<i64>) -> Result<Vec<i64>, AppError>;

    /// Inserts ingredients, skipping `(name, measurement_unit)` pairs that exist.
    ///
    /// Returns the number of rows actually inserted.
    async fn insert_many(&self, ingredients: Vec<NewIngredient>) -> Result<u64, AppError>;
}
