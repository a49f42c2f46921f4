//! Repository traits for recipes and per-user recipe collections.

use crate::domain::entities::{
    CartRecipe, Collection, NewRecipe, Recipe, RecipeBrief, RecipeFilter, RecipePatch,
};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recipes.
///
/// Returned [`Recipe`] values are fully loaded: author, tags and ingredient
/// lines included.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRecipeRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Lists recipes matching `filter`, newest first.
    async fn list(
        &self,
        filter: RecipeFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Recipe>, AppError>;

    /// Counts recipes matching `filter`.
    async fn count(&self, filter: RecipeFilter) -> Result<i64, AppError>;

    /// Finds a recipe by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError>;

    /// Checks whether a recipe exists without loading it.
    async fn exists(&self, id: i64) -> Result<bool, AppError>;

    /// Returns the author id of a recipe, or `None` if it does not exist.
    async fn author_id(&self, id: i64) -> Result<Option<i64>, AppError>;

    /// Creates a recipe with its tags and ingredient lines in one transaction.
    ///
    /// Returns the new recipe id.
    async fn create(&self, new_recipe: NewRecipe) -> Result<i64, AppError>;

    /// Updates a recipe, replacing its tags and ingredient lines, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    async fn update(&self, id: i64, patch: RecipePatch) -> Result<(), AppError>;

    /// Deletes a recipe. Returns `Ok(false)` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Lists up to `limit` recipes of an author, newest first. `None` means no limit.
    async fn list_briefs_by_author(
        &self,
        author_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<RecipeBrief>, AppError>;

    /// Counts recipes per author for the given authors.
    ///
    /// Authors without recipes are absent from the result.
    async fn count_by_authors(&self, author_ids: Vec<i64>) -> Result<Vec<(i64, i64)>, AppError>;
}

/// Repository interface for favorites and the shopping cart.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Adds a recipe to a user's collection. Returns `Ok(false)` if already present.
    async fn add(
        &self,
        collection: Collection,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<bool, AppError>;

    /// Removes a recipe from a user's collection. Returns `Ok(false)` if absent.
    async fn remove(
        &self,
        collection: Collection,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<bool, AppError>;

    /// Returns the subset of `recipe_ids` present in the user's collection.
    async fn contained(
        &self,
        collection: Collection,
        user_id: i64,
        recipe_ids: Vec<i64>,
    ) -> Result<Vec<i64>, AppError>;

    /// Loads the ingredient lines of every recipe in a user's cart.
    ///
    /// Recipes are returned in the order they were added.
    async fn cart_contents(&self, user_id: i64) -> Result<Vec<CartRecipe>, AppError>;
}
