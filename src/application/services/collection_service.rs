//! Favorites, shopping cart and shopping list export.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{Collection, RecipeBrief, User};
use crate::domain::rendering::{Document, ShoppingListRenderer};
use crate::domain::repositories::{CollectionRepository, RecipeRepository};
use crate::domain::shopping_list::{AggregatedLine, aggregate};
use crate::error::AppError;

/// Service for per-user recipe collections.
pub struct CollectionService<C: CollectionRepository, R: RecipeRepository> {
    collections: Arc<C>,
    recipes: Arc<R>,
    renderer: Arc<dyn ShoppingListRenderer>,
}

impl<C: CollectionRepository, R: RecipeRepository> CollectionService<C, R> {
    pub fn new(
        collections: Arc<C>,
        recipes: Arc<R>,
        renderer: Arc<dyn ShoppingListRenderer>,
    ) -> Self {
        Self {
            collections,
            recipes,
            renderer,
        }
    }

    /// Adds a recipe to one of the user's collections.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the recipe does not exist
    /// - [`AppError::Validation`] if the recipe is already there
    pub async fn add(
        &self,
        collection: Collection,
        user: &User,
        recipe_id: i64,
    ) -> Result<RecipeBrief, AppError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe not found", json!({ "id": recipe_id })))?;

        if !self.collections.add(collection, user.id, recipe_id).await? {
            return Err(AppError::bad_request(
                format!("Recipe is already in {}", collection.label()),
                json!({ "id": recipe_id }),
            ));
        }

        Ok(RecipeBrief::from(&recipe))
    }

    /// Removes a recipe from one of the user's collections.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the recipe does not exist
    /// - [`AppError::Validation`] if the recipe was not there
    pub async fn remove(
        &self,
        collection: Collection,
        user: &User,
        recipe_id: i64,
    ) -> Result<(), AppError> {
        if !self.recipes.exists(recipe_id).await? {
            return Err(AppError::not_found(
                "Recipe not found",
                json!({ "id": recipe_id }),
            ));
        }

        if !self.collections.remove(collection, user.id, recipe_id).await? {
            return Err(AppError::bad_request(
                format!("Recipe is not in {}", collection.label()),
                json!({ "id": recipe_id }),
            ));
        }

        Ok(())
    }

    /// Aggregated ingredient totals over the user's cart.
    pub async fn shopping_list(&self, user: &User) -> Result<Vec<AggregatedLine>, AppError> {
        let cart = self.collections.cart_contents(user.id).await?;
        Ok(aggregate(cart.iter().map(|recipe| &recipe.lines)))
    }

    /// Renders the user's shopping list as a downloadable document.
    pub async fn export_shopping_list(&self, user: &User) -> Result<Document, AppError> {
        let lines = self.shopping_list(user).await?;

        let document = self.renderer.render(&lines).map_err(|e| {
            tracing::error!(user_id = user.id, error = %e, "Shopping list rendering failed");
            AppError::internal("Failed to render shopping list", json!({}))
        })?;

        metrics::counter!("shopping_lists_exported_total").increment(1);
        tracing::debug!(user_id = user.id, lines = lines.len(), "Shopping list exported");

        Ok(document)
    }
}
