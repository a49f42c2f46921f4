//! Recipe publishing, listing and short links.

use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

use crate::application::views::RecipeView;
use crate::domain::entities::{
    Collection, IngredientLineInput, Recipe, RecipeDraft, RecipeFilter, RecipePatch, User,
};
use crate::domain::repositories::{
    CollectionRepository, IngredientRepository, RecipeRepository, SubscriptionRepository,
    TagRepository,
};
use crate::domain::short_link::ShortLinkCodec;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Smallest and largest accepted ingredient amount.
pub const AMOUNT_RANGE: std::ops::RangeInclusive<i32> = 1..=32_000;

/// Listing query as requested by a viewer.
///
/// `only_favorited` and `only_in_cart` are ignored for anonymous viewers.
#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    pub author_id: Option<i64>,
    pub tags: Vec<String>,
    pub only_favorited: bool,
    pub only_in_cart: bool,
}

impl RecipeQuery {
    fn into_filter(self, viewer: Option<&User>) -> RecipeFilter {
        let viewer_id = viewer.map(|v| v.id);
        RecipeFilter {
            author_id: self.author_id,
            tags: self.tags,
            favorited_by: viewer_id.filter(|_| self.only_favorited),
            in_cart_of: viewer_id.filter(|_| self.only_in_cart),
        }
    }
}

/// Service for recipes.
///
/// Holds the short link codec: every short link is issued and resolved
/// here, so all of them share one alphabet.
pub struct RecipeService<R, C, S, T, I>
where
    R: RecipeRepository,
    C: CollectionRepository,
    S: SubscriptionRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    recipes: Arc<R>,
    collections: Arc<C>,
    subscriptions: Arc<S>,
    tags: Arc<T>,
    ingredients: Arc<I>,
    cache: Arc<dyn CacheService>,
    codec: ShortLinkCodec,
}

impl<R, C, S, T, I> RecipeService<R, C, S, T, I>
where
    R: RecipeRepository,
    C: CollectionRepository,
    S: SubscriptionRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    pub fn new(
        recipes: Arc<R>,
        collections: Arc<C>,
        subscriptions: Arc<S>,
        tags: Arc<T>,
        ingredients: Arc<I>,
        cache: Arc<dyn CacheService>,
        codec: ShortLinkCodec,
    ) -> Self {
        Self {
            recipes,
            collections,
            subscriptions,
            tags,
            ingredients,
            cache,
            codec,
        }
    }

    /// Lists recipes newest first.
    pub async fn list(
        &self,
        viewer: Option<&User>,
        query: RecipeQuery,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<RecipeView>, i64), AppError> {
        let filter = query.into_filter(viewer);

        let recipes = self.recipes.list(filter.clone(), offset, limit).await?;
        let total = self.recipes.count(filter).await?;

        Ok((self.views(viewer, recipes).await?, total))
    }

    /// Fetches one recipe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    pub async fn get(&self, viewer: Option<&User>, id: i64) -> Result<RecipeView, AppError> {
        let recipe = self.find(id).await?;
        self.single_view(viewer, recipe).await
    }

    /// Publishes a recipe authored by `author`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if tags or ingredients are empty,
    /// repeated, unknown, or an amount is out of range.
    pub async fn create(&self, author: &User, draft: RecipeDraft) -> Result<RecipeView, AppError> {
        self.validate_composition(&draft.tag_ids, &draft.ingredients)
            .await?;

        let id = self.recipes.create(draft.with_author(author.id)).await?;
        tracing::info!(recipe_id = id, author_id = author.id, "Recipe created");

        self.get(Some(author), id).await
    }

    /// Updates a recipe. Only its author may do so.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the recipe does not exist
    /// - [`AppError::Forbidden`] if `user` is not the author
    /// - [`AppError::Validation`] on invalid tags or ingredients
    pub async fn update(
        &self,
        user: &User,
        id: i64,
        patch: RecipePatch,
    ) -> Result<RecipeView, AppError> {
        self.ensure_author(user, id).await?;
        self.validate_composition(&patch.tag_ids, &patch.ingredients)
            .await?;

        self.recipes.update(id, patch).await?;

        self.get(Some(user), id).await
    }

    /// Deletes a recipe. Only its author may do so.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the recipe does not exist
    /// - [`AppError::Forbidden`] if `user` is not the author
    pub async fn delete(&self, user: &User, id: i64) -> Result<(), AppError> {
        self.ensure_author(user, id).await?;

        if !self.recipes.delete(id).await? {
            return Err(recipe_not_found(id));
        }

        self.cache.invalidate(&self.codec.encode(id as u64)).await;
        tracing::info!(recipe_id = id, "Recipe deleted");

        Ok(())
    }

    /// Issues the short code of an existing recipe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    pub async fn short_link(&self, id: i64) -> Result<String, AppError> {
        if id < 0 || !self.recipes.exists(id).await? {
            return Err(recipe_not_found(id));
        }

        metrics::counter!("short_links_issued_total").increment(1);

        Ok(self.codec.encode(id as u64))
    }

    /// Resolves a short code to the id of an existing recipe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is malformed, out of
    /// range, or points to a recipe that does not exist.
    pub async fn resolve_short_link(&self, code: &str) -> Result<i64, AppError> {
        let id = match self.decode_recipe_id(code) {
            Ok(id) => id,
            Err(e) => {
                metrics::counter!("short_links_rejected_total").increment(1);
                tracing::debug!(code, error = %e, "Rejected short link");
                return Err(e);
            }
        };

        // Codes with leading zero digits decode to the same id; cache under
        // the issued form so deletion clears every alias.
        let key = self.codec.encode(id as u64);

        if let Some(cached) = self.cache.get_recipe_id(&key).await {
            metrics::counter!("short_links_resolved_total").increment(1);
            return Ok(cached);
        }

        if !self.recipes.exists(id).await? {
            metrics::counter!("short_links_rejected_total").increment(1);
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        self.cache.set_recipe_id(&key, id, None).await;
        metrics::counter!("short_links_resolved_total").increment(1);

        Ok(id)
    }

    fn decode_recipe_id(&self, code: &str) -> Result<i64, AppError> {
        let value = self.codec.decode(code)?;

        i64::try_from(value)
            .map_err(|_| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    async fn find(&self, id: i64) -> Result<Recipe, AppError> {
        self.recipes
            .find_by_id(id)
            .await?
            .ok_or_else(|| recipe_not_found(id))
    }

    async fn ensure_author(&self, user: &User, id: i64) -> Result<(), AppError> {
        let author_id = self
            .recipes
            .author_id(id)
            .await?
            .ok_or_else(|| recipe_not_found(id))?;

        if author_id != user.id {
            return Err(AppError::forbidden(
                "Only the author can modify this recipe",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    async fn validate_composition(
        &self,
        tag_ids: &[i64],
        ingredients: &[IngredientLineInput],
    ) -> Result<(), AppError> {
        check_tags(tag_ids)?;
        check_ingredients(ingredients)?;

        let known_tags: HashSet<i64> = self
            .tags
            .existing_ids(tag_ids.to_vec())
            .await?
            .into_iter()
            .collect();
        let unknown_tags: Vec<i64> = tag_ids
            .iter()
            .copied()
            .filter(|id| !known_tags.contains(id))
            .collect();
        if !unknown_tags.is_empty() {
            return Err(AppError::bad_request(
                "Unknown tags",
                json!({ "field": "tags", "ids": unknown_tags }),
            ));
        }

        let ingredient_ids: Vec<i64> = ingredients.iter().map(|l| l.ingredient_id).collect();
        let known_ingredients: HashSet<i64> = self
            .ingredients
            .existing_ids(ingredient_ids.clone())
            .await?
            .into_iter()
            .collect();
        let unknown_ingredients: Vec<i64> = ingredient_ids
            .into_iter()
            .filter(|id| !known_ingredients.contains(id))
            .collect();
        if !unknown_ingredients.is_empty() {
            return Err(AppError::bad_request(
                "Unknown ingredients",
                json!({ "field": "ingredients", "ids": unknown_ingredients }),
            ));
        }

        Ok(())
    }

    async fn single_view(
        &self,
        viewer: Option<&User>,
        recipe: Recipe,
    ) -> Result<RecipeView, AppError> {
        let id = recipe.id;
        self.views(viewer, vec![recipe])
            .await?
            .pop()
            .ok_or_else(|| recipe_not_found(id))
    }

    /// Attaches the viewer's flags to a page of recipes.
    async fn views(
        &self,
        viewer: Option<&User>,
        recipes: Vec<Recipe>,
    ) -> Result<Vec<RecipeView>, AppError> {
        let Some(viewer) = viewer else {
            return Ok(recipes
                .into_iter()
                .map(|recipe| RecipeView {
                    recipe,
                    author_subscribed: false,
                    is_favorited: false,
                    is_in_shopping_cart: false,
                })
                .collect());
        };

        let ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
        let author_ids: Vec<i64> = recipes
            .iter()
            .map(|r| r.author.id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let favorited: HashSet<i64> = self
            .collections
            .contained(Collection::Favorites, viewer.id, ids.clone())
            .await?
            .into_iter()
            .collect();
        let in_cart: HashSet<i64> = self
            .collections
            .contained(Collection::ShoppingCart, viewer.id, ids)
            .await?
            .into_iter()
            .collect();
        let subscribed: HashSet<i64> = self
            .subscriptions
            .subscribed_among(viewer.id, author_ids)
            .await?
            .into_iter()
            .collect();

        Ok(recipes
            .into_iter()
            .map(|recipe| RecipeView {
                author_subscribed: subscribed.contains(&recipe.author.id),
                is_favorited: favorited.contains(&recipe.id),
                is_in_shopping_cart: in_cart.contains(&recipe.id),
                recipe,
            })
            .collect())
    }
}

fn recipe_not_found(id: i64) -> AppError {
    AppError::not_found("Recipe not found", json!({ "id": id }))
}

fn check_tags(tag_ids: &[i64]) -> Result<(), AppError> {
    if tag_ids.is_empty() {
        return Err(AppError::bad_request(
            "At least one tag is required",
            json!({ "field": "tags" }),
        ));
    }

    let mut seen = HashSet::with_capacity(tag_ids.len());
    if let Some(duplicate) = tag_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(AppError::bad_request(
            "Tags must not repeat",
            json!({ "field": "tags", "id": duplicate }),
        ));
    }

    Ok(())
}

fn check_ingredients(ingredients: &[IngredientLineInput]) -> Result<(), AppError> {
    if ingredients.is_empty() {
        return Err(AppError::bad_request(
            "At least one ingredient is required",
            json!({ "field": "ingredients" }),
        ));
    }

    let mut seen = HashSet::with_capacity(ingredients.len());
    for line in ingredients {
        if !seen.insert(line.ingredient_id) {
            return Err(AppError::bad_request(
                "Ingredients must not repeat",
                json!({ "field": "ingredients", "id": line.ingredient_id }),
            ));
        }
        if !AMOUNT_RANGE.contains(&line.amount) {
            return Err(AppError::bad_request(
                "Ingredient amount must be between 1 and 32000",
                json!({ "field": "ingredients", "id": line.ingredient_id, "amount": line.amount }),
            ));
        }
    }

    Ok(())
}
