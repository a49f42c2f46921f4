//! Reference data: tags and the ingredient catalogue.

use regex::Regex;
use serde_json::json;
use std::sync::{Arc, LazyLock};

use crate::domain::entities::{Ingredient, NewIngredient, NewTag, Tag};
use crate::domain::repositories::{IngredientRepository, TagRepository};
use crate::error::AppError;

static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid slug regex"));

const TAG_MAX_LENGTH: usize = 32;

/// Service for tags and ingredients.
pub struct CatalogService<T: TagRepository, I: IngredientRepository> {
    tags: Arc<T>,
    ingredients: Arc<I>,
}

impl<T: TagRepository, I: IngredientRepository> CatalogService<T, I> {
    pub fn new(tags: Arc<T>, ingredients: Arc<I>) -> Self {
        Self { tags, ingredients }
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, AppError> {
        self.tags.list().await
    }

    pub async fn get_tag(&self, id: i64) -> Result<Tag, AppError> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found", json!({ "id": id })))
    }

    /// Creates a tag. Used by the admin CLI.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the name is blank or the slug malformed
    /// - [`AppError::Conflict`] if the name or slug is taken
    pub async fn create_tag(&self, new_tag: NewTag) -> Result<Tag, AppError> {
        let name = new_tag.name.trim();
        if name.is_empty() || name.chars().count() > TAG_MAX_LENGTH {
            return Err(AppError::bad_request(
                "Tag name must be 1 to 32 characters",
                json!({ "field": "name" }),
            ));
        }

        if new_tag.slug.len() > TAG_MAX_LENGTH || !SLUG_REGEX.is_match(&new_tag.slug) {
            return Err(AppError::bad_request(
                "Slug may contain only latin letters, digits, '-' and '_'",
                json!({ "field": "slug", "value": new_tag.slug }),
            ));
        }

        self.tags
            .create(NewTag {
                name: name.to_string(),
                slug: new_tag.slug,
            })
            .await
    }

    /// Searches ingredients by case-insensitive name prefix.
    ///
    /// A missing or blank prefix lists the whole catalogue.
    pub async fn search_ingredients(
        &self,
        name_prefix: Option<String>,
    ) -> Result<Vec<Ingredient>, AppError> {
        let prefix = name_prefix
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        self.ingredients.search(prefix).await
    }

    pub async fn get_ingredient(&self, id: i64) -> Result<Ingredient, AppError> {
        self.ingredients
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Ingredient not found", json!({ "id": id })))
    }

    /// Loads ingredients into the catalogue, skipping pairs already present.
    ///
    /// Returns the number of ingredients inserted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if any entry has a blank name or unit.
    pub async fn load_ingredients(
        &self,
        ingredients: Vec<NewIngredient>,
    ) -> Result<u64, AppError> {
        let mut cleaned = Vec::with_capacity(ingredients.len());

        for (index, ingredient) in ingredients.into_iter().enumerate() {
            let name = ingredient.name.trim();
            let unit = ingredient.measurement_unit.trim();

            if name.is_empty() || unit.is_empty() {
                return Err(AppError::bad_request(
                    "Ingredient name and measurement unit must not be empty",
                    json!({ "index": index }),
                ));
            }

            cleaned.push(NewIngredient {
                name: name.to_string(),
                measurement_unit: unit.to_string(),
            });
        }

        self.ingredients.insert_many(cleaned).await
    }
}
