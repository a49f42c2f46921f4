//! Recipe entity and its write models.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::{Tag, User};

/// An ingredient line of a recipe with the ingredient resolved.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct IngredientLine {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// A fully loaded recipe.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: i64,
    pub author: User,
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<IngredientLine>,
}

/// Short recipe representation used in favorites, cart and author listings.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RecipeBrief {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub cooking_time: i32,
}

impl From<&Recipe> for RecipeBrief {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Ingredient reference with amount, as submitted by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientLineInput {
    pub ingredient_id: i64,
    pub amount: i32,
}

/// Recipe content submitted by its author, before ownership is attached.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: i32,
    pub tag_ids: Vec<i64>,
    pub ingredients: Vec<IngredientLineInput>,
}

impl RecipeDraft {
    pub fn with_author(self, author_id: i64) -> NewRecipe {
        NewRecipe {
            author_id,
            name: self.name,
            image: self.image,
            text: self.text,
            cooking_time: self.cooking_time,
            tag_ids: self.tag_ids,
            ingredients: self.ingredients,
        }
    }
}

/// Input data for creating a recipe.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub author_id: i64,
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: i32,
    pub tag_ids: Vec<i64>,
    pub ingredients: Vec<IngredientLineInput>,
}

/// Update of an existing recipe.
///
/// Scalar fields left as `None` are unchanged. Tags and ingredients are
/// always replaced as a whole.
#[derive(Debug, Clone)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub tag_ids: Vec<i64>,
    pub ingredients: Vec<IngredientLineInput>,
}

/// Listing filter for recipes.
///
/// `favorited_by` and `in_cart_of` hold a user id; they are only set for
/// authenticated viewers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author_id: Option<i64>,
    pub tags: Vec<String>,
    pub favorited_by: Option<i64>,
    pub in_cart_of: Option<i64>,
}
