//! Read models assembled by services for a specific viewer.
//!
//! Entities know nothing about who is looking at them; these wrappers carry
//! the per-viewer flags (subscribed, favorited, in cart) next to the entity.

use crate::domain::entities::{Recipe, RecipeBrief, User};

/// A user as seen by the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorView {
    pub user: User,
    pub is_subscribed: bool,
}

/// A recipe as seen by the viewer.
#[derive(Debug, Clone)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub author_subscribed: bool,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// An author in the viewer's subscriptions, with a preview of their recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorWithRecipes {
    pub author: AuthorView,
    pub recipes: Vec<RecipeBrief>,
    pub recipes_count: i64,
}
