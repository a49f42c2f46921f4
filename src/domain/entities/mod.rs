//! Core domain entities.
//!
//! Entities are plain data structures. Write models (`NewRecipe`,
//! `RecipePatch`, `NewTag`, ...) are kept separate from the read models
//! returned by repositories.

pub mod catalog;
pub mod collection;
pub mod recipe;
pub mod user;

pub use catalog::{Ingredient, NewIngredient, NewTag, Tag};
pub use collection::{CartRecipe, Collection};
pub use recipe::{
    IngredientLine, IngredientLineInput, NewRecipe, Recipe, RecipeBrief, RecipeDraft, RecipeFilter,
    RecipePatch,
};
pub use user::{NewUser, User};
