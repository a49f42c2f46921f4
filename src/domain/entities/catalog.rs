//! Reference data: tags and ingredients.

use serde::Deserialize;
use sqlx::FromRow;

/// A recipe tag (breakfast, dinner, ...).
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Input data for creating a tag.
#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
    pub slug: String,
}

/// An ingredient. Identity is the `(name, measurement_unit)` pair.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

/// Input data for loading ingredients, e.g. from a JSON catalogue file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}
