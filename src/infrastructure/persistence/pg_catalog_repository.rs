//! PostgreSQL implementation of tag and ingredient repositories.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Ingredient, NewIngredient, NewTag, Tag};
use crate::domain::repositories::{IngredientRepository, TagRepository};
use crate::error::AppError;

/// PostgreSQL repository for recipe tags.
pub struct PgTagRepository {
    pool: Arc<PgPool>,
}

impl PgTagRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, AppError> {
        let tags = sqlx::query_as::<_, Tag>("SELECT id, name, slug FROM tags ORDER BY name")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(tags)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, AppError> {
        let tag = sqlx::query_as::<_, Tag>("SELECT id, name, slug FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(tag)
    }

    async fn existing_ids(&self, ids: Vec<i64>) -> Result<Vec<i64>, AppError> {
        let found: Vec<i64> = sqlx::query_scalar("SELECT id FROM tags WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(found)
    }

    async fn create(&self, new_tag: NewTag) -> Result<Tag, AppError> {
        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (name, slug) VALUES ($1, $2) RETURNING id, name, slug",
        )
        .bind(&new_tag.name)
        .bind(&new_tag.slug)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(tag)
    }
}

/// PostgreSQL repository for the ingredient catalogue.
pub struct PgIngredientRepository {
    pool: Arc<PgPool>,
}

impl PgIngredientRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Escapes `LIKE` wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[async_trait]
impl IngredientRepository for PgIngredientRepository {
    async fn search(&self, prefix: Option<String>) -> Result<Vec<Ingredient>, AppError> {
        let pattern = prefix.map(|p| format!("{}%", escape_like(&p.to_lowercase())));

        let ingredients = sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, name, measurement_unit
            FROM ingredients
            WHERE ($1::text IS NULL OR LOWER(name) LIKE $1)
            ORDER BY name, measurement_unit
            "#,
        )
        .bind(pattern)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ingredients)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, AppError> {
        let ingredient = sqlx::query_as::<_, Ingredient>(
            "SELECT id, name, measurement_unit FROM ingredients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(ingredient)
    }

    async fn existing_ids(&self, ids: Vec<i64>) -> Result<Vec<i64>, AppError> {
        let found: Vec<i64> = sqlx::query_scalar("SELECT id FROM ingredients WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(found)
    }

    async fn insert_many(&self, ingredients: Vec<NewIngredient>) -> Result<u64, AppError> {
        if ingredients.is_empty() {
            return Ok(0);
        }

        let (names, units): (Vec<String>, Vec<String>) = ingredients
            .into_iter()
            .map(|i| (i.name, i.measurement_unit))
            .unzip();

        let result = sqlx::query(
            r#"
            INSERT INTO ingredients (name, measurement_unit)
            SELECT * FROM UNNEST($1::text[], $2::text[])
            ON CONFLICT (name, measurement_unit) DO NOTHING
            "#,
        )
        .bind(&names)
        .bind(&units)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }
}
