//! PostgreSQL implementation of recipe repository.
//!
//! Recipes are loaded in three queries per page: the recipe rows joined with
//! their authors, then tags and ingredient lines for all ids on the page at
//! once. Write operations run in a transaction covering the recipe row and
//! both link tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{
    IngredientLine, IngredientLineInput, NewRecipe, Recipe, RecipeBrief, RecipeFilter,
    RecipePatch, Tag, User,
};
use crate::domain::repositories::RecipeRepository;
use crate::error::AppError;

/// Shared `WHERE` clause for listing and counting.
///
/// Binds: `$1` author id, `$2` tag slugs (any of), `$3` favorited by,
/// `$4` in cart of. Each condition is skipped when its parameter is empty.
const FILTER_CLAUSE: &str = r#"
    WHERE ($1::bigint IS NULL OR r.author_id = $1)
      AND (cardinality($2::text[]) = 0 OR EXISTS (
            SELECT 1 FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = r.id AND t.slug = ANY($2)))
      AND ($3::bigint IS NULL OR EXISTS (
            SELECT 1 FROM favorites f
            WHERE f.recipe_id = r.id AND f.user_id = $3))
      AND ($4::bigint IS NULL OR EXISTS (
            SELECT 1 FROM shopping_cart c
            WHERE c.recipe_id = r.id AND c.user_id = $4))
"#;

const RECIPE_SELECT: &str = r#"
    SELECT r.id, r.name, r.image, r.text, r.cooking_time, r.created_at,
           u.id AS author_id, u.email AS author_email, u.username AS author_username,
           u.first_name AS author_first_name, u.last_name AS author_last_name,
           u.avatar AS author_avatar, u.created_at AS author_created_at
    FROM recipes r
    JOIN users u ON u.id = r.author_id
"#;

#[derive(FromRow)]
struct RecipeRow {
    id: i64,
    name: String,
    image: Option<String>,
    text: String,
    cooking_time: i32,
    created_at: DateTime<Utc>,
    author_id: i64,
    author_email: String,
    author_username: String,
    author_first_name: String,
    author_last_name: String,
    author_avatar: Option<String>,
    author_created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct RecipeTagRow {
    recipe_id: i64,
    id: i64,
    name: String,
    slug: String,
}

#[derive(FromRow)]
struct RecipeIngredientRow {
    recipe_id: i64,
    id: i64,
    name: String,
    measurement_unit: String,
    amount: i32,
}

impl RecipeRow {
    fn into_recipe(self, tags: Vec<Tag>, ingredients: Vec<IngredientLine>) -> Recipe {
        Recipe {
            id: self.id,
            author: User {
                id: self.author_id,
                email: self.author_email,
                username: self.author_username,
                first_name: self.author_first_name,
                last_name: self.author_last_name,
                avatar: self.author_avatar,
                created_at: self.author_created_at,
            },
            name: self.name,
            image: self.image,
            text: self.text,
            cooking_time: self.cooking_time,
            created_at: self.created_at,
            tags,
            ingredients,
        }
    }
}

/// PostgreSQL repository for recipes.
pub struct PgRecipeRepository {
    pool: Arc<PgPool>,
}

impl PgRecipeRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Attaches tags and ingredient lines to recipe rows, preserving row order.
    async fn hydrate(&self, rows: Vec<RecipeRow>) -> Result<Vec<Recipe>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

        let tag_rows = sqlx::query_as::<_, RecipeTagRow>(
            r#"
            SELECT rt.recipe_id, t.id, t.name, t.slug
            FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(&ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let ingredient_rows = sqlx::query_as::<_, RecipeIngredientRow>(
            r#"
            SELECT ri.recipe_id, i.id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = ANY($1)
            ORDER BY ri.id
            "#,
        )
        .bind(&ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in tag_rows {
            tags.entry(row.recipe_id).or_default().push(Tag {
                id: row.id,
                name: row.name,
                slug: row.slug,
            });
        }

        let mut ingredients: HashMap<i64, Vec<IngredientLine>> = HashMap::new();
        for row in ingredient_rows {
            ingredients
                .entry(row.recipe_id)
                .or_default()
                .push(IngredientLine {
                    id: row.id,
                    name: row.name,
                    measurement_unit: row.measurement_unit,
                    amount: row.amount,
                });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                row.into_recipe(
                    tags.remove(&id).unwrap_or_default(),
                    ingredients.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }
}

/// Inserts the tag and ingredient links of a recipe.
async fn insert_links(
    tx: &mut Transaction<'_, Postgres>,
    recipe_id: i64,
    tag_ids: &[i64],
    ingredients: &[IngredientLineInput],
) -> Result<(), AppError> {
    if !tag_ids.is_empty() {
        sqlx::query(
            r#"
            INSERT INTO recipe_tags (recipe_id, tag_id)
            SELECT $1, UNNEST($2::bigint[])
            "#,
        )
        .bind(recipe_id)
        .bind(tag_ids)
        .execute(&mut **tx)
        .await?;
    }

    if !ingredients.is_empty() {
        let (ingredient_ids, amounts): (Vec<i64>, Vec<i32>) = ingredients
            .iter()
            .map(|line| (line.ingredient_id, line.amount))
            .unzip();

        sqlx::query(
            r#"
            INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount)
            SELECT $1, ingredient_id, amount
            FROM UNNEST($2::bigint[], $3::int[]) AS input (ingredient_id, amount)
            "#,
        )
        .bind(recipe_id)
        .bind(&ingredient_ids)
        .bind(&amounts)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn list(
        &self,
        filter: RecipeFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Recipe>, AppError> {
        let sql = format!(
            "{RECIPE_SELECT} {FILTER_CLAUSE} ORDER BY r.created_at DESC, r.id DESC LIMIT $5 OFFSET $6"
        );

        let rows = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(filter.author_id)
            .bind(&filter.tags)
            .bind(filter.favorited_by)
            .bind(filter.in_cart_of)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        self.hydrate(rows).await
    }

    async fn count(&self, filter: RecipeFilter) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM recipes r {FILTER_CLAUSE}");

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(filter.author_id)
            .bind(&filter.tags)
            .bind(filter.favorited_by)
            .bind(filter.in_cart_of)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError> {
        let sql = format!("{RECIPE_SELECT} WHERE r.id = $1");

        let row = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM recipes WHERE id = $1)")
            .bind(id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }

    async fn author_id(&self, id: i64) -> Result<Option<i64>, AppError> {
        let author_id: Option<i64> = sqlx::query_scalar("SELECT author_id FROM recipes WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(author_id)
    }

    async fn create(&self, new_recipe: NewRecipe) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO recipes (author_id, name, image, text, cooking_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(new_recipe.author_id)
        .bind(&new_recipe.name)
        .bind(&new_recipe.image)
        .bind(&new_recipe.text)
        .bind(new_recipe.cooking_time)
        .fetch_one(&mut *tx)
        .await?;

        insert_links(&mut tx, id, &new_recipe.tag_ids, &new_recipe.ingredients).await?;

        tx.commit().await?;

        Ok(id)
    }

    async fn update(&self, id: i64, patch: RecipePatch) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE recipes
            SET name = COALESCE($2, name),
                image = COALESCE($3, image),
                text = COALESCE($4, text),
                cooking_time = COALESCE($5, cooking_time)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.image)
        .bind(&patch.text)
        .bind(patch.cooking_time)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Recipe not found", json!({ "id": id })));
        }

        sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_links(&mut tx, id, &patch.tag_ids, &patch.ingredients).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_briefs_by_author(
        &self,
        author_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<RecipeBrief>, AppError> {
        let briefs = sqlx::query_as::<_, RecipeBrief>(
            r#"
            SELECT id, name, image, cooking_time
            FROM recipes
            WHERE author_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(author_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(briefs)
    }

    async fn count_by_authors(&self, author_ids: Vec<i64>) -> Result<Vec<(i64, i64)>, AppError> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }

        let counts: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT author_id, COUNT(*)
            FROM recipes
            WHERE author_id = ANY($1)
            GROUP BY author_id
            "#,
        )
        .bind(&author_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(counts)
    }
}
