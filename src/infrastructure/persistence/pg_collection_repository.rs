//! PostgreSQL implementation of the favorites and shopping cart repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{CartRecipe, Collection};
use crate::domain::repositories::CollectionRepository;
use crate::domain::shopping_list::CartLine;
use crate::error::AppError;

/// PostgreSQL repository for per-user recipe collections.
///
/// Both collections have the same `(user_id, recipe_id)` layout; the table
/// name comes from [`Collection::table`] and never from user input.
pub struct PgCollectionRepository {
    pool: Arc<PgPool>,
}

impl PgCollectionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CartLineRow {
    recipe_id: i64,
    ingredient_name: String,
    measurement_unit: String,
    amount: i32,
}

/// Groups rows ordered by cart position into one entry per recipe.
///
/// A negative stored amount is reported as [`AppError::Internal`].
fn group_cart_rows(rows: Vec<CartLineRow>) -> Result<Vec<CartRecipe>, AppError> {
    let mut recipes: Vec<CartRecipe> = Vec::new();

    for row in rows {
        let amount = u32::try_from(row.amount).map_err(|_| {
            tracing::error!(
                recipe_id = row.recipe_id,
                amount = row.amount,
                "Stored ingredient amount is negative"
            );
            AppError::internal(
                "Invalid stored ingredient amount",
                json!({ "recipe_id": row.recipe_id }),
            )
        })?;
        let line = CartLine::new(row.ingredient_name, row.measurement_unit, amount);

        match recipes.last_mut() {
            Some(last) if last.recipe_id == row.recipe_id => last.lines.push(line),
            _ => recipes.push(CartRecipe {
                recipe_id: row.recipe_id,
                lines: vec![line],
            }),
        }
    }

    Ok(recipes)
}

#[async_trait]
impl CollectionRepository for PgCollectionRepository {
    async fn add(
        &self,
        collection: Collection,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<bool, AppError> {
        let sql = format!(
            "INSERT INTO {} (user_id, recipe_id) VALUES ($1, $2) ON CONFLICT (user_id, recipe_id) DO NOTHING",
            collection.table()
        );

        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(recipe_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn remove(
        &self,
        collection: Collection,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<bool, AppError> {
        let sql = format!(
            "DELETE FROM {} WHERE user_id = $1 AND recipe_id = $2",
            collection.table()
        );

        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(recipe_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn contained(
        &self,
        collection: Collection,
        user_id: i64,
        recipe_ids: Vec<i64>,
    ) -> Result<Vec<i64>, AppError> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT recipe_id FROM {} WHERE user_id = $1 AND recipe_id = ANY($2)",
            collection.table()
        );

        let ids: Vec<i64> = sqlx::query_scalar(&sql)
            .bind(user_id)
            .bind(&recipe_ids)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(ids)
    }

    async fn cart_contents(&self, user_id: i64) -> Result<Vec<CartRecipe>, AppError> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r#"
            SELECT c.recipe_id, i.name AS ingredient_name, i.measurement_unit, ri.amount
            FROM shopping_cart c
            JOIN recipe_ingredients ri ON ri.recipe_id = c.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE c.user_id = $1
            ORDER BY c.id, ri.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        group_cart_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(recipe_id: i64, name: &str, amount: i32) -> CartLineRow {
        CartLineRow {
            recipe_id,
            ingredient_name: name.to_string(),
            measurement_unit: "g".to_string(),
            amount,
        }
    }

    #[test]
    fn test_group_cart_rows_keeps_recipe_order() {
        let grouped = group_cart_rows(vec![
            row(7, "Salt", 10),
            row(7, "Sugar", 3),
            row(2, "Salt", 5),
        ])
        .unwrap();

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].recipe_id, 7);
        assert_eq!(grouped[0].lines.len(), 2);
        assert_eq!(grouped[1].recipe_id, 2);
        assert_eq!(grouped[1].lines, vec![CartLine::new("Salt", "g", 5)]);
    }

    #[test]
    fn test_group_cart_rows_empty() {
        assert!(group_cart_rows(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_group_cart_rows_rejects_negative_amount() {
        let result = group_cart_rows(vec![row(7, "Salt", 10), row(7, "Sugar", -3)]);

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
