#![allow(dead_code)]

use axum_test::TestServer;
use recipe_share::application::services::hash_token;
use recipe_share::domain::short_link::ShortLinkCodec;
use recipe_share::infrastructure::cache::NullCache;
use recipe_share::routes;
use recipe_share::state::{AppSettings, AppState};
use sqlx::PgPool;
use std::sync::Arc;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const BASE_URL: &str = "http://testserver";

pub async fn create_user(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (email, username, first_name, last_name) VALUES ($1, $2, 'Test', 'Cook') RETURNING id",
    )
    .bind(format!("{username}@example.com"))
    .bind(username)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Issues a token for `user_id` and returns its raw value.
pub async fn create_token(pool: &PgPool, user_id: i64) -> String {
    let raw = format!("token-for-user-{user_id}");

    sqlx::query("INSERT INTO api_tokens (user_id, name, token_hash) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(format!("test-{user_id}"))
        .bind(hash_token(SIGNING_SECRET, &raw))
        .execute(pool)
        .await
        .unwrap();

    raw
}

/// Creates a user with a token. Returns `(user_id, token)`.
pub async fn create_authenticated_user(pool: &PgPool, username: &str) -> (i64, String) {
    let id = create_user(pool, username).await;
    let token = create_token(pool, id).await;
    (id, token)
}

pub async fn create_tag(pool: &PgPool, name: &str, slug: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO tags (name, slug) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_ingredient(pool: &PgPool, name: &str, unit: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(unit)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_recipe(
    pool: &PgPool,
    author_id: i64,
    name: &str,
    tag_ids: &[i64],
    ingredients: &[(i64, i32)],
) -> i64 {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO recipes (author_id, name, text, cooking_time) VALUES ($1, $2, 'Mix and serve.', 15) RETURNING id",
    )
    .bind(author_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap();

    for tag_id in tag_ids {
        sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2)")
            .bind(id)
            .bind(tag_id)
            .execute(pool)
            .await
            .unwrap();
    }

    for (ingredient_id, amount) in ingredients {
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES ($1, $2, $3)",
        )
        .bind(id)
        .bind(ingredient_id)
        .bind(amount)
        .execute(pool)
        .await
        .unwrap();
    }

    id
}

pub async fn add_to_cart(pool: &PgPool, user_id: i64, recipe_id: i64) {
    sqlx::query("INSERT INTO shopping_cart (user_id, recipe_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn add_to_favorites(pool: &PgPool, user_id: i64, recipe_id: i64) {
    sqlx::query("INSERT INTO favorites (user_id, recipe_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await
        .unwrap();
}

pub fn test_settings() -> AppSettings {
    AppSettings {
        public_base_url: BASE_URL.to_string(),
        page_size: 6,
        token_signing_secret: SIGNING_SECRET.to_string(),
        codec: ShortLinkCodec::default(),
    }
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool), Arc::new(NullCache::new()), test_settings())
}

/// Full router without rate limiting.
pub fn create_test_server(pool: PgPool) -> TestServer {
    TestServer::new(routes::router(create_test_state(pool))).unwrap()
}
