mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

#[sqlx::test]
async fn test_add_and_remove_favorite(pool: PgPool) {
    let author = common::create_user(&pool, "author").await;
    let (_, token) = common::create_authenticated_user(&pool, "fan").await;
    let id = common::create_recipe(&pool, author, "Brownies", &[], &[]).await;
    let server = common::create_test_server(pool);
    let path = format!("/api/recipes/{id}/favorite");

    let response = server.post(&path).authorization_bearer(&token).await;
    response.assert_status(StatusCode::CREATED);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["id"], id);
    assert_eq!(json["name"], "Brownies");
    assert_eq!(json["cooking_time"], 15);

    server
        .post(&path)
        .authorization_bearer(&token)
        .await
        .assert_status_bad_request();

    let recipe = server
        .get(&format!("/api/recipes/{id}"))
        .authorization_bearer(&token)
        .await
        .json::<serde_json::Value>();
    assert_eq!(recipe["is_favorited"], true);

    server
        .delete(&path)
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .delete(&path)
        .authorization_bearer(&token)
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_favorite_missing_recipe(pool: PgPool) {
    let (_, token) = common::create_authenticated_user(&pool, "fan").await;
    let server = common::create_test_server(pool);

    server
        .post("/api/recipes/777/favorite")
        .authorization_bearer(&token)
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_cart_requires_authentication(pool: PgPool) {
    let author = common::create_user(&pool, "author").await;
    let id = common::create_recipe(&pool, author, "Bread", &[], &[]).await;
    let server = common::create_test_server(pool);

    server
        .post(&format!("/api/recipes/{id}/shopping_cart"))
        .await
        .assert_status_unauthorized();
    server
        .get("/api/recipes/download_shopping_cart")
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_add_to_cart_marks_recipe(pool: PgPool) {
    let author = common::create_user(&pool, "author").await;
    let (_, token) = common::create_authenticated_user(&pool, "shopper").await;
    let id = common::create_recipe(&pool, author, "Bread", &[], &[]).await;
    let server = common::create_test_server(pool);

    server
        .post(&format!("/api/recipes/{id}/shopping_cart"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::CREATED);

    let recipe = server
        .get(&format!("/api/recipes/{id}"))
        .authorization_bearer(&token)
        .await
        .json::<serde_json::Value>();
    assert_eq!(recipe["is_in_shopping_cart"], true);
    assert_eq!(recipe["is_favorited"], false);
}

#[sqlx::test]
async fn test_download_aggregates_cart(pool: PgPool) {
    let author = common::create_user(&pool, "author").await;
    let (shopper, token) = common::create_authenticated_user(&pool, "shopper").await;
    let salt = common::create_ingredient(&pool, "Salt", "g").await;
    let sugar = common::create_ingredient(&pool, "Sugar", "g").await;
    let milk_ml = common::create_ingredient(&pool, "Milk", "ml").await;
    let milk_l = common::create_ingredient(&pool, "Milk", "l").await;

    let first = common::create_recipe(&pool, author, "First", &[], &[(salt, 10), (milk_ml, 200)]).await;
    let second =
        common::create_recipe(&pool, author, "Second", &[], &[(salt, 5), (sugar, 3), (milk_l, 1)]).await;
    common::add_to_cart(&pool, shopper, first).await;
    common::add_to_cart(&pool, shopper, second).await;
    let server = common::create_test_server(pool);

    let response = server
        .get("/api/recipes/download_shopping_cart")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"shopping-list.txt\""
    );
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );

    let text = response.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Shopping list",
            "Milk (l) - 1",
            "Milk (ml) - 200",
            "Salt (g) - 15",
            "Sugar (g) - 3",
        ]
    );
}

#[sqlx::test]
async fn test_download_empty_cart(pool: PgPool) {
    let (_, token) = common::create_authenticated_user(&pool, "shopper").await;
    let server = common::create_test_server(pool);

    let response = server
        .get("/api/recipes/download_shopping_cart")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("Your shopping cart is empty."));
}

#[sqlx::test]
async fn test_download_ignores_other_users_cart(pool: PgPool) {
    let author = common::create_user(&pool, "author").await;
    let (_, token) = common::create_authenticated_user(&pool, "shopper").await;
    let other = common::create_user(&pool, "other").await;
    let flour = common::create_ingredient(&pool, "Flour", "g").await;
    let id = common::create_recipe(&pool, author, "Bread", &[], &[(flour, 500)]).await;
    common::add_to_cart(&pool, other, id).await;
    let server = common::create_test_server(pool);

    let text = server
        .get("/api/recipes/download_shopping_cart")
        .authorization_bearer(&token)
        .await
        .text();

    assert!(!text.contains("Flour"));
}
