mod common;

use axum::http::StatusCode;
use recipe_share::domain::short_link::ShortLinkCodec;
use sqlx::PgPool;

async fn seed_recipe(pool: &PgPool) -> i64 {
    let author = common::create_user(pool, "author").await;
    common::create_recipe(pool, author, "Pancakes", &[], &[]).await
}

#[sqlx::test]
async fn test_get_link_returns_absolute_short_link(pool: PgPool) {
    let id = seed_recipe(&pool).await;
    let server = common::create_test_server(pool);

    let response = server.get(&format!("/api/recipes/{id}/get-link")).await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let expected = format!(
        "{}/s/{}",
        common::BASE_URL,
        ShortLinkCodec::default().encode(id as u64)
    );
    assert_eq!(json["short-link"], expected);
}

#[sqlx::test]
async fn test_get_link_for_missing_recipe(pool: PgPool) {
    let server = common::create_test_server(pool);

    let response = server.get("/api/recipes/999999/get-link").await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_short_link_redirects_to_recipe_page(pool: PgPool) {
    let id = seed_recipe(&pool).await;
    let code = ShortLinkCodec::default().encode(id as u64);
    let server = common::create_test_server(pool);

    let response = server.get(&format!("/s/{code}")).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        format!("/recipes/{id}")
    );
}

#[sqlx::test]
async fn test_issued_link_resolves_back(pool: PgPool) {
    let id = seed_recipe(&pool).await;
    let server = common::create_test_server(pool);

    let link = server
        .get(&format!("/api/recipes/{id}/get-link"))
        .await
        .json::<serde_json::Value>()["short-link"]
        .as_str()
        .unwrap()
        .to_string();
    let path = link.strip_prefix(common::BASE_URL).unwrap();

    let response = server.get(path).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        format!("/recipes/{id}")
    );
}

#[sqlx::test]
async fn test_short_link_with_invalid_character(pool: PgPool) {
    let server = common::create_test_server(pool);

    let response = server.get("/s/ab-c").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[sqlx::test]
async fn test_short_link_to_missing_recipe(pool: PgPool) {
    let server = common::create_test_server(pool);
    let code = ShortLinkCodec::default().encode(424242);

    let response = server.get(&format!("/s/{code}")).await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_short_link_overflowing_code(pool: PgPool) {
    let server = common::create_test_server(pool);
    let codec = ShortLinkCodec::default();

    // Decodes to a u64 above i64::MAX, then past u64::MAX.
    let too_big_for_id = codec.encode(u64::MAX);
    let overflow = format!("{too_big_for_id}0");

    server
        .get(&format!("/s/{too_big_for_id}"))
        .await
        .assert_status_not_found();
    server
        .get(&format!("/s/{overflow}"))
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_short_link_after_recipe_deleted(pool: PgPool) {
    let (author, token) = common::create_authenticated_user(&pool, "owner").await;
    let id = common::create_recipe(&pool, author, "Soup", &[], &[]).await;
    let code = ShortLinkCodec::default().encode(id as u64);
    let server = common::create_test_server(pool);

    server
        .get(&format!("/s/{code}"))
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);

    server
        .delete(&format!("/api/recipes/{id}"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/s/{code}"))
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_recipe_page_renders_html(pool: PgPool) {
    let author = common::create_user(&pool, "chef").await;
    let salt = common::create_ingredient(&pool, "Salt", "g").await;
    let id = common::create_recipe(&pool, author, "Tomato <Soup>", &[], &[(salt, 5)]).await;
    let server = common::create_test_server(pool);

    let response = server.get(&format!("/recipes/{id}")).await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Tomato &lt;Soup&gt;") || html.contains("Tomato &#60;Soup&#62;"));
    assert!(html.contains("Salt, 5 g"));
    assert!(html.contains("Test Cook"));
}

#[sqlx::test]
async fn test_recipe_page_missing(pool: PgPool) {
    let server = common::create_test_server(pool);

    server.get("/recipes/31337").await.assert_status_not_found();
}
