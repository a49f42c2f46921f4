//! API route configuration.
//!
//! Every route runs behind [`crate::api::middleware::auth::layer`], which
//! identifies the caller when a Bearer token is sent. Whether a route
//! requires a caller is decided by the handler's extractor.

use crate::api::handlers::{
    add_to_cart_handler, add_to_favorites_handler, create_recipe_handler, delete_avatar_handler,
    delete_recipe_handler, download_shopping_cart_handler, get_link_handler, get_recipe_handler,
    get_user_handler, ingredient_handler, ingredients_handler, list_recipes_handler,
    list_users_handler, me_handler, remove_from_cart_handler, remove_from_favorites_handler,
    set_avatar_handler, subscribe_handler, subscriptions_handler, tag_handler, tags_handler,
    unsubscribe_handler, update_recipe_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// All API routes.
///
/// # Endpoints
///
/// - `GET    /users`                           - List users (paginated)
/// - `GET    /users/me`                        - Current user
/// - `PUT    /users/me/avatar`                 - Set avatar
/// - `DELETE /users/me/avatar`                 - Remove avatar
/// - `GET    /users/subscriptions`             - Followed authors with recipes
/// - `GET    /users/{id}`                      - User profile
/// - `POST   /users/{id}/subscribe`            - Follow an author
/// - `DELETE /users/{id}/subscribe`            - Unfollow an author
/// - `GET    /tags`, `/tags/{id}`              - Tags
/// - `GET    /ingredients`, `/ingredients/{id}` - Ingredients, `?name=` prefix search
/// - `GET    /recipes`                         - List recipes (paginated, filtered)
/// - `POST   /recipes`                         - Publish a recipe
/// - `GET    /recipes/download_shopping_cart`  - Shopping list document
/// - `GET    /recipes/{id}`                    - Recipe
/// - `PATCH  /recipes/{id}`                    - Update (author only)
/// - `DELETE /recipes/{id}`                    - Delete (author only)
/// - `GET    /recipes/{id}/get-link`           - Short link
/// - `POST   /recipes/{id}/favorite`           - Add to favorites
/// - `DELETE /recipes/{id}/favorite`           - Remove from favorites
/// - `POST   /recipes/{id}/shopping_cart`      - Add to cart
/// - `DELETE /recipes/{id}/shopping_cart`      - Remove from cart
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users_handler))
        .route("/users/me", get(me_handler))
        .route(
            "/users/me/avatar",
            put(set_avatar_handler).delete(delete_avatar_handler),
        )
        .route("/users/subscriptions", get(subscriptions_handler))
        .route("/users/{id}", get(get_user_handler))
        .route(
            "/users/{id}/subscribe",
            post(subscribe_handler).delete(unsubscribe_handler),
        )
        .route("/tags", get(tags_handler))
        .route("/tags/{id}", get(tag_handler))
        .route("/ingredients", get(ingredients_handler))
        .route("/ingredients/{id}", get(ingredient_handler))
        .route(
            "/recipes",
            get(list_recipes_handler).post(create_recipe_handler),
        )
        .route(
            "/recipes/download_shopping_cart",
            get(download_shopping_cart_handler),
        )
        .route(
            "/recipes/{id}",
            get(get_recipe_handler)
                .patch(update_recipe_handler)
                .delete(delete_recipe_handler),
        )
        .route("/recipes/{id}/get-link", get(get_link_handler))
        .route(
            "/recipes/{id}/favorite",
            post(add_to_favorites_handler).delete(remove_from_favorites_handler),
        )
        .route(
            "/recipes/{id}/shopping_cart",
            post(add_to_cart_handler).delete(remove_from_cart_handler),
        )
}
