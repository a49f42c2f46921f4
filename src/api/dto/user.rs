//! DTOs for user profiles, avatars and subscriptions.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::recipe::RecipeBriefResponse;
use crate::application::views::{AuthorView, AuthorWithRecipes};

/// Public user profile.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    pub avatar: Option<String>,
}

impl From<AuthorView> for UserResponse {
    fn from(view: AuthorView) -> Self {
        Self {
            id: view.user.id,
            email: view.user.email,
            username: view.user.username,
            first_name: view.user.first_name,
            last_name: view.user.last_name,
            is_subscribed: view.is_subscribed,
            avatar: view.user.avatar,
        }
    }
}

/// Author in the subscriptions list.
#[derive(Debug, Serialize)]
pub struct UserWithRecipesResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<RecipeBriefResponse>,
    pub recipes_count: i64,
}

impl From<AuthorWithRecipes> for UserWithRecipesResponse {
    fn from(item: AuthorWithRecipes) -> Self {
        Self {
            user: item.author.into(),
            recipes: item.recipes.into_iter().map(Into::into).collect(),
            recipes_count: item.recipes_count,
        }
    }
}

/// `PUT /api/users/me/avatar` body.
#[derive(Debug, Deserialize, Validate)]
pub struct AvatarRequest {
    #[validate(length(min = 1, max = 2048))]
    pub avatar: String,
}

#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub avatar: Option<String>,
}

/// Query for endpoints returning authors with a recipe preview.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub recipes_limit: Option<u32>,
}
