//! DTOs for recipes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::api::dto::catalog::TagResponse;
use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::user::UserResponse;
use crate::application::views::{AuthorView, RecipeView};
use crate::domain::entities::{
    IngredientLine, IngredientLineInput, RecipeBrief, RecipeDraft, RecipePatch,
};

/// Ingredient line of a recipe in responses.
#[derive(Debug, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<IngredientLine> for RecipeIngredientResponse {
    fn from(line: IngredientLine) -> Self {
        Self {
            id: line.id,
            name: line.name,
            measurement_unit: line.measurement_unit,
            amount: line.amount,
        }
    }
}

/// Full recipe as seen by the requesting user.
#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: i32,
}

impl From<RecipeView> for RecipeResponse {
    fn from(view: RecipeView) -> Self {
        let recipe = view.recipe;
        Self {
            id: recipe.id,
            tags: recipe.tags.into_iter().map(Into::into).collect(),
            author: AuthorView {
                user: recipe.author,
                is_subscribed: view.author_subscribed,
            }
            .into(),
            ingredients: recipe.ingredients.into_iter().map(Into::into).collect(),
            is_favorited: view.is_favorited,
            is_in_shopping_cart: view.is_in_shopping_cart,
            name: recipe.name,
            image: recipe.image,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Short recipe card used by favorites, cart and subscriptions.
#[derive(Debug, Serialize)]
pub struct RecipeBriefResponse {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub cooking_time: i32,
}

impl From<RecipeBrief> for RecipeBriefResponse {
    fn from(brief: RecipeBrief) -> Self {
        Self {
            id: brief.id,
            name: brief.name,
            image: brief.image,
            cooking_time: brief.cooking_time,
        }
    }
}

/// `{ "id": 3, "amount": 200 }` in recipe bodies.
#[derive(Debug, Deserialize, Validate)]
pub struct IngredientAmountRequest {
    pub id: i64,

    #[validate(range(min = 1, max = 32000))]
    pub amount: i32,
}

impl From<&IngredientAmountRequest> for IngredientLineInput {
    fn from(item: &IngredientAmountRequest) -> Self {
        Self {
            ingredient_id: item.id,
            amount: item.amount,
        }
    }
}

/// `POST /api/recipes` body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecipeRequest {
    #[validate(nested)]
    pub ingredients: Vec<IngredientAmountRequest>,

    pub tags: Vec<i64>,

    pub image: Option<String>,

    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(min = 1))]
    pub text: String,

    #[validate(range(min = 1, max = 32000))]
    pub cooking_time: i32,
}

impl From<CreateRecipeRequest> for RecipeDraft {
    fn from(req: CreateRecipeRequest) -> Self {
        Self {
            ingredients: req.ingredients.iter().map(Into::into).collect(),
            name: req.name,
            image: req.image,
            text: req.text,
            cooking_time: req.cooking_time,
            tag_ids: req.tags,
        }
    }
}

/// `PATCH /api/recipes/{id}` body.
///
/// Scalar fields are optional; tags and ingredients are always replaced.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecipeRequest {
    #[validate(nested)]
    pub ingredients: Vec<IngredientAmountRequest>,

    pub tags: Vec<i64>,

    pub image: Option<String>,

    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    #[validate(length(min = 1))]
    pub text: Option<String>,

    #[validate(range(min = 1, max = 32000))]
    pub cooking_time: Option<i32>,
}

impl From<UpdateRecipeRequest> for RecipePatch {
    fn from(req: UpdateRecipeRequest) -> Self {
        Self {
            ingredients: req.ingredients.iter().map(Into::into).collect(),
            name: req.name,
            image: req.image,
            text: req.text,
            cooking_time: req.cooking_time,
            tag_ids: req.tags,
        }
    }
}

/// Scalar filters of `GET /api/recipes`.
///
/// The repeated `tags` parameter is read from the raw query string, since
/// `serde_urlencoded` cannot collect repeated keys.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub author: Option<i64>,

    #[serde(default, deserialize_with = "truthy")]
    pub is_favorited: bool,

    #[serde(default, deserialize_with = "truthy")]
    pub is_in_shopping_cart: bool,
}

/// Reads `1`/`true` as set; anything else as unset.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(matches!(
        value.as_deref().map(str::to_ascii_lowercase).as_deref(),
        Some("1" | "true")
    ))
}

/// Collects every `tags=` value of a query string.
pub fn tag_slugs(query: Option<&str>) -> Vec<String> {
    query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .filter(|(key, value)| key == "tags" && !value.is_empty())
                .map(|(_, value)| value.into_owned())
                .collect()
        })
        .unwrap_or_default()
}

/// `GET /api/recipes/{id}/get-link` response.
#[derive(Debug, Serialize)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_slugs_collects_repeated_keys() {
        assert_eq!(
            tag_slugs(Some("tags=breakfast&page=2&tags=lunch&tags=")),
            vec!["breakfast", "lunch"]
        );
        assert!(tag_slugs(None).is_empty());
    }

    #[test]
    fn test_truthy_flags() {
        let p: RecipeListParams =
            serde_json::from_str(r#"{"is_favorited": "1", "is_in_shopping_cart": "no"}"#).unwrap();
        assert!(p.is_favorited);
        assert!(!p.is_in_shopping_cart);

        let p: RecipeListParams = serde_json::from_str(r#"{"is_favorited": "TRUE"}"#).unwrap();
        assert!(p.is_favorited);
    }

    #[test]
    fn test_create_request_validation() {
        let req: CreateRecipeRequest = serde_json::from_str(
            r#"{"ingredients": [{"id": 1, "amount": 0}], "tags": [1], "name": "Tea", "text": "Brew.", "cooking_time": 5}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());

        let req: CreateRecipeRequest = serde_json::from_str(
            r#"{"ingredients": [{"id": 1, "amount": 1}], "tags": [1], "name": "", "text": "Brew.", "cooking_time": 5}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());

        let req: CreateRecipeRequest = serde_json::from_str(
            r#"{"ingredients": [{"id": 1, "amount": 1}], "tags": [1], "name": "Tea", "text": "Brew.", "cooking_time": 5}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_short_link_key_has_dash() {
        let json = serde_json::to_value(ShortLinkResponse {
            short_link: "http://host/s/21".to_string(),
        })
        .unwrap();
        assert_eq!(json["short-link"], "http://host/s/21");
    }
}
