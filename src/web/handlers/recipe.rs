//! Public recipe page, the landing target of short links.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};

use crate::domain::entities::Recipe;
use crate::error::AppError;
use crate::state::AppState;

/// Template for a single recipe.
///
/// Renders `templates/recipe.html` with the author, tags, ingredient
/// lines, cooking time and instructions.
#[derive(Template, WebTemplate)]
#[template(path = "recipe.html")]
pub struct RecipePageTemplate {
    pub recipe: Recipe,
    pub author_name: String,
}

/// Renders a recipe as HTML.
///
/// # Endpoint
///
/// `GET /recipes/{id}`
///
/// Short links (`/s/{code}`) redirect here.
///
/// # Errors
///
/// Returns 404 if the recipe does not exist.
pub async fn recipe_page_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<RecipePageTemplate, AppError> {
    let view = state.recipe_service.get(None, id).await?;
    let author_name = view.recipe.author.display_name();

    Ok(RecipePageTemplate {
        recipe: view.recipe,
        author_name,
    })
}
