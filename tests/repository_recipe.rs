mod common;

use recipe_share::domain::entities::{IngredientLineInput, NewRecipe, RecipeFilter, RecipePatch};
use recipe_share::domain::repositories::RecipeRepository;
use recipe_share::infrastructure::persistence::PgRecipeRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_recipe(author_id: i64, tag_ids: Vec<i64>, ingredients: Vec<(i64, i32)>) -> NewRecipe {
    NewRecipe {
        author_id,
        name: "Shakshuka".to_string(),
        image: None,
        text: "Simmer tomatoes, crack eggs.".to_string(),
        cooking_time: 25,
        tag_ids,
        ingredients: ingredients
            .into_iter()
            .map(|(ingredient_id, amount)| IngredientLineInput {
                ingredient_id,
                amount,
            })
            .collect(),
    }
}

#[sqlx::test]
async fn test_create_and_load_recipe(pool: PgPool) {
    let author = common::create_user(&pool, "chef").await;
    let tag = common::create_tag(&pool, "Breakfast", "breakfast").await;
    let eggs = common::create_ingredient(&pool, "Eggs", "pcs").await;
    let tomato = common::create_ingredient(&pool, "Tomato", "g").await;
    let repo = PgRecipeRepository::new(Arc::new(pool));

    let id = repo
        .create(new_recipe(author, vec![tag], vec![(eggs, 3), (tomato, 400)]))
        .await
        .unwrap();

    let recipe = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(recipe.name, "Shakshuka");
    assert_eq!(recipe.author.username, "chef");
    assert_eq!(recipe.tags.len(), 1);
    assert_eq!(recipe.tags[0].slug, "breakfast");
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.ingredients[0].name, "Eggs");
    assert_eq!(recipe.ingredients[0].amount, 3);
    assert_eq!(recipe.ingredients[1].measurement_unit, "g");
}

#[sqlx::test]
async fn test_create_with_unknown_ingredient_rolls_back(pool: PgPool) {
    let author = common::create_user(&pool, "chef").await;
    let repo = PgRecipeRepository::new(Arc::new(pool.clone()));

    let result = repo.create(new_recipe(author, vec![], vec![(999_999, 1)])).await;

    assert!(result.is_err());
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test]
async fn test_update_replaces_tags_and_ingredients(pool: PgPool) {
    let author = common::create_user(&pool, "chef").await;
    let lunch = common::create_tag(&pool, "Lunch", "lunch").await;
    let dinner = common::create_tag(&pool, "Dinner", "dinner").await;
    let rice = common::create_ingredient(&pool, "Rice", "g").await;
    let beans = common::create_ingredient(&pool, "Beans", "g").await;
    let id = common::create_recipe(&pool, author, "Rice", &[lunch], &[(rice, 100)]).await;
    let repo = PgRecipeRepository::new(Arc::new(pool));

    repo.update(
        id,
        RecipePatch {
            name: Some("Rice and beans".to_string()),
            image: None,
            text: None,
            cooking_time: None,
            tag_ids: vec![dinner],
            ingredients: vec![IngredientLineInput {
                ingredient_id: beans,
                amount: 200,
            }],
        },
    )
    .await
    .unwrap();

    let recipe = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(recipe.name, "Rice and beans");
    assert_eq!(recipe.text, "Mix and serve.");
    assert_eq!(recipe.cooking_time, 15);
    assert_eq!(recipe.tags.len(), 1);
    assert_eq!(recipe.tags[0].slug, "dinner");
    assert_eq!(recipe.ingredients.len(), 1);
    assert_eq!(recipe.ingredients[0].name, "Beans");
}

#[sqlx::test]
async fn test_update_missing_recipe(pool: PgPool) {
    let repo = PgRecipeRepository::new(Arc::new(pool));

    let result = repo
        .update(
            12345,
            RecipePatch {
                name: None,
                image: None,
                text: None,
                cooking_time: None,
                tag_ids: vec![],
                ingredients: vec![],
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(recipe_share::AppError::NotFound { .. })
    ));
}

#[sqlx::test]
async fn test_filters(pool: PgPool) {
    let alice = common::create_user(&pool, "alice").await;
    let bob = common::create_user(&pool, "bob").await;
    let sweet = common::create_tag(&pool, "Sweet", "sweet").await;
    let savory = common::create_tag(&pool, "Savory", "savory").await;
    let cake = common::create_recipe(&pool, alice, "Cake", &[sweet], &[]).await;
    common::create_recipe(&pool, alice, "Pie", &[savory], &[]).await;
    let tart = common::create_recipe(&pool, bob, "Tart", &[sweet, savory], &[]).await;
    common::add_to_favorites(&pool, bob, cake).await;
    common::add_to_cart(&pool, alice, tart).await;
    let repo = PgRecipeRepository::new(Arc::new(pool));

    let all = RecipeFilter::default();
    assert_eq!(repo.count(all.clone()).await.unwrap(), 3);
    assert_eq!(repo.list(all, 0, 2).await.unwrap().len(), 2);

    let by_author = RecipeFilter {
        author_id: Some(alice),
        ..Default::default()
    };
    assert_eq!(repo.count(by_author).await.unwrap(), 2);

    let sweet_only = RecipeFilter {
        tags: vec!["sweet".to_string()],
        ..Default::default()
    };
    assert_eq!(repo.count(sweet_only).await.unwrap(), 2);

    let sweet_by_bob = RecipeFilter {
        author_id: Some(bob),
        tags: vec!["sweet".to_string()],
        ..Default::default()
    };
    let found = repo.list(sweet_by_bob, 0, 10).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, tart);

    let favorited = RecipeFilter {
        favorited_by: Some(bob),
        ..Default::default()
    };
    let found = repo.list(favorited, 0, 10).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, cake);

    let in_cart = RecipeFilter {
        in_cart_of: Some(alice),
        ..Default::default()
    };
    assert_eq!(repo.count(in_cart).await.unwrap(), 1);
}

#[sqlx::test]
async fn test_briefs_and_counts_by_author(pool: PgPool) {
    let alice = common::create_user(&pool, "alice").await;
    let bob = common::create_user(&pool, "bob").await;
    let carol = common::create_user(&pool, "carol").await;
    for name in ["One", "Two", "Three"] {
        common::create_recipe(&pool, alice, name, &[], &[]).await;
    }
    common::create_recipe(&pool, bob, "Solo", &[], &[]).await;
    let repo = PgRecipeRepository::new(Arc::new(pool));

    assert_eq!(
        repo.list_briefs_by_author(alice, Some(2))
            .await
            .unwrap()
            .len(),
        2
    );
    assert_eq!(repo.list_briefs_by_author(alice, None).await.unwrap().len(), 3);

    let mut counts = repo
        .count_by_authors(vec![alice, bob, carol])
        .await
        .unwrap();
    counts.sort();
    assert_eq!(counts, vec![(alice, 3), (bob, 1)]);
}

#[sqlx::test]
async fn test_delete_and_exists(pool: PgPool) {
    let author = common::create_user(&pool, "chef").await;
    let id = common::create_recipe(&pool, author, "Gone", &[], &[]).await;
    let repo = PgRecipeRepository::new(Arc::new(pool));

    assert!(repo.exists(id).await.unwrap());
    assert_eq!(repo.author_id(id).await.unwrap(), Some(author));

    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());
    assert!(!repo.exists(id).await.unwrap());
}
