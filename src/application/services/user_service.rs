//! User profiles, avatars and author subscriptions.

use regex::Regex;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};
use validator::ValidateEmail;

use crate::application::views::{AuthorView, AuthorWithRecipes};
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::{RecipeRepository, SubscriptionRepository, UserRepository};
use crate::error::AppError;

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("valid username regex"));

const USERNAME_MAX_LENGTH: usize = 150;

/// Service for user profiles and subscriptions between users.
pub struct UserService<U, S, R>
where
    U: UserRepository,
    S: SubscriptionRepository,
    R: RecipeRepository,
{
    users: Arc<U>,
    subscriptions: Arc<S>,
    recipes: Arc<R>,
}

impl<U, S, R> UserService<U, S, R>
where
    U: UserRepository,
    S: SubscriptionRepository,
    R: RecipeRepository,
{
    pub fn new(users: Arc<U>, subscriptions: Arc<S>, recipes: Arc<R>) -> Self {
        Self {
            users,
            subscriptions,
            recipes,
        }
    }

    /// Lists users with the viewer's subscription flag.
    pub async fn list_users(
        &self,
        viewer: Option<&User>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<AuthorView>, i64), AppError> {
        let users = self.users.list(offset, limit).await?;
        let total = self.users.count().await?;

        let subscribed = self
            .subscribed_set(viewer, users.iter().map(|u| u.id).collect())
            .await?;

        let views = users
            .into_iter()
            .map(|user| AuthorView {
                is_subscribed: subscribed.contains(&user.id),
                user,
            })
            .collect();

        Ok((views, total))
    }

    /// Fetches one user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn get_user(&self, viewer: Option<&User>, id: i64) -> Result<AuthorView, AppError> {
        let user = self.find_user(id).await?;
        let subscribed = self.subscribed_set(viewer, vec![id]).await?;

        Ok(AuthorView {
            is_subscribed: subscribed.contains(&id),
            user,
        })
    }

    /// The authenticated user's own profile. Nobody is subscribed to themself.
    pub fn me(&self, user: User) -> AuthorView {
        AuthorView {
            user,
            is_subscribed: false,
        }
    }

    /// Replaces the avatar of `user`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the avatar is blank.
    pub async fn set_avatar(&self, user: &User, avatar: String) -> Result<User, AppError> {
        let avatar = avatar.trim();
        if avatar.is_empty() {
            return Err(AppError::bad_request(
                "Avatar must not be empty",
                json!({ "field": "avatar" }),
            ));
        }

        self.users.set_avatar(user.id, Some(avatar.to_string())).await
    }

    /// Removes the avatar of `user`.
    pub async fn delete_avatar(&self, user: &User) -> Result<(), AppError> {
        self.users.set_avatar(user.id, None).await?;
        Ok(())
    }

    /// Subscribes `user` to `author_id`.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the author does not exist
    /// - [`AppError::Validation`] on self-subscription or if already subscribed
    pub async fn subscribe(
        &self,
        user: &User,
        author_id: i64,
        recipes_limit: Option<i64>,
    ) -> Result<AuthorWithRecipes, AppError> {
        let author = self.find_user(author_id).await?;

        if author.id == user.id {
            return Err(AppError::bad_request(
                "You cannot subscribe to yourself",
                json!({ "author_id": author_id }),
            ));
        }

        if !self.subscriptions.create(user.id, author_id).await? {
            return Err(AppError::bad_request(
                "Already subscribed to this author",
                json!({ "author_id": author_id }),
            ));
        }

        tracing::debug!(user_id = user.id, author_id, "Subscribed");

        let counts = self.recipe_counts(vec![author_id]).await?;
        let recipes = self
            .recipes
            .list_briefs_by_author(author_id, recipes_limit)
            .await?;

        Ok(AuthorWithRecipes {
            author: AuthorView {
                user: author,
                is_subscribed: true,
            },
            recipes,
            recipes_count: counts.get(&author_id).copied().unwrap_or(0),
        })
    }

    /// Removes the subscription of `user` to `author_id`.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the author does not exist
    /// - [`AppError::Validation`] if `user` was not subscribed
    pub async fn unsubscribe(&self, user: &User, author_id: i64) -> Result<(), AppError> {
        self.find_user(author_id).await?;

        if !self.subscriptions.delete(user.id, author_id).await? {
            return Err(AppError::bad_request(
                "Not subscribed to this author",
                json!({ "author_id": author_id }),
            ));
        }

        Ok(())
    }

    /// Lists the authors `user` is subscribed to, each with up to
    /// `recipes_limit` of their latest recipes.
    pub async fn subscriptions(
        &self,
        user: &User,
        offset: i64,
        limit: i64,
        recipes_limit: Option<i64>,
    ) -> Result<(Vec<AuthorWithRecipes>, i64), AppError> {
        let authors = self
            .subscriptions
            .list_authors(user.id, offset, limit)
            .await?;
        let total = self.subscriptions.count_authors(user.id).await?;

        let counts = self
            .recipe_counts(authors.iter().map(|a| a.id).collect())
            .await?;

        let mut results = Vec::with_capacity(authors.len());
        for author in authors {
            let recipes = self
                .recipes
                .list_briefs_by_author(author.id, recipes_limit)
                .await?;

            results.push(AuthorWithRecipes {
                recipes_count: counts.get(&author.id).copied().unwrap_or(0),
                author: AuthorView {
                    user: author,
                    is_subscribed: true,
                },
                recipes,
            });
        }

        Ok((results, total))
    }

    /// Creates a user account. Used by the admin CLI.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the email or username is malformed
    /// - [`AppError::Conflict`] if the email or username is taken
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        validate_new_user(&new_user)?;
        self.users.create(new_user).await
    }

    async fn find_user(&self, id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))
    }

    async fn subscribed_set(
        &self,
        viewer: Option<&User>,
        author_ids: Vec<i64>,
    ) -> Result<HashSet<i64>, AppError> {
        match viewer {
            Some(viewer) if !author_ids.is_empty() => Ok(self
                .subscriptions
                .subscribed_among(viewer.id, author_ids)
                .await?
                .into_iter()
                .collect()),
            _ => Ok(HashSet::new()),
        }
    }

    async fn recipe_counts(&self, author_ids: Vec<i64>) -> Result<HashMap<i64, i64>, AppError> {
        if author_ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(self
            .recipes
            .count_by_authors(author_ids)
            .await?
            .into_iter()
            .collect())
    }
}

fn validate_new_user(new_user: &NewUser) -> Result<(), AppError> {
    if !new_user.email.validate_email() {
        return Err(AppError::bad_request(
            "Invalid email address",
            json!({ "field": "email" }),
        ));
    }

    if new_user.username.is_empty()
        || new_user.username.chars().count() > USERNAME_MAX_LENGTH
        || !USERNAME_REGEX.is_match(&new_user.username)
    {
        return Err(AppError::bad_request(
            "Username may contain only letters, digits and @/./+/-/_",
            json!({ "field": "username" }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RecipeBrief;
    use crate::domain::repositories::{
        MockRecipeRepository, MockSubscriptionRepository, MockUserRepository,
    };
    use chrono::Utc;

    fn user(id: i64, username: &str) -> User {
        User {
            id,
            email: format!("{username}@example.com"),
            username: username.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            avatar: None,
            created_at: Utc::now(),
        }
    }

    fn brief(id: i64) -> RecipeBrief {
        RecipeBrief {
            id,
            name: format!("Recipe {id}"),
            image: None,
            cooking_time: 10,
        }
    }

    fn service(
        users: MockUserRepository,
        subscriptions: MockSubscriptionRepository,
        recipes: MockRecipeRepository,
    ) -> UserService<MockUserRepository, MockSubscriptionRepository, MockRecipeRepository> {
        UserService::new(Arc::new(users), Arc::new(subscriptions), Arc::new(recipes))
    }

    #[tokio::test]
    async fn test_self_subscription_rejected() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "me"))));

        let svc = service(
            users,
            MockSubscriptionRepository::new(),
            MockRecipeRepository::new(),
        );

        let result = svc.subscribe(&user(1, "me"), 1, None).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_subscribe_to_missing_author() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let svc = service(
            users,
            MockSubscriptionRepository::new(),
            MockRecipeRepository::new(),
        );

        let result = svc.subscribe(&user(1, "me"), 99, None).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_subscription_rejected() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "author"))));
        let mut subscriptions = MockSubscriptionRepository::new();
        subscriptions.expect_create().returning(|_, _| Ok(false));

        let svc = service(users, subscriptions, MockRecipeRepository::new());

        let result = svc.subscribe(&user(1, "me"), 2, None).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_subscribe_returns_author_with_recipes() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "author"))));
        let mut subscriptions = MockSubscriptionRepository::new();
        subscriptions.expect_create().returning(|_, _| Ok(true));
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_count_by_authors()
            .returning(|_| Ok(vec![(2, 5)]));
        recipes
            .expect_list_briefs_by_author()
            .withf(|author_id, limit| *author_id == 2 && *limit == Some(2))
            .returning(|_, _| Ok(vec![brief(10), brief(9)]));

        let svc = service(users, subscriptions, recipes);

        let result = svc.subscribe(&user(1, "me"), 2, Some(2)).await.unwrap();
        assert!(result.author.is_subscribed);
        assert_eq!(result.recipes.len(), 2);
        assert_eq!(result.recipes_count, 5);
    }

    #[tokio::test]
    async fn test_unsubscribe_when_not_subscribed() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "author"))));
        let mut subscriptions = MockSubscriptionRepository::new();
        subscriptions.expect_delete().returning(|_, _| Ok(false));

        let svc = service(users, subscriptions, MockRecipeRepository::new());

        let result = svc.unsubscribe(&user(1, "me"), 2).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_list_users_anonymous_has_no_subscriptions() {
        let mut users = MockUserRepository::new();
        users
            .expect_list()
            .returning(|_, _| Ok(vec![user(1, "a"), user(2, "b")]));
        users.expect_count().returning(|| Ok(2));

        let svc = service(
            users,
            MockSubscriptionRepository::new(),
            MockRecipeRepository::new(),
        );

        let (views, total) = svc.list_users(None, 0, 6).await.unwrap();
        assert_eq!(total, 2);
        assert!(views.iter().all(|v| !v.is_subscribed));
    }

    #[tokio::test]
    async fn test_list_users_marks_subscriptions() {
        let mut users = MockUserRepository::new();
        users
            .expect_list()
            .returning(|_, _| Ok(vec![user(2, "a"), user(3, "b")]));
        users.expect_count().returning(|| Ok(2));
        let mut subscriptions = MockSubscriptionRepository::new();
        subscriptions
            .expect_subscribed_among()
            .returning(|_, _| Ok(vec![3]));

        let svc = service(users, subscriptions, MockRecipeRepository::new());

        let viewer = user(1, "me");
        let (views, _) = svc.list_users(Some(&viewer), 0, 6).await.unwrap();
        assert!(!views[0].is_subscribed);
        assert!(views[1].is_subscribed);
    }

    #[tokio::test]
    async fn test_blank_avatar_rejected() {
        let svc = service(
            MockUserRepository::new(),
            MockSubscriptionRepository::new(),
            MockRecipeRepository::new(),
        );

        let result = svc.set_avatar(&user(1, "me"), "   ".to_string()).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_validate_new_user() {
        let ok = NewUser {
            email: "cook@example.com".to_string(),
            username: "cook.book+1".to_string(),
            first_name: "Julia".to_string(),
            last_name: "Child".to_string(),
        };
        assert!(validate_new_user(&ok).is_ok());

        let bad_username = NewUser {
            username: "bad name!".to_string(),
            ..ok.clone()
        };
        assert!(validate_new_user(&bad_username).is_err());

        let bad_email = NewUser {
            email: "not-an-email".to_string(),
            ..ok
        };
        assert!(validate_new_user(&bad_email).is_err());
    }
}
