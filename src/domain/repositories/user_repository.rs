//! Repository trait for users and author subscriptions.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or username is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by email (exact match).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Lists users ordered by username.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError>;

    /// Counts all users.
    async fn count(&self) -> Result<i64, AppError>;

    /// Replaces the avatar of a user. `None` removes it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    async fn set_avatar(&self, id: i64, avatar: Option<String>) -> Result<User, AppError>;
}

/// Repository interface for author subscriptions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Subscribes `user_id` to `author_id`.
    ///
    /// Returns `Ok(false)` if the subscription already existed.
    async fn create(&self, user_id: i64, author_id: i64) -> Result<bool, AppError>;

    /// Removes a subscription.
    ///
    /// Returns `Ok(false)` if there was nothing to remove.
    async fn delete(&self, user_id: i64, author_id: i64) -> Result<bool, AppError>;

    /// Returns the subset of `author_ids` that `user_id` is subscribed to.
    async fn subscribed_among(
        &self,
        user_id: i64,
        author_ids: Vec<i64>,
    ) -> Result<Vec<i64>, AppError>;

    /// Lists the authors `user_id` is subscribed to, ordered by username.
    async fn list_authors(&self, user_id: i64, offset: i64, limit: i64)
    -> Result<Vec<User>, AppError>;

    /// Counts the authors `user_id` is subscribed to.
    async fn count_authors(&self, user_id: i64) -> Result<i64, AppError>;
}
