//! Authentication service for API token validation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Hashes a raw token with HMAC-SHA256 keyed by the server signing secret.
///
/// Returns a 64-character lowercase hex-encoded MAC. The admin CLI uses the
/// same function when issuing tokens, so both sides must share
/// `TOKEN_SIGNING_SECRET`.
pub fn hash_token(secret: &str, token: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Service for authenticating API requests via Bearer tokens.
///
/// Only token hashes are stored. An attacker with read-only access to the
/// database cannot verify or forge tokens without the server-side secret.
pub struct AuthService<T: TokenRepository, U: UserRepository> {
    tokens: Arc<T>,
    users: Arc<U>,
    signing_secret: String,
}

impl<T: TokenRepository, U: UserRepository> AuthService<T, U> {
    /// Creates a new authentication service.
    ///
    /// `signing_secret` must match the value used when tokens were created.
    pub fn new(tokens: Arc<T>, users: Arc<U>, signing_secret: String) -> Self {
        Self {
            tokens,
            users,
            signing_secret,
        }
    }

    /// Resolves a raw token to the user who owns it.
    ///
    /// On success, updates the token's `last_used_at`; a failure to do so is
    /// logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked,
    /// or its owner no longer exists.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let user_id = self
            .tokens
            .find_user_id(&token_hash)
            .await?
            .ok_or_else(invalid_token)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(invalid_token)?;

        if let Err(e) = self.tokens.update_last_used(&token_hash).await {
            tracing::warn!(user_id, error = %e, "Failed to update token last_used_at");
        }

        Ok(user)
    }
}

fn invalid_token() -> AppError {
    AppError::unauthorized(
        "Unauthorized",
        json!({ "reason": "Invalid or revoked token" }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockTokenRepository, MockUserRepository};
    use chrono::Utc;

    const SECRET: &str = "test-signing-secret";

    fn test_user(id: i64) -> User {
        User {
            id,
            email: "cook@example.com".to_string(),
            username: "cook".to_string(),
            first_name: "Julia".to_string(),
            last_name: "Child".to_string(),
            avatar: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut tokens = MockTokenRepository::new();
        let mut users = MockUserRepository::new();

        let expected_hash = hash_token(SECRET, "valid-token");
        let lookup_hash = expected_hash.clone();

        tokens
            .expect_find_user_id()
            .withf(move |hash| hash == lookup_hash)
            .times(1)
            .returning(|_| Ok(Some(42)));
        tokens
            .expect_update_last_used()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(()));
        users
            .expect_find_by_id()
            .withf(|id| *id == 42)
            .returning(|id| Ok(Some(test_user(id))));

        let service = AuthService::new(Arc::new(tokens), Arc::new(users), SECRET.to_string());

        let user = service.authenticate("valid-token").await.unwrap();
        assert_eq!(user.id, 42);
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_find_user_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(
            Arc::new(tokens),
            Arc::new(MockUserRepository::new()),
            SECRET.to_string(),
        );

        let result = service.authenticate("invalid-token").await;
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_owner_deleted() {
        let mut tokens = MockTokenRepository::new();
        let mut users = MockUserRepository::new();
        tokens.expect_find_user_id().returning(|_| Ok(Some(7)));
        users.expect_find_by_id().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(tokens), Arc::new(users), SECRET.to_string());

        let result = service.authenticate("orphan").await;
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_last_used_failure_is_ignored() {
        let mut tokens = MockTokenRepository::new();
        let mut users = MockUserRepository::new();
        tokens.expect_find_user_id().returning(|_| Ok(Some(1)));
        tokens
            .expect_update_last_used()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        users.expect_find_by_id().returning(|id| Ok(Some(test_user(id))));

        let service = AuthService::new(Arc::new(tokens), Arc::new(users), SECRET.to_string());

        assert!(service.authenticate("token").await.is_ok());
    }

    #[test]
    fn test_hash_token_consistency() {
        let hash1 = hash_token(SECRET, "test-token");
        let hash2 = hash_token(SECRET, "test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
        assert_ne!(hash1, hash_token(SECRET, "other-token"));
    }

    #[test]
    fn test_hash_token_secret_matters() {
        assert_ne!(hash_token("secret-a", "token"), hash_token("secret-b", "token"));
    }
}
