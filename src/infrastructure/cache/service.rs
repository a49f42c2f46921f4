//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching short link resolutions.
///
/// Maps a short code to the recipe id it resolved to. The codec can always
/// recompute this, so the cache only saves the existence check against the
/// database. Failures must degrade to a miss.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached recipe id for a short code.
    ///
    /// `None` on a miss or a backend error.
    async fn get_recipe_id(&self, code: &str) -> Option<i64>;

    /// Remembers that `code` resolves to an existing recipe.
    ///
    /// `ttl_seconds` falls back to the implementation default when `None`.
    async fn set_recipe_id(&self, code: &str, recipe_id: i64, ttl_seconds: Option<u64>);

    /// Forgets a short code, e.g. after its recipe was deleted.
    async fn invalidate(&self, code: &str);

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
