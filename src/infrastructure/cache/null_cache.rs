//! No-op cache implementation for testing or disabled caching.

use super::service::CacheService;
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that never stores anything.
///
/// Used when Redis is not configured, when the connection fails at startup,
/// and in tests.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_recipe_id(&self, _code: &str) -> Option<i64> {
        None
    }

    async fn set_recipe_id(&self, _code: &str, _recipe_id: i64, _ttl_seconds: Option<u64>) {}

    async fn invalidate(&self, _code: &str) {}

    async fn health_check(&self) -> bool {
        true
    }
}
