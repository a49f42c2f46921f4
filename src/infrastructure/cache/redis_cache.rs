//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

/// Redis cache for short link resolutions.
///
/// Keys are `short:{code}`, values are recipe ids. All operations are
/// fail-open: errors are logged and reported as misses.
pub struct RedisCache {
    conn: ConnectionManager,
    default_ttl: u64,
}

const KEY_PREFIX: &str = "short:";

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// `default_ttl_seconds` comes from `CACHE_TTL_SECONDS`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            conn: manager,
            default_ttl: default_ttl_seconds,
        })
    }

    fn key(code: &str) -> String {
        format!("{KEY_PREFIX}{code}")
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_recipe_id(&self, code: &str) -> Option<i64> {
        let mut conn = self.conn.clone();

        match conn.get::<_, Option<i64>>(Self::key(code)).await {
            Ok(Some(id)) => {
                debug!(code, recipe_id = id, "Cache HIT");
                Some(id)
            }
            Ok(None) => {
                debug!(code, "Cache MISS");
                None
            }
            Err(e) => {
                warn!(code, error = %e, "Redis GET failed");
                None
            }
        }
    }

    async fn set_recipe_id(&self, code: &str, recipe_id: i64, ttl_seconds: Option<u64>) {
        let mut conn = self.conn.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        if let Err(e) = conn.set_ex::<_, _, ()>(Self::key(code), recipe_id, ttl).await {
            warn!(code, error = %e, "Redis SET failed");
        }
    }

    async fn invalidate(&self, code: &str) {
        let mut conn = self.conn.clone();

        match conn.del::<_, i32>(Self::key(code)).await {
            Ok(deleted) if deleted > 0 => debug!(code, "Cache INVALIDATE"),
            Ok(_) => {}
            Err(e) => warn!(code, error = %e, "Redis DEL failed"),
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}
