//! Redis-backed `HashCache`.
//!
//! Uses a `ConnectionManager`, which reconnects transparently; the handle is
//! cheap to clone and every call works on its own clone.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, ErrorKind};
use tracing::info;

use crate::cache::HashCache;
use crate::error::{CacheError, CacheResult};

/// Cache client for a Redis server.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connects to the Redis server at `url` (e.g. `redis://127.0.0.1/`).
    pub async fn connect(url: &str) -> CacheResult<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        info!("Connected to Redis cache at {}", url);
        Ok(Self { conn })
    }
}

#[async_trait]
impl HashCache for RedisCache {
    async fn hash_get_all(&self, key: &str) -> CacheResult<HashMap<String, String>> {
        let mut conn = self.conn.clone();
        conn.hgetall(key).await.map_err(map_redis_error)
    }

    async fn hash_set(&self, key: &str, fields: HashMap<String, String>) -> CacheResult<()> {
        // HSET with no field/value pairs is a protocol error
        if fields.is_empty() {
            return Ok(());
        }
        let items: Vec<(String, String)> = fields.into_iter().collect();
        let mut conn = self.conn.clone();
        let _: () = conn
            .hset_multiple(key, items.as_slice())
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn keys_matching(&self, pattern: &str) -> CacheResult<Vec<String>> {
        let mut conn = self.conn.clone();
        conn.keys(pattern).await.map_err(map_redis_error)
    }
}

fn map_redis_error(err: redis::RedisError) -> CacheError {
    let unreachable = err.is_io_error()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_timeout()
        || matches!(
            err.kind(),
            ErrorKind::AuthenticationFailed | ErrorKind::InvalidClientConfig
        );
    if unreachable {
        CacheError::Connection(err.to_string())
    } else {
        CacheError::Command(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis::RedisError;

    #[test]
    fn test_io_failure_is_connection_error() {
        let err = RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        ));
        assert!(matches!(map_redis_error(err), CacheError::Connection(_)));
    }

    #[test]
    fn test_auth_failure_is_connection_error() {
        let err = RedisError::from((ErrorKind::AuthenticationFailed, "bad password"));
        assert!(matches!(map_redis_error(err), CacheError::Connection(_)));
    }

    #[test]
    fn test_type_mismatch_is_command_error() {
        let err = RedisError::from((ErrorKind::TypeError, "WRONGTYPE"));
        assert!(matches!(map_redis_error(err), CacheError::Command(_)));

        let err = RedisError::from((ErrorKind::ResponseError, "ERR syntax"));
        assert!(matches!(map_redis_error(err), CacheError::Command(_)));
    }

    /// Needs a Redis server at `REDIS_URL`.
    #[tokio::test]
    #[ignore]
    async fn test_live_hash_round_trip() {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".to_string());
        let cache = RedisCache::connect(&url).await.unwrap();
        let key = "product:test-live-round-trip";

        cache
            .hash_set(key, HashMap::from([("name".to_string(), "Widget".to_string())]))
            .await
            .unwrap();
        assert_eq!(cache.hash_get_all(key).await.unwrap()["name"], "Widget");
        assert!(cache
            .keys_matching("product:test-live-*")
            .await
            .unwrap()
            .contains(&key.to_string()));

        cache.delete(key).await.unwrap();
        assert!(cache.hash_get_all(key).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_wrong_type_is_command_error() {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".to_string());
        let cache = RedisCache::connect(&url).await.unwrap();
        let key = "product:test-live-wrong-type";

        let mut conn = cache.conn.clone();
        let _: () = conn.set(key, "plain").await.unwrap();

        let result = cache.hash_get_all(key).await;
        assert!(matches!(result, Err(CacheError::Command(_))));

        cache.delete(key).await.unwrap();
    }
}
