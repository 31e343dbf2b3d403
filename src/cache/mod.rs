//! Cache Module
//!
//! Hash-map cache client used to accelerate product point reads. Two
//! backends implement `HashCache`: an in-process store and Redis.

mod memory;
mod pattern;
mod redis_cache;
mod stats;
mod store;


use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::CacheResult;

// Re-export public types
pub use memory::MemoryCache;
pub use pattern::glob_match;
pub use redis_cache::RedisCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Hash Cache Trait ==
/// Client for a hash-map cache with string fields and no expiry.
///
/// Value-level operations always succeed (a missing key reads as an empty
/// hash); only connectivity failures surface as errors.
#[async_trait]
pub trait HashCache: Send + Sync {
    /// Returns every field of the hash at `key`, empty if absent.
    async fn hash_get_all(&self, key: &str) -> CacheResult<HashMap<String, String>>;

    /// Sets the given fields on the hash at `key`, creating it if needed.
    async fn hash_set(&self, key: &str, fields: HashMap<String, String>) -> CacheResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Lists keys matching a glob pattern (`*` and `?` wildcards).
    async fn keys_matching(&self, pattern: &str) -> CacheResult<Vec<String>>;
}
