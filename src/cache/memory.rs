//! In-process `HashCache` backed by a shared `CacheStore`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheStore, HashCache};
use crate::error::CacheResult;

/// Thread-safe handle to an in-process cache store.
///
/// Clones share the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of cached keys.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl HashCache for MemoryCache {
    async fn hash_get_all(&self, key: &str) -> CacheResult<HashMap<String, String>> {
        Ok(self.store.read().await.hash_get_all(key))
    }

    async fn hash_set(&self, key: &str, fields: HashMap<String, String>) -> CacheResult<()> {
        self.store.write().await.hash_set(key, fields);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.store.write().await.delete(key);
        Ok(())
    }

    async fn keys_matching(&self, pattern: &str) -> CacheResult<Vec<String>> {
        Ok(self.store.read().await.keys_matching(pattern))
    }
}
