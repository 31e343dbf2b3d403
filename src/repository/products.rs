//! Product Repository
//!
//! Serves product reads and writes from the record store with the cache in
//! front of point reads.
//!
//! # Consistency policy
//! - The store is authoritative; cache entries are derived and may lag.
//! - Point reads check the cache first and fill it on a miss (read-repair).
//! - Writes go to the store first, then to the cache. The two steps are not
//!   atomic; concurrent writers to one id may leave either result cached.
//! - After a mutation the row is re-read from the store, never the cache.
//! - Cache failures outside `reconcile` are logged and counted, never
//!   returned: the store result stands.
//! - `reconcile` rewrites every entry from the store and removes entries
//!   whose id no longer exists.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, HashCache};
use crate::error::{CacheError, RepositoryError, RepositoryResult};
use crate::models::{
    cache_key, id_from_cache_key, NewProduct, Product, ProductPatch, CACHE_KEY_PATTERN,
};
use crate::store::{Column, ProductRow, RecordStore, SqlParam, PRODUCTS_TABLE};

const SELECT_ALL_SQL: &str = "SELECT ID, NAME, PRICE, DESCRIPTION FROM PRODUCTS ORDER BY ID";
const SELECT_BY_ID_SQL: &str = "SELECT ID, NAME, PRICE, DESCRIPTION FROM PRODUCTS WHERE ID = ?";
const INSERT_SQL: &str = "INSERT INTO PRODUCTS (NAME, PRICE, DESCRIPTION) VALUES (?, ?, ?)";
const DELETE_SQL: &str = "DELETE FROM PRODUCTS WHERE ID = ?";

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Entries rewritten from store rows
    pub refreshed: usize,
    /// Orphaned entries deleted
    pub removed: usize,
}

// == Product Repository ==
/// Cache-coherent access to products.
///
/// Holds the process-wide store and cache handles; otherwise stateless
/// between calls apart from usage statistics.
pub struct ProductRepository {
    store: Arc<dyn RecordStore>,
    cache: Arc<dyn HashCache>,
    stats: RwLock<CacheStats>,
}

impl ProductRepository {
    // == Constructor ==
    pub fn new(store: Arc<dyn RecordStore>, cache: Arc<dyn HashCache>) -> Self {
        Self {
            store,
            cache,
            stats: RwLock::new(CacheStats::new()),
        }
    }

    // == List All ==
    /// Returns every product from the store, ordered by id.
    ///
    /// The cache only holds point entries, so it is never consulted here.
    pub async fn list_all(&self) -> RepositoryResult<Vec<Product>> {
        let rows = self.store.query(SELECT_ALL_SQL, Vec::new()).await?;
        debug!("Listed {} products from store", rows.len());
        Ok(rows.into_iter().filter_map(ProductRow::into_product).collect())
    }

    // == Get By Id ==
    /// Returns the product with `id`, or `None` if the store has no such row.
    ///
    /// A cache hit never queries the store. A miss reads the store and, when
    /// the row exists, writes it into the cache before returning.
    pub async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Product>> {
        if let Some(product) = self.lookup_cache(id).await {
            debug!("Cache hit for product {}", id);
            self.stats.write().await.record_hit();
            return Ok(Some(product));
        }

        debug!("Cache miss for product {}", id);
        self.stats.write().await.record_miss();

        let product = self.fetch_from_store(id).await?;
        if let Some(product) = &product {
            self.fill_cache(product).await;
        }
        Ok(product)
    }

    // == Create ==
    /// Inserts a product and returns it as the store now holds it.
    ///
    /// The new row is read back from the store and cached. If it cannot be
    /// read back the call fails with `PostInsertVerification`.
    pub async fn create(&self, new: NewProduct) -> RepositoryResult<Product> {
        if let Some(error) = new.validate() {
            return Err(RepositoryError::Validation(error));
        }

        let outcome = self
            .store
            .execute(
                INSERT_SQL,
                vec![
                    SqlParam::from(new.name),
                    SqlParam::from(new.price),
                    SqlParam::from(new.description),
                ],
            )
            .await?;
        let id = outcome.last_insert_id;
        info!("Inserted product {}", id);

        let product = self
            .fetch_from_store(id)
            .await?
            .ok_or(RepositoryError::PostInsertVerification(id))?;
        self.fill_cache(&product).await;
        Ok(product)
    }

    // == Update ==
    /// Applies a partial update and returns the refreshed product, or `None`
    /// if `id` does not exist.
    ///
    /// An empty patch fails with `Validation` before the store or cache is
    /// touched.
    pub async fn update(&self, id: i64, patch: ProductPatch) -> RepositoryResult<Option<Product>> {
        if let Some(error) = patch.validate() {
            return Err(RepositoryError::Validation(error));
        }

        let (sql, params) = build_update(id, &patch);
        let outcome = self.store.execute(&sql, params).await?;
        debug!(
            "Update of product {} affected {} rows",
            id, outcome.affected_rows
        );

        match self.fetch_from_store(id).await? {
            Some(product) => {
                info!("Updated product {}", id);
                self.fill_cache(&product).await;
                Ok(Some(product))
            }
            None => {
                // No row: drop whatever stale entry the cache may still hold
                self.evict_cache(id).await;
                Ok(None)
            }
        }
    }

    // == Delete ==
    /// Deletes the product and its cache entry; returns the affected row
    /// count (0 when the id did not exist).
    ///
    /// The cache entry is removed even when no row was deleted.
    pub async fn delete(&self, id: i64) -> RepositoryResult<u64> {
        let outcome = self
            .store
            .execute(DELETE_SQL, vec![SqlParam::from(id)])
            .await?;
        self.evict_cache(id).await;

        if outcome.affected_rows > 0 {
            info!("Deleted product {}", id);
        } else {
            debug!("Delete of product {} matched no rows", id);
        }
        Ok(outcome.affected_rows)
    }

    // == Load Cache ==
    /// Warms the cache with every product in the store.
    ///
    /// Best effort: rows without an id are skipped with a warning and cache
    /// failures are logged. Returns the number of entries written.
    pub async fn load_cache(&self) -> RepositoryResult<usize> {
        info!("Loading products from store into cache");
        let rows = self.store.query(SELECT_ALL_SQL, Vec::new()).await?;

        let mut loaded = 0;
        for row in rows {
            let Some(product) = row.clone().into_product() else {
                warn!("Skipping product without id: {:?}", row);
                continue;
            };
            if self.fill_cache(&product).await {
                loaded += 1;
            }
        }

        info!("Cache loaded with {} products", loaded);
        Ok(loaded)
    }

    // == Reconcile ==
    /// Makes the cache match the store exactly.
    ///
    /// Every store row is written to the cache, then every `product:*` key
    /// whose id is not in the store is deleted. A product key holding a
    /// non-hash value is deleted and rewritten. Other cache failures abort
    /// the pass and are returned; a later pass converges from whatever state
    /// remains.
    pub async fn reconcile(&self) -> RepositoryResult<SyncReport> {
        info!("Synchronizing cache with store");
        let products = self.list_all().await?;
        let existing: HashSet<i64> = products.iter().map(|p| p.id).collect();

        for product in &products {
            self.overwrite_entry(product).await?;
        }

        let mut removed = 0;
        for key in self.cache.keys_matching(CACHE_KEY_PATTERN).await? {
            let orphaned = match id_from_cache_key(&key) {
                Some(id) => !existing.contains(&id),
                None => true,
            };
            if orphaned {
                self.cache.delete(&key).await?;
                debug!("Removed orphaned cache entry {}", key);
                removed += 1;
            }
        }

        self.stats.write().await.record_orphans_removed(removed);
        let report = SyncReport {
            refreshed: products.len(),
            removed,
        };
        info!(
            "Synchronization complete: {} refreshed, {} removed",
            report.refreshed, report.removed
        );
        Ok(report)
    }

    // == Stats ==
    /// Returns a snapshot of the cache usage counters.
    pub async fn stats(&self) -> CacheStats {
        self.stats.read().await.clone()
    }

    // == Internal Helpers ==
    /// Writes `product`'s entry, replacing a key that holds a non-hash value.
    async fn overwrite_entry(&self, product: &Product) -> RepositoryResult<()> {
        let key = cache_key(product.id);
        match self.cache.hash_set(&key, product.to_cache_fields()).await {
            Err(CacheError::Command(e)) => {
                warn!("Replacing unwritable cache entry {}: {}", key, e);
                self.cache.delete(&key).await?;
                self.cache.hash_set(&key, product.to_cache_fields()).await?;
                Ok(())
            }
            result => Ok(result?),
        }
    }

    /// Reads one product straight from the store.
    async fn fetch_from_store(&self, id: i64) -> RepositoryResult<Option<Product>> {
        let rows = self
            .store
            .query(SELECT_BY_ID_SQL, vec![SqlParam::from(id)])
            .await?;
        Ok(rows.into_iter().find_map(ProductRow::into_product))
    }

    /// Returns the cached product for `id` if present and decodable.
    ///
    /// Lookup failures and malformed entries read as a miss. An entry whose
    /// id field disagrees with its key is treated as malformed.
    async fn lookup_cache(&self, id: i64) -> Option<Product> {
        let fields = match self.cache.hash_get_all(&cache_key(id)).await {
            Ok(fields) => fields,
            Err(e) => {
                warn!("Cache lookup for product {} failed: {}", id, e);
                self.stats.write().await.record_cache_error();
                return None;
            }
        };
        if fields.is_empty() {
            return None;
        }

        match Product::from_cache_fields(&fields) {
            Some(product) if product.id == id => Some(product),
            _ => {
                warn!("Ignoring malformed cache entry for product {}", id);
                None
            }
        }
    }

    /// Writes the product into the cache. Returns false if the write failed.
    async fn fill_cache(&self, product: &Product) -> bool {
        let key = cache_key(product.id);
        match self.cache.hash_set(&key, product.to_cache_fields()).await {
            Ok(()) => {
                debug!("Cached product {} under {}", product.id, key);
                self.stats.write().await.record_fill();
                true
            }
            Err(e) => {
                warn!("Failed to cache product {}: {}", product.id, e);
                self.stats.write().await.record_cache_error();
                false
            }
        }
    }

    async fn evict_cache(&self, id: i64) {
        if let Err(e) = self.cache.delete(&cache_key(id)).await {
            warn!("Failed to evict product {} from cache: {}", id, e);
            self.stats.write().await.record_cache_error();
        }
    }
}

/// Builds `UPDATE PRODUCTS SET <present columns> WHERE ID = ?` and its
/// parameters. Column names come only from `Column`, never from input.
fn build_update(id: i64, patch: &ProductPatch) -> (String, Vec<SqlParam>) {
    let (assignments, mut params): (Vec<String>, Vec<SqlParam>) = patch
        .fields()
        .into_iter()
        .map(|(column, value)| (format!("{} = ?", column.as_str()), value))
        .unzip();
    params.push(SqlParam::from(id));

    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        PRODUCTS_TABLE,
        assignments.join(", "),
        Column::Id.as_str()
    );
    (sql, params)
}
