//! Cache Statistics Module
//!
//! Tracks how the repository uses the cache: hits, misses, read-repair fills,
//! absorbed cache failures and orphans removed by reconciliation.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Point reads answered from the cache
    pub hits: u64,
    /// Point reads that fell through to the store (absent or undecodable entry)
    pub misses: u64,
    /// Cache entries written from a fresh store read
    pub fills: u64,
    /// Cache failures logged and ignored on the request path
    pub cache_errors: u64,
    /// Orphaned cache entries removed by reconciliation
    pub orphans_removed: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_fill(&mut self) {
        self.fills += 1;
    }

    pub fn record_cache_error(&mut self) {
        self.cache_errors += 1;
    }

    pub fn record_orphans_removed(&mut self, count: usize) {
        self.orphans_removed += count as u64;
    }
}
