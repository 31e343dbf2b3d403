//! Response DTOs for the products API
//!
//! Defines the structure of outgoing HTTP response bodies. Products
//! themselves are serialized directly.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::repository::SyncReport;

/// Response body for the DELETE operation (DELETE /api/products/:id)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The id that was deleted
    pub id: i64,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(id: i64) -> Self {
        Self {
            message: format!("Product {} deleted successfully", id),
            id,
        }
    }
}

/// Response body for the reconciliation endpoint (POST /api/sync)
#[derive(Debug, Clone, Serialize)]
pub struct SyncResponse {
    pub message: String,
    /// Cache entries rewritten from the store
    pub refreshed: usize,
    /// Orphaned cache entries removed
    pub removed: usize,
}

impl From<SyncReport> for SyncResponse {
    fn from(report: SyncReport) -> Self {
        Self {
            message: "Synchronization completed successfully".to_string(),
            refreshed: report.refreshed,
            removed: report.removed,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads answered from the cache
    pub hits: u64,
    /// Reads that fell through to the store
    pub misses: u64,
    /// Cache entries written after a store read
    pub fills: u64,
    /// Cache failures absorbed on the request path
    pub cache_errors: u64,
    /// Orphaned entries removed by reconciliation
    pub orphans_removed: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            fills: stats.fills,
            cache_errors: stats.cache_errors,
            orphans_removed: stats.orphans_removed,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
