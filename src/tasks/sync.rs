//! Cache Sync Task
//!
//! Background task that periodically reconciles the cache with the store,
//! removing entries for rows deleted behind the service's back.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::repository::ProductRepository;

/// Spawns a background task that reconciles the cache every interval.
///
/// A failed pass is logged and the loop keeps going; the next pass starts
/// from whatever state the cache is in.
///
/// # Arguments
/// * `repo` - Shared repository
/// * `sync_interval_secs` - Interval in seconds between reconciliation passes
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let sync_handle = spawn_sync_task(state.repo.clone(), 60);
/// // Later, during shutdown:
/// sync_handle.abort();
/// ```
pub fn spawn_sync_task(repo: Arc<ProductRepository>, sync_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(sync_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cache sync task with interval of {} seconds",
            sync_interval_secs
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            match repo.reconcile().await {
                Ok(report) if report.removed > 0 => {
                    info!(
                        "Cache sync: refreshed {} entries, removed {} orphans",
                        report.refreshed, report.removed
                    );
                }
                Ok(report) => {
                    debug!("Cache sync: refreshed {} entries", report.refreshed);
                }
                Err(e) => {
                    warn!("Cache sync failed: {}", e);
                }
            }
        }
    })
}
