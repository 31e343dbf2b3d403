//! Cached Products - products CRUD service with a coherent hash cache
//!
//! Binary entry point: wires the store, the cache and the HTTP API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cached_products::api::create_router;
use cached_products::cache::{HashCache, MemoryCache, RedisCache};
use cached_products::store::SqliteStore;
use cached_products::{spawn_sync_task, AppState, Config};

/// Main entry point for the products service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the record store and connect the cache
/// 4. Warm the cache from the store
/// 5. Start the background sync task, if enabled
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cached_products=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cached Products Server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: database={}, cache={}, port={}, sync_interval={}s",
        config.database_path,
        if config.redis_url.is_some() { "redis" } else { "memory" },
        config.server_port,
        config.sync_interval
    );

    // Open the store and connect the cache, once for the process lifetime
    let store = if config.in_memory_database() {
        SqliteStore::open_in_memory()
    } else {
        SqliteStore::open(&config.database_path)
    }
    .context("failed to open product store")?;

    let cache: Arc<dyn HashCache> = match &config.redis_url {
        Some(url) => Arc::new(
            RedisCache::connect(url)
                .await
                .context("failed to connect to Redis")?,
        ),
        None => Arc::new(MemoryCache::new()),
    };

    let state = AppState::from_parts(Arc::new(store), cache);

    if config.warm_cache {
        if let Err(e) = state.repo.load_cache().await {
            warn!("Cache warm-up failed: {}", e);
        }
    }

    let sync_handle = if config.sync_interval > 0 {
        Some(spawn_sync_task(state.repo.clone(), config.sync_interval))
    } else {
        None
    };

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sync_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sync task and allows graceful shutdown.
async fn shutdown_signal(sync_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = sync_handle {
        handle.abort();
        warn!("Sync task aborted");
    }
}
