//! API Routes
//!
//! Configures the Axum router with all products service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_handler, delete_handler, get_handler, health_handler, list_handler, root_handler,
    stats_handler, sync_handler, update_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Liveness text
/// - `GET /health` - Health check endpoint
/// - `GET /stats` - Cache usage statistics
/// - `GET /api/products` - List all products
/// - `POST /api/products` - Create a product
/// - `GET /api/products/:id` - Fetch one product
/// - `PUT /api/products/:id` - Partially update a product
/// - `DELETE /api/products/:id` - Delete a product
/// - `POST /api/sync` - Reconcile the cache with the store
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/products", get(list_handler).post(create_handler))
        .route(
            "/products/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .route("/sync", post(sync_handler));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
