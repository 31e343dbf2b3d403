//! API Module
//!
//! HTTP handlers and routing for the products REST API.
//!
//! # Endpoints
//! - `GET /api/products` - List every product
//! - `POST /api/products` - Create a product
//! - `GET|PUT|DELETE /api/products/:id` - Read, update or delete one product
//! - `POST /api/sync` - Reconcile the cache with the store
//! - `GET /stats` - Cache usage statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
