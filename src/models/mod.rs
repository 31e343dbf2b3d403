//! Domain and transfer models for the products service
//!
//! `Product` is the entity; the request types double as repository inputs,
//! and the response types shape HTTP bodies.

pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use product::{cache_key, id_from_cache_key, Product, CACHE_KEY_PATTERN, CACHE_KEY_PREFIX};
pub use requests::{NewProduct, ProductPatch};
pub use responses::{
    DeleteResponse, ErrorResponse, HealthResponse, StatsResponse, SyncResponse,
};
