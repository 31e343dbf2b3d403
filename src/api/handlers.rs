//! API Handlers
//!
//! HTTP request handlers translating requests into repository calls.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::cache::HashCache;
use crate::error::{ApiError, Result};
use crate::models::{
    DeleteResponse, HealthResponse, NewProduct, Product, ProductPatch, StatsResponse,
    SyncResponse,
};
use crate::repository::ProductRepository;
use crate::store::RecordStore;

/// Application state shared across all handlers.
///
/// Holds the one repository built at startup.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<ProductRepository>,
}

impl AppState {
    /// Creates a new AppState around a repository.
    pub fn new(repo: ProductRepository) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }

    /// Creates a new AppState from store and cache handles.
    pub fn from_parts(store: Arc<dyn RecordStore>, cache: Arc<dyn HashCache>) -> Self {
        Self::new(ProductRepository::new(store, cache))
    }
}

/// Handler for GET /
pub async fn root_handler() -> &'static str {
    "ok"
}

/// Handler for GET /api/products
pub async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.repo.list_all().await?;
    Ok(Json(products))
}

/// Handler for GET /api/products/:id
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>> {
    state
        .repo
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// Handler for POST /api/products
///
/// Validation happens in the repository so every caller gets the same rules.
pub async fn create_handler(
    State(state): State<AppState>,
    Json(req): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.repo.create(req).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for PUT /api/products/:id
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>> {
    state
        .repo
        .update(id, patch)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// Handler for DELETE /api/products/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    match state.repo.delete(id).await? {
        0 => Err(ApiError::NotFound(id)),
        _ => Ok(Json(DeleteResponse::new(id))),
    }
}

/// Handler for POST /api/sync
pub async fn sync_handler(State(state): State<AppState>) -> Result<Json<SyncResponse>> {
    let report = state.repo.reconcile().await?;
    Ok(Json(SyncResponse::from(report)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.repo.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
