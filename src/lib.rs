//! Cached Products - products CRUD service with a coherent hash cache
//!
//! The record store is the system of record; a write-through, read-through
//! cache accelerates point reads and is reconciled against the store on
//! demand.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use repository::ProductRepository;
pub use tasks::spawn_sync_task;
