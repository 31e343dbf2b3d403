//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache sync: reconciles the cache with the store at a configured interval

mod sync;

pub use sync::spawn_sync_task;
