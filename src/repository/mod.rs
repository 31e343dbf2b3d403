//! Repository Module
//!
//! The cache-coherent product repository: the only component that talks to
//! both the record store and the cache.

mod products;


pub use products::{ProductRepository, SyncReport};
