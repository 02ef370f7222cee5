//! Lookup Cache - memoized access to slow upstream data sources
//!
//! Provides a bounded LRU cache with lazy TTL expiration and a small HTTP
//! service that serves upstream lookups through it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod upstream;

pub use api::AppState;
pub use cache::{CacheKey, CacheStats, CacheStore, SharedCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use lookup::{LookupOutcome, LookupService};
