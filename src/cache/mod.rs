//! Cache Module
//!
//! Bounded in-memory cache with LRU eviction and lazy TTL expiration.

mod clock;
mod entry;
mod key;
mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, SystemClock};
#[doc(hidden)]
pub use clock::ManualClock;
pub use entry::CacheEntry;
pub use key::CacheKey;
pub use lru::RecencyList;
pub use shared::{Freshness, SharedCache};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 500;
