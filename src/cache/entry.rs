//! Cache Entry Module
//!
//! Defines a stored value together with the time it was written.

use std::time::Duration;

// == Cache Entry ==
/// A single cached value and its insertion timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Clock reading (milliseconds) at the last `set` of this key
    pub inserted_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry stamped with `now_ms`.
    pub fn new(value: V, now_ms: u64) -> Self {
        Self {
            value,
            inserted_at: now_ms,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since insertion, saturating at zero.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.inserted_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is still
    /// live. It expires only once the age is strictly greater than the TTL.
    /// With no TTL the entry never expires.
    pub fn is_expired(&self, ttl: Option<Duration>, now_ms: u64) -> bool {
        match ttl {
            Some(ttl) => u128::from(self.age_ms(now_ms)) > ttl.as_millis(),
            None => false,
        }
    }
}
