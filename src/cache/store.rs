//! Cache Store Module
//!
//! Main cache engine combining a key index with recency ordering and lazy
//! TTL expiration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock, RecencyList, SystemClock, DEFAULT_CAPACITY};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded cache with least-recently-used eviction and optional TTL.
///
/// Both `get` and `set` take `&mut self`: a read moves the entry to the most
/// recently used position and updates the counters. Share it across tasks
/// through [`SharedCache`](crate::cache::SharedCache).
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key to slot index in `order`
    index: HashMap<String, usize>,
    /// Entries from least to most recently used
    order: RecencyList<V>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Maximum entry age, None = entries never expire
    ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// `InvalidConfig` when `capacity` is zero or `ttl` is a zero duration.
    pub fn new(capacity: usize, ttl: Option<Duration>) -> Result<Self> {
        Self::with_clock(capacity, ttl, Arc::new(SystemClock::new()))
    }

    /// Creates a cache with [`DEFAULT_CAPACITY`] and no expiry.
    pub fn with_defaults() -> Self {
        Self::build(DEFAULT_CAPACITY, None, Arc::new(SystemClock::new()))
    }

    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(
        capacity: usize,
        ttl: Option<Duration>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        if ttl == Some(Duration::ZERO) {
            return Err(CacheError::InvalidConfig(
                "ttl must be a positive duration".to_string(),
            ));
        }
        Ok(Self::build(capacity, ttl, clock))
    }

    fn build(capacity: usize, ttl: Option<Duration>, clock: Arc<dyn Clock>) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            order: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
            ttl,
            clock,
        }
    }

    // == Set ==
    /// Stores a value, making `key` the most recently used entry.
    ///
    /// An existing key is replaced and its timestamp reset; that is an update,
    /// not an eviction. A new key arriving at a full cache first evicts the
    /// least recently used entry.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let now = self.clock.now_ms();

        if let Some(idx) = self.index.remove(&key) {
            self.order.remove(idx);
        } else if self.order.len() >= self.capacity {
            if let Some((evicted, _)) = self.order.pop_front() {
                self.index.remove(&evicted);
                self.stats.record_eviction();
                debug!(key = %evicted, "evicted least recently used entry");
            }
        }

        let idx = self.order.push_back(key.clone(), CacheEntry::new(value, now));
        self.index.insert(key, idx);
    }

    // == Get ==
    /// Retrieves a live value and marks it most recently used.
    ///
    /// Absent keys and expired entries both count as misses; an expired entry
    /// is dropped on the spot.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let now = self.clock.now_ms();

        let Some(&idx) = self.index.get(key) else {
            self.stats.record_miss();
            debug!(key, "cache miss");
            return None;
        };

        let expired = self
            .order
            .entry(idx)
            .map_or(true, |entry| entry.is_expired(self.ttl, now));
        if expired {
            self.index.remove(key);
            self.order.remove(idx);
            self.stats.record_expiration();
            self.stats.record_miss();
            debug!(key, "cache entry expired");
            return None;
        }

        self.stats.record_hit();
        self.order.move_to_back(idx);
        self.order.entry(idx).map(|entry| &entry.value)
    }

    // == Peek ==
    /// Reads a live value without touching recency or counters.
    ///
    /// Expired entries read as absent but stay in place.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let now = self.clock.now_ms();
        let idx = *self.index.get(key)?;
        self.order
            .entry(idx)
            .filter(|entry| !entry.is_expired(self.ttl, now))
            .map(|entry| &entry.value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.peek(key).is_some()
    }

    // == Remove ==
    /// Drops an entry regardless of its age, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.index.remove(key)?;
        self.order.remove(idx).map(|(_, entry)| entry.value)
    }

    // == Purge Expired ==
    /// Removes every expired entry and returns how many were dropped.
    ///
    /// Nothing calls this automatically; expiry is otherwise checked on read.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired: Vec<usize> = self
            .order
            .iter()
            .filter(|(_, _, entry)| entry.is_expired(self.ttl, now))
            .map(|(idx, _, _)| idx)
            .collect();

        for &idx in &expired {
            if let Some((key, _)) = self.order.remove(idx) {
                self.index.remove(&key);
                self.stats.record_expiration();
            }
        }
        expired.len()
    }

    // == Stats ==
    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.order.len();
        stats
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> Vec<String> {
        self.order
            .iter()
            .map(|(_, key, _)| key.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }
}
