//! Shared Cache Module
//!
//! Process-wide cache handle and the memoization helper built on it.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};

/// Which path produced a memoized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Served from the cache
    Cached,
    /// Produced by the fetch and stored
    Fetched,
}

impl Freshness {
    pub fn is_cached(self) -> bool {
        self == Freshness::Cached
    }
}

// == Shared Cache ==
/// A [`CacheStore`] behind one mutex, cheap to clone.
///
/// Every read mutates recency and counters, so there is a single lock for
/// both reads and writes. The lock is never held while a fetch is pending.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: Arc<Mutex<CacheStore<V>>>,
    capacity: usize,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            capacity: self.capacity,
        }
    }
}

impl<V: Clone> SharedCache<V> {
    /// Wraps a store for sharing.
    pub fn new(store: CacheStore<V>) -> Self {
        let capacity = store.capacity();
        Self {
            inner: Arc::new(Mutex::new(store)),
            capacity,
        }
    }

    /// Looks up `key`, cloning the value out of the lock.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.lock().await.get(key).cloned()
    }

    pub async fn set(&self, key: impl Into<String>, value: V) {
        self.inner.lock().await.set(key, value);
    }

    pub async fn remove(&self, key: &str) -> Option<V> {
        self.inner.lock().await.remove(key)
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Fixed at construction, so no lock is needed.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Get Or Fetch ==
    /// Returns the cached value for `key`, or runs `fetch` and caches its result.
    ///
    /// A failed fetch is returned as-is and nothing is stored. Two tasks
    /// missing on the same key at once will both fetch; the later `set` wins.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<(V, Freshness), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            debug!(key, "serving cached value");
            return Ok((value, Freshness::Cached));
        }

        let value = fetch().await?;
        self.set(key, value.clone()).await;
        debug!(key, "cached fetched value");
        Ok((value, Freshness::Fetched))
    }
}
