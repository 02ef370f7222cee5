//! Lookup Service
//!
//! Memoizes upstream queries through the shared cache.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheKey, CacheStats, SharedCache};
use crate::error::{CacheError, Result};
use crate::upstream::{Query, SourceRegistry};

/// Cached upstream response bodies. `Arc<str>` keeps cache reads to a
/// reference-count bump and the stored text immutable.
pub type LookupCache = SharedCache<Arc<str>>;

/// Result of one lookup.
#[derive(Debug, Clone)]
pub struct LookupOutcome {
    pub source: String,
    pub key: String,
    pub body: Arc<str>,
    /// True when served without calling the upstream
    pub cached: bool,
}

// == Lookup Service ==
/// Resolves a source, builds the cache key and fetches on a miss.
#[derive(Debug, Clone)]
pub struct LookupService {
    cache: LookupCache,
    sources: Arc<SourceRegistry>,
}

impl LookupService {
    pub fn new(cache: LookupCache, sources: SourceRegistry) -> Self {
        Self {
            cache,
            sources: Arc::new(sources),
        }
    }

    /// Key under which a query against `source` is cached.
    pub fn cache_key(source: &str, query: &Query) -> CacheKey {
        CacheKey::new(source).part(&query.text).part(query.limit)
    }

    // == Lookup ==
    /// Serves `query` from the cache, or from `source` on a miss.
    ///
    /// # Errors
    /// - `UnknownSource` if no upstream is registered as `source`
    /// - whatever the upstream returned; failures are never cached
    pub async fn lookup(&self, source: &str, query: &Query) -> Result<LookupOutcome> {
        let upstream = self
            .sources
            .get(source)
            .ok_or_else(|| CacheError::UnknownSource(source.to_string()))?;

        let key = Self::cache_key(source, query).into_string();
        let (body, freshness) = self
            .cache
            .get_or_fetch(&key, || async {
                upstream.fetch(query).await.map(Arc::<str>::from)
            })
            .await?;

        debug!(source, key = %key, cached = freshness.is_cached(), "lookup served");
        Ok(LookupOutcome {
            source: source.to_string(),
            key,
            body,
            cached: freshness.is_cached(),
        })
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    pub fn source_names(&self) -> Vec<String> {
        self.sources.names()
    }
}
