//! API Handlers
//!
//! HTTP request handlers for each lookup service endpoint.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};

use crate::cache::{CacheStore, SharedCache};
use crate::config::Config;
use crate::error::Result;
use crate::lookup::LookupService;
use crate::models::{HealthResponse, LookupParams, LookupResponse, StatsResponse};
use crate::upstream::SourceRegistry;

/// Application state shared across all handlers.
///
/// Cloning is cheap: the cache and the registry are reference counted.
#[derive(Debug, Clone)]
pub struct AppState {
    pub lookups: LookupService,
}

impl AppState {
    /// Creates a new AppState around a lookup service.
    pub fn new(lookups: LookupService) -> Self {
        Self { lookups }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the cache and the HTTP upstreams; fails on unusable settings.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = CacheStore::new(config.cache_capacity, config.cache_ttl)?;
        let sources = SourceRegistry::from_specs(&config.upstreams, config.upstream_timeout)?;
        Ok(Self::new(LookupService::new(SharedCache::new(store), sources)))
    }
}

/// Handler for GET /lookup/:source?q=..&limit=..
///
/// Serves the query from the cache, calling the upstream only on a miss.
/// A query string that does not deserialize is reported as `InvalidRequest`.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Path(source): Path<String>,
    params: std::result::Result<Query<LookupParams>, QueryRejection>,
) -> Result<Json<LookupResponse>> {
    let Query(params) = params?;
    let query = params.into_query()?;
    let outcome = state.lookups.lookup(&source, &query).await?;
    Ok(Json(outcome.into()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.lookups.stats().await;
    Json(StatsResponse::new(&stats, state.lookups.capacity()))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.lookups.source_names()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use crate::upstream::{self, Upstream};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Fixed;

    #[async_trait]
    impl Upstream for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch(&self, query: &upstream::Query) -> Result<String> {
            Ok(format!("results for {}", query.text))
        }
    }

    fn state() -> AppState {
        let mut sources = SourceRegistry::new();
        sources.register(Arc::new(Fixed)).unwrap();
        let cache = SharedCache::new(CacheStore::new(100, None).unwrap());
        AppState::new(LookupService::new(cache, sources))
    }

    fn params(q: &str) -> std::result::Result<Query<LookupParams>, QueryRejection> {
        Ok(Query(LookupParams {
            q: q.to_string(),
            limit: None,
        }))
    }

    #[tokio::test]
    async fn test_lookup_handler_miss_then_hit() {
        let state = state();

        let first = lookup_handler(State(state.clone()), Path("fixed".to_string()), params("ai"))
            .await
            .unwrap();
        assert!(!first.cached);
        assert_eq!(first.body, "results for ai");

        let second = lookup_handler(State(state.clone()), Path("fixed".to_string()), params("ai"))
            .await
            .unwrap();
        assert!(second.cached);
    }

    #[tokio::test]
    async fn test_lookup_handler_unknown_source() {
        let result =
            lookup_handler(State(state()), Path("missing".to_string()), params("ai")).await;
        assert!(matches!(result, Err(CacheError::UnknownSource(_))));
    }

    #[tokio::test]
    async fn test_lookup_handler_blank_query() {
        let result = lookup_handler(State(state()), Path("fixed".to_string()), params(" ")).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let response = stats_handler(State(state())).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
        assert_eq!(response.capacity, 100);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler(State(state())).await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.sources, vec!["fixed"]);
    }

    #[test]
    fn test_state_from_default_config() {
        let state = AppState::from_config(&Config::default()).unwrap();
        assert_eq!(state.lookups.capacity(), 500);
        assert_eq!(state.lookups.source_names(), vec!["federalregister"]);
    }
}
