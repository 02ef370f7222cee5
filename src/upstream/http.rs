//! HTTP Upstream
//!
//! Fetches raw response bodies from an HTTP search endpoint.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use super::{Query, Upstream, UpstreamSpec};
use crate::error::{CacheError, Result};

/// User agent sent with every upstream request
pub const USER_AGENT: &str = concat!("lookup-cache/", env!("CARGO_PKG_VERSION"));

/// Builds the client shared by all HTTP upstreams.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| CacheError::InvalidConfig(format!("Failed to build HTTP client: {}", e)))
}

// == HTTP Upstream ==
/// Upstream answering `GET base_url?{query_param}={text}&{limit_param}={limit}`.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    spec: UpstreamSpec,
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(spec: UpstreamSpec, client: reqwest::Client) -> Self {
        Self { spec, client }
    }

    /// Prepares the GET request for `query` without sending it.
    pub fn request(&self, query: &Query) -> Result<reqwest::Request> {
        let limit = query.limit.to_string();
        self.client
            .get(&self.spec.base_url)
            .query(&[
                (self.spec.query_param.as_str(), query.text.as_str()),
                (self.spec.limit_param.as_str(), limit.as_str()),
            ])
            .build()
            .map_err(CacheError::from)
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    fn name(&self) -> &str {
        &self.spec.name
    }

    async fn fetch(&self, query: &Query) -> Result<String> {
        let request = self.request(query)?;
        info!(source = %self.spec.name, url = %request.url(), "fetching from upstream");

        let response = self.client.execute(request).await.map_err(|e| {
            warn!(source = %self.spec.name, error = %e, "upstream request failed");
            CacheError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(source = %self.spec.name, %status, "upstream returned error status");
            return Err(CacheError::Upstream(format!(
                "{} responded with {}",
                self.spec.name, status
            )));
        }

        Ok(response.text().await?)
    }
}
