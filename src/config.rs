//! Configuration Module
//!
//! Handles loading and validating service configuration from environment
//! variables. Unusable values are rejected rather than silently defaulted.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{CacheError, Result};
use crate::upstream::UpstreamSpec;

/// Default TTL for cached lookups (30 minutes)
pub const DEFAULT_TTL_MS: u64 = 30 * 60 * 1000;

/// Default upstream: the US Federal Register articles API
pub const DEFAULT_UPSTREAMS: &str =
    "federalregister=https://www.federalregister.gov/api/v1/articles.json|conditions[term]|per_page";

/// Service configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub cache_capacity: usize,
    /// Entry TTL, None = entries never expire
    pub cache_ttl: Option<Duration>,
    /// HTTP server port
    pub server_port: u16,
    /// Timeout applied to every upstream request
    pub upstream_timeout: Duration,
    /// Upstream sources to register
    pub upstreams: Vec<UpstreamSpec>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 500)
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds, `none`/`off` to disable (default: 1800000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream request timeout (default: 15)
    /// - `UPSTREAMS` - `name=url|query_param|limit_param` entries separated by `;`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let cache_capacity = match lookup("CACHE_CAPACITY") {
            Some(raw) => positive("CACHE_CAPACITY", &raw)?,
            None => defaults.cache_capacity,
        };

        let cache_ttl = match lookup("CACHE_TTL_MS") {
            Some(raw) => parse_ttl(&raw)?,
            None => defaults.cache_ttl,
        };

        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => positive("SERVER_PORT", &raw)?,
            None => defaults.server_port,
        };

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(positive("UPSTREAM_TIMEOUT_SECS", &raw)?),
            None => defaults.upstream_timeout,
        };

        let upstreams = match lookup("UPSTREAMS") {
            Some(raw) => UpstreamSpec::parse_list(&raw)?,
            None => defaults.upstreams,
        };

        Ok(Self {
            cache_capacity,
            cache_ttl,
            server_port,
            upstream_timeout,
            upstreams,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CAPACITY,
            cache_ttl: Some(Duration::from_millis(DEFAULT_TTL_MS)),
            server_port: 3000,
            upstream_timeout: Duration::from_secs(15),
            upstreams: UpstreamSpec::parse_list(DEFAULT_UPSTREAMS).unwrap_or_default(),
        }
    }
}

// Parses a strictly positive number; zero, negatives and garbage all fail.
fn positive<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr + PartialEq + Default,
{
    let raw = raw.trim();
    match raw.parse::<T>() {
        Ok(value) if value != T::default() => Ok(value),
        Ok(_) => Err(CacheError::InvalidConfig(format!(
            "{} must be greater than zero",
            name
        ))),
        Err(_) => Err(CacheError::InvalidConfig(format!(
            "{} must be a positive integer, got '{}'",
            name, raw
        ))),
    }
}

fn parse_ttl(raw: &str) -> Result<Option<Duration>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") || raw.eq_ignore_ascii_case("off") {
        return Ok(None);
    }
    positive::<u64>("CACHE_TTL_MS", raw).map(|ms| Some(Duration::from_millis(ms)))
}
