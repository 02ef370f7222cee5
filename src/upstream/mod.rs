//! Upstream Module
//!
//! External data sources that sit behind the cache.
//!
//! # Components
//! - `Upstream` trait: one named source answering text queries
//! - `HttpUpstream`: a JSON/HTML endpoint reached over HTTP GET
//! - `SourceRegistry`: name to upstream lookup

mod http;
mod registry;

use async_trait::async_trait;

use crate::error::{CacheError, Result};

pub use http::{build_client, HttpUpstream};
pub use registry::SourceRegistry;

// == Limits ==
/// Result limit used when a query does not give one
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest result limit a query may ask for
pub const MAX_LIMIT: u32 = 100;

// == Query ==
/// A search request against one upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Search text, trimmed
    pub text: String,
    /// Maximum number of results requested
    pub limit: u32,
}

impl Query {
    /// Builds a validated query.
    ///
    /// # Errors
    /// `InvalidRequest` for blank text or a limit outside `1..=MAX_LIMIT`.
    pub fn new(text: &str, limit: Option<u32>) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CacheError::InvalidRequest(
                "Query text cannot be empty".to_string(),
            ));
        }

        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 || limit > MAX_LIMIT {
            return Err(CacheError::InvalidRequest(format!(
                "Limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }

        Ok(Self {
            text: text.to_string(),
            limit,
        })
    }
}

// == Upstream Trait ==
/// A named, slow or unreliable data source.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Registry name, also the cache key namespace.
    fn name(&self) -> &str;

    /// Performs the real lookup. Never consults the cache.
    async fn fetch(&self, query: &Query) -> Result<String>;
}

// == Upstream Spec ==
/// Configuration for one [`HttpUpstream`].
///
/// Text form: `name=base_url|query_param|limit_param`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamSpec {
    pub name: String,
    pub base_url: String,
    pub query_param: String,
    pub limit_param: String,
}

impl UpstreamSpec {
    /// Parses one `name=base_url|query_param|limit_param` entry.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: &str| {
            CacheError::InvalidConfig(format!("Invalid upstream '{}': {}", raw.trim(), reason))
        };

        let (name, rest) = raw
            .trim()
            .split_once('=')
            .ok_or_else(|| invalid("expected name=url|query_param|limit_param"))?;
        let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
        let [base_url, query_param, limit_param] = parts.as_slice() else {
            return Err(invalid("expected url|query_param|limit_param"));
        };

        let name = name.trim();
        validate_source_name(name).map_err(|_| invalid("name must use [A-Za-z0-9_-]"))?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(invalid("url must start with http:// or https://"));
        }
        if query_param.is_empty() || limit_param.is_empty() {
            return Err(invalid("parameter names cannot be empty"));
        }

        Ok(Self {
            name: name.to_string(),
            base_url: base_url.to_string(),
            query_param: query_param.to_string(),
            limit_param: limit_param.to_string(),
        })
    }

    /// Parses `;`-separated entries, skipping blank ones.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>> {
        raw.split(';')
            .filter(|entry| !entry.trim().is_empty())
            .map(Self::parse)
            .collect()
    }
}

/// Checks that a source name is non-empty and uses only `[A-Za-z0-9_-]`.
pub fn validate_source_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(CacheError::InvalidConfig(format!(
            "Invalid source name '{}'",
            name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_trims_and_defaults() {
        let query = Query::new("  ai act  ", None).unwrap();
        assert_eq!(query.text, "ai act");
        assert_eq!(query.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_query_rejects_blank_text() {
        assert!(matches!(
            Query::new("   ", Some(5)),
            Err(CacheError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_query_limit_bounds() {
        assert!(Query::new("gdpr", Some(1)).is_ok());
        assert!(Query::new("gdpr", Some(MAX_LIMIT)).is_ok());
        assert!(Query::new("gdpr", Some(0)).is_err());
        assert!(Query::new("gdpr", Some(MAX_LIMIT + 1)).is_err());
    }

    #[test]
    fn test_spec_parse() {
        let spec = UpstreamSpec::parse(
            "federalregister=https://www.federalregister.gov/api/v1/articles.json|conditions[term]|per_page",
        )
        .unwrap();

        assert_eq!(spec.name, "federalregister");
        assert_eq!(spec.base_url, "https://www.federalregister.gov/api/v1/articles.json");
        assert_eq!(spec.query_param, "conditions[term]");
        assert_eq!(spec.limit_param, "per_page");
    }

    #[test]
    fn test_spec_parse_list() {
        let specs =
            UpstreamSpec::parse_list("a=http://a.test/s|q|n; ;b=https://b.test/find|term|size;")
                .unwrap();
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_spec_parse_rejects_malformed() {
        for raw in [
            "no-equals-sign",
            "a=http://a.test|q",
            "a=ftp://a.test|q|n",
            "bad name=http://a.test|q|n",
            "a:b=http://a.test|q|n",
            "a=http://a.test||n",
        ] {
            assert!(
                matches!(UpstreamSpec::parse(raw), Err(CacheError::InvalidConfig(_))),
                "{} should be rejected",
                raw
            );
        }
    }
}
