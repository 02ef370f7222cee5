//! Source Registry
//!
//! Maps source names to the upstreams that serve them.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{build_client, validate_source_name, HttpUpstream, Upstream, UpstreamSpec};
use crate::error::{CacheError, Result};

/// Named upstreams, iterated in name order.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: BTreeMap<String, Arc<dyn Upstream>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds HTTP upstreams for every spec, sharing one client.
    pub fn from_specs(specs: &[UpstreamSpec], timeout: std::time::Duration) -> Result<Self> {
        let client = build_client(timeout)?;
        let mut registry = Self::new();
        for spec in specs {
            registry.register(Arc::new(HttpUpstream::new(spec.clone(), client.clone())))?;
        }
        Ok(registry)
    }

    /// Adds an upstream under its own name.
    ///
    /// # Errors
    /// `InvalidConfig` for a malformed or duplicate name.
    pub fn register(&mut self, upstream: Arc<dyn Upstream>) -> Result<()> {
        let name = upstream.name().to_string();
        validate_source_name(&name)?;
        if self.sources.contains_key(&name) {
            return Err(CacheError::InvalidConfig(format!(
                "Source '{}' registered twice",
                name
            )));
        }
        self.sources.insert(name, upstream);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Upstream>> {
        self.sources.get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.sources.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("sources", &self.names())
            .finish()
    }
}
