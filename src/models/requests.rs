//! Request DTOs for the lookup API
//!
//! Defines the query-string parameters accepted by incoming requests.

use serde::Deserialize;

use crate::error::Result;
use crate::upstream::Query;

/// Query parameters for GET /lookup/:source
///
/// # Fields
/// - `q`: The search text
/// - `limit`: Optional maximum number of results (default 10)
#[derive(Debug, Clone, Deserialize)]
pub struct LookupParams {
    /// The search text
    #[serde(default)]
    pub q: String,
    /// Optional result limit
    #[serde(default)]
    pub limit: Option<u32>,
}

impl LookupParams {
    /// Validates the parameters into an upstream query.
    pub fn into_query(self) -> Result<Query> {
        Query::new(&self.q, self.limit)
    }
}
