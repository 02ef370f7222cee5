//! Cache Key Module
//!
//! Builds deterministic string keys from a namespace and request parameters.

use std::fmt::{self, Display};

// == Cache Key ==
/// A `namespace:part:part` key.
///
/// Each component escapes `\` and `:` so that different parameter lists
/// can never render to the same string.
///
/// ```
/// use lookup_cache::cache::CacheKey;
///
/// let key = CacheKey::new("fedregister").part("ai act").part(10);
/// assert_eq!(key.as_str(), "fedregister:ai act:10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Starts a key in the given namespace.
    pub fn new(namespace: impl Display) -> Self {
        let mut key = String::new();
        push_escaped(&mut key, &namespace.to_string());
        Self(key)
    }

    /// Appends one parameter.
    pub fn part(mut self, part: impl Display) -> Self {
        self.0.push(':');
        push_escaped(&mut self.0, &part.to_string());
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

fn push_escaped(out: &mut String, raw: &str) {
    for ch in raw.chars() {
        if ch == '\\' || ch == ':' {
            out.push('\\');
        }
        out.push(ch);
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.0
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
