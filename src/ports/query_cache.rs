//! QueryCache port - Invalidation interface of the client's data cache.
//!
//! The cache itself (fetching, storage, refetch scheduling) lives outside
//! this crate. Realtime consumers only mark entries stale.

use std::fmt;

/// Key of a cached query, e.g. `blog/65a1f0` or `trending-blogs`.
///
/// The first segment names the query family; the rest identify the entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    /// Key for a whole query family.
    pub fn family(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Key for one entry of a family.
    pub fn entry(name: impl Into<String>, id: impl fmt::Display) -> Self {
        Self(vec![name.into(), id.to_string()])
    }

    /// Query family name.
    pub fn family_name(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    /// Key segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Port for invalidating cached queries.
pub trait QueryCache: Send + Sync {
    /// Marks every cached query whose key starts with `key` as stale.
    fn invalidate(&self, key: &QueryKey);
}
