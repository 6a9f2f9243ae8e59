//! Query-string parsing with per-instance memoization.
//!
//! [`UriParser`] caches parsed query strings keyed by the literal query text,
//! with no eviction. The cache uses interior mutability and is deliberately
//! not `Sync`: callers running concurrent parses against shared state should
//! use per-thread instances or serialize access externally. The negotiation
//! engine itself never touches this cache.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use http::Uri;
use indexmap::IndexMap;
use tracing::trace;

/// Parses URI query strings into ordered maps, memoizing by the raw query text.
#[derive(Debug, Default)]
pub struct UriParser {
    parsed_query_cache: RefCell<HashMap<String, Arc<IndexMap<String, String>>>>,
    empty: Arc<IndexMap<String, String>>,
}

impl UriParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the query string of `uri` into an ordered key/value map.
    ///
    /// Repeated keys keep the last value; declaration order of distinct keys
    /// is preserved. A URI without a query yields an empty map. Undecodable
    /// query text also yields an empty map: query strings are not one of the
    /// validated header shapes, so they never error.
    pub fn parse_query_string(&self, uri: &Uri) -> Arc<IndexMap<String, String>> {
        let Some(query) = uri.query() else {
            return Arc::clone(&self.empty);
        };

        if let Some(parsed) = self.parsed_query_cache.borrow().get(query) {
            return Arc::clone(parsed);
        }

        let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(query) {
            Ok(pairs) => pairs,
            Err(e) => {
                trace!(cause = %e, query, "failed to decode query string");
                Vec::new()
            }
        };
        let parsed: Arc<IndexMap<String, String>> = Arc::new(pairs.into_iter().collect());

        self.parsed_query_cache.borrow_mut().insert(query.to_string(), Arc::clone(&parsed));
        parsed
    }
}
