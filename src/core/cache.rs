//! Path-scoped cache of rendered pages
//!
//! Listing pages are rendered once per `(path, query string)` and served from
//! here until a write action calls [`RouteCache::revalidate_path`] for the
//! path, which drops every cached variant of it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Shared cache of rendered HTML keyed by path, then by query string
#[derive(Clone, Default)]
pub struct RouteCache {
    entries: Arc<RwLock<HashMap<String, HashMap<String, String>>>>,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached body for `path?query`, if still fresh
    pub fn get(&self, path: &str, query: &str) -> Option<String> {
        let entries = self.entries.read().ok()?;
        entries.get(path).and_then(|variants| variants.get(query)).cloned()
    }

    pub fn insert(&self, path: &str, query: &str, body: String) {
        // a poisoned lock only means a page is rendered again next time
        if let Ok(mut entries) = self.entries.write() {
            entries
                .entry(path.to_string())
                .or_default()
                .insert(query.to_string(), body);
        }
    }

    /// Mark every cached variant of `path` stale
    pub fn revalidate_path(&self, path: &str) {
        if let Ok(mut entries) = self.entries.write() {
            if let Some(variants) = entries.remove(path) {
                tracing::debug!(path, dropped = variants.len(), "revalidated cached path");
            }
        }
    }

    /// Number of cached variants of `path`
    pub fn len_for(&self, path: &str) -> usize {
        self.entries
            .read()
            .map(|entries| entries.get(path).map_or(0, HashMap::len))
            .unwrap_or(0)
    }
}
