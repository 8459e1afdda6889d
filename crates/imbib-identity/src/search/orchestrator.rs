//! Search fan-out and deduplication
//!
//! Backends are supplied by the host and already hold whatever transport
//! they need; the orchestrator only sequences them, merges their results
//! and caches the deduplicated records.

use std::sync::Arc;

use impress_domain::{RawResult, Source};
use tracing::{debug, info, warn};

use super::cache::{CacheKey, SearchCache};
use crate::deduplication::{deduplicate, CanonicalRecord};
use crate::error::{BackendError, IdentityError, Result};

/// A search source the host has wired up.
pub trait SearchBackend: Send + Sync {
    fn source(&self) -> Source;

    /// Run `query` and return this source's raw hits
    fn search(&self, query: &str) -> std::result::Result<Vec<RawResult>, BackendError>;
}

/// Result of one orchestrated search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub records: Vec<CanonicalRecord>,
    /// Whether the records came from the cache
    pub from_cache: bool,
    /// Backends that failed; their results are missing from `records`
    pub failures: Vec<BackendError>,
}

/// Queries every registered backend and deduplicates the combined hits.
pub struct SearchOrchestrator {
    backends: Vec<Box<dyn SearchBackend>>,
    cache: Arc<SearchCache>,
}

impl SearchOrchestrator {
    pub fn new(cache: Arc<SearchCache>) -> Self {
        Self {
            backends: Vec::new(),
            cache,
        }
    }

    /// Register a backend; backends are queried in registration order
    pub fn with_backend(mut self, backend: impl SearchBackend + 'static) -> Self {
        self.backends.push(Box::new(backend));
        self
    }

    pub fn sources(&self) -> Vec<Source> {
        self.backends.iter().map(|b| b.source()).collect()
    }

    pub fn cache(&self) -> &SearchCache {
        &self.cache
    }

    /// Search all backends.
    ///
    /// Failing backends are skipped and reported in the outcome. Only
    /// complete results are cached. Fails only when every backend failed.
    pub fn search(&self, query: &str) -> Result<SearchOutcome> {
        let key = CacheKey::new(query, &self.sources());
        if let Some(records) = self.cache.get(&key) {
            debug!("serving '{}' from cache ({} records)", key.query(), records.len());
            return Ok(SearchOutcome {
                records,
                from_cache: true,
                failures: Vec::new(),
            });
        }

        let mut results = Vec::new();
        let mut failures = Vec::new();
        for backend in &self.backends {
            match backend.search(query) {
                Ok(hits) => {
                    debug!("{} returned {} results", backend.source().as_str(), hits.len());
                    results.extend(hits);
                }
                Err(e) => {
                    warn!("{} search failed: {}", backend.source().as_str(), e);
                    failures.push(e);
                }
            }
        }

        if !self.backends.is_empty() && failures.len() == self.backends.len() {
            if let Some(last) = failures.pop() {
                return Err(IdentityError::Backend(last));
            }
        }

        let raw_count = results.len();
        let records = deduplicate(results);
        info!(
            "search '{}': {} results from {} sources, {} unique",
            key.query(),
            raw_count,
            self.backends.len() - failures.len(),
            records.len()
        );

        if failures.is_empty() {
            self.cache.insert(key, records.clone());
        }

        Ok(SearchOutcome {
            records,
            from_cache: false,
            failures,
        })
    }
}
