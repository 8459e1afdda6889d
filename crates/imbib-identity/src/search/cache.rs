//! Search result cache
//!
//! An explicit service owned by whoever runs searches; there is no global
//! instance. Entries expire after the configured TTL and the oldest entry is
//! evicted when the cache is full.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use impress_domain::Source;
use tracing::trace;

use crate::config::CacheConfig;
use crate::deduplication::CanonicalRecord;

/// Cache key: normalized query text plus the set of sources queried
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    query: String,
    sources: BTreeSet<&'static str>,
}

impl CacheKey {
    /// Query is trimmed and lower-cased; source order does not matter
    pub fn new(query: &str, sources: &[Source]) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            sources: sources.iter().map(Source::as_str).collect(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

struct CacheEntry {
    records: Vec<CanonicalRecord>,
    stored_at: DateTime<Utc>,
}

/// TTL cache of deduplicated search results
pub struct SearchCache {
    ttl: Duration,
    max_entries: usize,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl SearchCache {
    pub fn new(config: &CacheConfig) -> Self {
        // chrono caps durations at i64::MAX milliseconds
        let ttl_seconds = i64::try_from(config.ttl_seconds)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1_000);
        Self {
            ttl: Duration::seconds(ttl_seconds),
            max_entries: config.max_entries.max(1),
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.stored_at) < self.ttl
    }

    /// Fresh cached records for `key`
    pub fn get(&self, key: &CacheKey) -> Option<Vec<CanonicalRecord>> {
        self.get_at(key, Utc::now())
    }

    /// [`SearchCache::get`] against an explicit clock
    pub fn get_at(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<Vec<CanonicalRecord>> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(key)?;
        if self.is_fresh(entry, now) {
            trace!("cache hit for '{}'", key.query);
            Some(entry.records.clone())
        } else {
            None
        }
    }

    pub fn insert(&self, key: CacheKey, records: Vec<CanonicalRecord>) {
        self.insert_at(key, records, Utc::now());
    }

    /// [`SearchCache::insert`] against an explicit clock
    pub fn insert_at(&self, key: CacheKey, records: Vec<CanonicalRecord>, now: DateTime<Utc>) {
        let Ok(mut entries) = self.entries.write() else {
            return;
        };

        if !entries.contains_key(&key) && entries.len() >= self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                trace!("evicting cached query '{}'", oldest.query);
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key,
            CacheEntry {
                records,
                stored_at: now,
            },
        );
    }

    pub fn invalidate(&self, key: &CacheKey) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Drop expired entries, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let Ok(mut entries) = self.entries.write() else {
            return 0;
        };
        let before = entries.len();
        entries.retain(|_, entry| now.signed_duration_since(entry.stored_at) < self.ttl);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
