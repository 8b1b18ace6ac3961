//! Cache-key derivation and the screening-run store contract.
//!
//! The engine is storage-agnostic: it derives a deterministic key from
//! normalized filters and defines the freshness rule. The persistence
//! collaborator implements [`ScreenCache`]; an in-memory implementation is
//! provided for tests and single-process callers.

use crate::types::{ScreenResult, ScreeningFilters};
use chrono::NaiveDate;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};

/// Filters with defaults materialized and patterns sorted, so the same
/// logical filter set always normalizes to identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFilters {
    pub min_price: f64,
    pub max_price: f64,
    pub min_volume: f64,
    pub min_market_cap: f64,
    /// `None` means unbounded.
    pub max_market_cap: Option<f64>,
    pub patterns: Vec<String>,
}

impl From<&ScreeningFilters> for NormalizedFilters {
    fn from(filters: &ScreeningFilters) -> Self {
        // BTreeSet iteration is already sorted and deduplicated.
        let patterns = filters.patterns.iter().cloned().collect();
        Self {
            min_price: filters.min_price(),
            max_price: filters.max_price(),
            min_volume: filters.min_volume(),
            min_market_cap: filters.min_market_cap(),
            max_market_cap: filters.max_market_cap,
            patterns,
        }
    }
}

/// Deterministic cache key: hex SHA-256 over the canonical JSON of the
/// normalized filters.
pub fn cache_key(filters: &ScreeningFilters) -> String {
    let normalized = NormalizedFilters::from(filters);
    // Struct field order is fixed, so the JSON encoding is canonical.
    let canonical =
        serde_json::to_string(&normalized).unwrap_or_else(|_| format!("{normalized:?}"));
    let digest = Sha256::digest(canonical.as_bytes());
    hex::encode(digest)
}

/// One cached screening run, keyed by `(cache_key, created_date)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub cache_key: String,
    pub filters: NormalizedFilters,
    pub results: Vec<ScreenResult>,
    pub created_date: NaiveDate,
    pub result_count: usize,
}

impl CacheEntry {
    pub fn new(
        filters: &ScreeningFilters,
        results: Vec<ScreenResult>,
        created_date: NaiveDate,
    ) -> Self {
        Self {
            cache_key: cache_key(filters),
            filters: NormalizedFilters::from(filters),
            result_count: results.len(),
            results,
            created_date,
        }
    }
}

/// Store contract for screening-run caching.
///
/// Writes must be upsert (last-writer-wins) so at most one entry per key
/// persists; entries dated before "today" are stale and purgeable.
pub trait ScreenCache: Send + Sync {
    /// Fetch a fresh entry: same key, created today.
    fn get(&self, cache_key: &str, today: NaiveDate) -> Option<CacheEntry>;

    /// Insert or replace the entry for its key, regardless of date.
    fn put(&self, entry: CacheEntry);

    /// Drop entries whose `created_date` is strictly before `today`.
    /// Returns the number purged.
    fn purge_stale(&self, today: NaiveDate) -> usize;
}

/// In-memory `ScreenCache` on a concurrent map; concurrent writes for the
/// same key resolve by last-writer-wins, preserving the one-entry-per-key
/// invariant.
#[derive(Default)]
pub struct MemoryScreenCache {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryScreenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScreenCache for MemoryScreenCache {
    fn get(&self, cache_key: &str, today: NaiveDate) -> Option<CacheEntry> {
        let entry = self.entries.get(cache_key)?;
        if entry.created_date == today {
            Some(entry.clone())
        } else {
            None
        }
    }

    fn put(&self, entry: CacheEntry) {
        self.entries.insert(entry.cache_key.clone(), entry);
    }

    fn purge_stale(&self, today: NaiveDate) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.created_date >= today);
        before - self.entries.len()
    }
}

/// A thread-safe cache with TTL support and bounded size, used for
/// symbol-universe lookups.
pub struct TtlCache<V> {
    data: DashMap<String, TtlEntry<V>>,
    default_ttl: Duration,
    capacity: usize,
}

struct TtlEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(default_ttl: Duration, capacity: usize) -> Self {
        Self {
            data: DashMap::new(),
            default_ttl,
            capacity,
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.data.get(key)?;
        if entry.expires_at > Instant::now() {
            Some(entry.value.clone())
        } else {
            drop(entry);
            self.data.remove(key);
            None
        }
    }

    pub fn set(&self, key: String, value: V) {
        let now = Instant::now();
        self.data.retain(|_, entry| entry.expires_at > now);
        // Bounded: drop an arbitrary entry when full rather than growing.
        if self.data.len() >= self.capacity {
            // Bind the key first so the iterator's shard lock is released
            // before the remove; otherwise this deadlocks.
            let victim = self.data.iter().next().map(|e| e.key().clone());
            if let Some(victim) = victim {
                self.data.remove(&victim);
            }
        }
        self.data.insert(
            key,
            TtlEntry {
                value,
                expires_at: now + self.default_ttl,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
