//! Time-based cache for the last successful fetch
//!
//! One slot holds the filters of the last fetch, its records and when they
//! were fetched. Reads and updates go through a lock so the slot can be
//! shared between tasks.

use matchlens_core::{FilterCriteria, MatchRecord};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Cache configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum age of cached records before a re-fetch is required
    pub freshness: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness: Duration::from_secs(5 * 60),
        }
    }
}

#[derive(Debug)]
struct CachedFetch {
    filters: FilterCriteria,
    records: Arc<Vec<MatchRecord>>,
    fetched_at: Instant,
}

/// Single-slot record cache
#[derive(Debug)]
pub struct RecordCache {
    config: CacheConfig,
    slot: RwLock<Option<CachedFetch>>,
}

impl RecordCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            slot: RwLock::new(None),
        }
    }

    pub fn freshness(&self) -> Duration {
        self.config.freshness
    }

    /// Cached records for `filters` if they are younger than the freshness window
    pub fn get(&self, filters: &FilterCriteria, now: Instant) -> Option<Arc<Vec<MatchRecord>>> {
        let slot = self.slot.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        slot.as_ref()
            .filter(|cached| &cached.filters == filters)
            .filter(|cached| now.saturating_duration_since(cached.fetched_at) < self.config.freshness)
            .map(|cached| Arc::clone(&cached.records))
    }

    /// Replace the slot with a fresh fetch
    pub fn put(&self, filters: FilterCriteria, records: Arc<Vec<MatchRecord>>, now: Instant) {
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(CachedFetch {
            filters,
            records,
            fetched_at: now,
        });
    }
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
