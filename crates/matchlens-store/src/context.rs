//! Store context injected into the dashboard
//!
//! Bundles the record store with its cache so loading code receives both
//! explicitly instead of reaching for process-wide state.

use crate::cache::{CacheConfig, RecordCache};
use chrono::Utc;
use matchlens_core::{FilterCriteria, MatchRecord, RecordQuery, RecordStore, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

pub struct StoreContext {
    store: Arc<dyn RecordStore>,
    cache: RecordCache,
}

impl StoreContext {
    pub fn new(store: Arc<dyn RecordStore>, cache: CacheConfig) -> Self {
        Self {
            store,
            cache: RecordCache::new(cache),
        }
    }

    /// Records matching `filters`, newest first
    ///
    /// Served from the cache when the filters are unchanged since the last
    /// fetch and the entry is still fresh, unless `force_refresh` is set.
    /// A failed fetch leaves the cache as it was.
    pub async fn records(
        &self,
        filters: &FilterCriteria,
        force_refresh: bool,
    ) -> Result<Arc<Vec<MatchRecord>>> {
        if !force_refresh {
            if let Some(records) = self.cache.get(filters, Instant::now()) {
                debug!("Serving {} match records from cache", records.len());
                return Ok(records);
            }
        }

        let query = RecordQuery::from_filters(filters, Utc::now());
        let records = match self.store.fetch(&query).await {
            Ok(records) => Arc::new(records),
            Err(e) => {
                error!("Failed to fetch match records from {}: {}", self.store.describe(), e);
                return Err(e);
            }
        };

        self.cache
            .put(filters.clone(), Arc::clone(&records), Instant::now());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use matchlens_core::{DateRange, Error};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    /// Store that counts fetches and can be switched into failure
    #[derive(Default)]
    struct CountingStore {
        fetches: AtomicUsize,
        failing: AtomicBool,
    }

    #[async_trait]
    impl RecordStore for CountingStore {
        async fn fetch(&self, _query: &RecordQuery) -> Result<Vec<MatchRecord>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(Error::Query {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(vec![MatchRecord::default()])
        }
    }

    fn context(store: Arc<CountingStore>, freshness: Duration) -> StoreContext {
        StoreContext::new(store, CacheConfig { freshness })
    }

    #[tokio::test]
    async fn test_second_load_hits_cache() {
        let store = Arc::new(CountingStore::default());
        let ctx = context(store.clone(), Duration::from_secs(300));

        ctx.records(&FilterCriteria::default(), false).await.unwrap();
        ctx.records(&FilterCriteria::default(), false).await.unwrap();
        assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_cache() {
        let store = Arc::new(CountingStore::default());
        let ctx = context(store.clone(), Duration::from_secs(300));

        ctx.records(&FilterCriteria::default(), false).await.unwrap();
        ctx.records(&FilterCriteria::default(), true).await.unwrap();
        assert_eq!(store.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_filter_change_refetches() {
        let store = Arc::new(CountingStore::default());
        let ctx = context(store.clone(), Duration::from_secs(300));

        ctx.records(&FilterCriteria::default(), false).await.unwrap();
        let week = FilterCriteria::default().with_date_range(DateRange::Week);
        ctx.records(&week, false).await.unwrap();
        ctx.records(&week, false).await.unwrap();
        assert_eq!(store.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_freshness_never_caches() {
        let store = Arc::new(CountingStore::default());
        let ctx = context(store.clone(), Duration::ZERO);

        ctx.records(&FilterCriteria::default(), false).await.unwrap();
        ctx.records(&FilterCriteria::default(), false).await.unwrap();
        assert_eq!(store.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_propagates_and_keeps_cache() {
        let store = Arc::new(CountingStore::default());
        let ctx = context(store.clone(), Duration::from_secs(300));

        ctx.records(&FilterCriteria::default(), false).await.unwrap();
        store.failing.store(true, Ordering::SeqCst);

        let err = ctx.records(&FilterCriteria::default(), true).await.unwrap_err();
        assert!(matches!(err, Error::Query { status: 500, .. }));

        // The earlier snapshot is still served without a refetch
        let cached = ctx.records(&FilterCriteria::default(), false).await.unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(store.fetches.load(Ordering::SeqCst), 2);
    }
}
