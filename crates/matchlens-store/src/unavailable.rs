//! Stand-in store for a match table that could not be reached at startup
//!
//! Every fetch fails with `StoreUnavailable`, so the dashboard stays up and
//! answers with its failure notice instead of the process exiting.

use crate::postgrest::{PostgrestConfig, PostgrestStore};
use async_trait::async_trait;
use matchlens_core::{Error, MatchRecord, RecordQuery, RecordStore};
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[async_trait]
impl RecordStore for UnavailableStore {
    async fn fetch(&self, _query: &RecordQuery) -> matchlens_core::Result<Vec<MatchRecord>> {
        Err(Error::StoreUnavailable(self.reason.clone()))
    }

    fn describe(&self) -> String {
        "unavailable store".to_string()
    }
}

/// Connect to the table, falling back to an `UnavailableStore` when the
/// readiness check gives up
pub async fn connect_or_unavailable(config: PostgrestConfig) -> Arc<dyn RecordStore> {
    match PostgrestStore::connect(config).await {
        Ok(store) => {
            let store: Arc<dyn RecordStore> = Arc::new(store);
            store
        }
        Err(e) => {
            error!("Match store is not reachable, serving without data: {}", e);
            let store: Arc<dyn RecordStore> = Arc::new(UnavailableStore::new(e.to_string()));
            store
        }
    }
}
