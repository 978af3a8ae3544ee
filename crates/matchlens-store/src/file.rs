//! JSON file record store
//!
//! Reads a JSON array of rows, as exported from the match table, and
//! evaluates queries in memory. Used for offline reports and tests.

use crate::Result;
use async_trait::async_trait;
use matchlens_core::{MatchRecord, RecordQuery, RecordStore};
use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Record store backed by a local JSON export
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<MatchRecord>> {
        let contents = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&contents)?)
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn fetch(&self, query: &RecordQuery) -> matchlens_core::Result<Vec<MatchRecord>> {
        let mut records: Vec<MatchRecord> = self
            .read_all()
            .await?
            .into_iter()
            .filter(|record| query.matches(record))
            .collect();

        // Newest first, undated rows last
        records.sort_by_cached_key(|record| Reverse(record.played_at()));

        debug!(
            "Loaded {} matching records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
