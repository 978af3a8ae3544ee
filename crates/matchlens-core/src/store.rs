//! Record store trait
//!
//! The `RecordStore` trait abstracts the remote match table so the
//! dashboard can be driven by the PostgREST accessor in production and by
//! a file or in-memory store in tests and offline reports.

use async_trait::async_trait;

use crate::{MatchRecord, RecordQuery, Result};

/// Source of match records
///
/// Implementations:
/// - `PostgrestStore`: Supabase/PostgREST table over HTTP
/// - `JsonFileStore`: exported rows in a local JSON file
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every record satisfying `query`, newest first
    ///
    /// # Errors
    /// - `Error::StoreUnavailable` if the store cannot be reached
    /// - `Error::Query` if the store rejects the query
    /// - `Error::Serialization` if the rows cannot be decoded
    async fn fetch(&self, query: &RecordQuery) -> Result<Vec<MatchRecord>>;

    /// Short human-readable name used in logs
    fn describe(&self) -> String {
        "record store".to_string()
    }
}
