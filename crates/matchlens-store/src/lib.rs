//! Match Lens Record Store Accessor
//!
//! This crate provides access to the match table:
//! - PostgREST (Supabase) connector with a bounded readiness check
//! - Stand-in store for a table that stayed unreachable at startup
//! - JSON file store for exported rows
//! - Time-based cache and the injected store context used by the dashboard

pub mod cache;
pub mod client;
pub mod context;
pub mod error;
pub mod file;
pub mod postgrest;
pub mod unavailable;

pub use cache::{CacheConfig, RecordCache};
pub use context::StoreContext;
pub use error::{Result, StoreError};
pub use file::JsonFileStore;
pub use postgrest::{PostgrestConfig, PostgrestStore};
pub use unavailable::{UnavailableStore, connect_or_unavailable};
