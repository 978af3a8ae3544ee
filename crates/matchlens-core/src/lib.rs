//! Match Lens Core Types and Traits
//!
//! This crate provides the fundamental types and traits used throughout Match Lens:
//! - Match records as stored by the match runner
//! - Dashboard filter criteria and their translation into store queries
//! - The record store trait abstraction
//! - Core error types

pub mod error;
pub mod filter;
pub mod query;
pub mod record;
pub mod store;

pub use error::{Error, Result};
pub use filter::{DateRange, FilterCriteria, ResultFilter};
pub use query::{OutcomeConstraint, RecordQuery};
pub use record::{MatchRecord, Outcome};
pub use store::RecordStore;
