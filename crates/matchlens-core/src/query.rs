//! Translation of dashboard filters into store queries
//!
//! `RecordQuery` is backend neutral: the PostgREST accessor encodes it as
//! URL parameters, the JSON file store evaluates it in memory.

use crate::filter::{DateRange, FilterCriteria, ResultFilter};
use crate::record::{MatchRecord, Outcome};
use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// Constraint on the `result` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeConstraint {
    #[default]
    Any,
    /// Exclude draws and error rows
    Decisive,
    /// Exactly `1/2-1/2`
    Draw,
}

/// A query against the match table, always ordered by date descending
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RecordQuery {
    /// Inclusive lower bound on `date`
    pub since: Option<DateTime<Utc>>,

    /// Model that must appear on either side
    pub model: Option<String>,

    pub outcome: OutcomeConstraint,
}

impl RecordQuery {
    /// Query with no constraints
    pub fn all() -> Self {
        Self::default()
    }

    /// Build the query for a filter selection relative to `now`
    ///
    /// Month and year ranges use calendar arithmetic; a day that does not
    /// exist in the target month clamps to its last day (Mar 31 minus one
    /// month is Feb 28/29).
    pub fn from_filters(filters: &FilterCriteria, now: DateTime<Utc>) -> Self {
        let since = match filters.date_range {
            DateRange::All => None,
            DateRange::Week => Some(now - Duration::days(7)),
            DateRange::Month => Some(
                now.checked_sub_months(Months::new(1))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            ),
            DateRange::Year => Some(
                now.checked_sub_months(Months::new(12))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            ),
        };

        let outcome = match filters.result {
            ResultFilter::All => OutcomeConstraint::Any,
            ResultFilter::Win => OutcomeConstraint::Decisive,
            ResultFilter::Draw => OutcomeConstraint::Draw,
        };

        Self {
            since,
            model: filters.model_id().map(str::to_string),
            outcome,
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.since.is_none() && self.model.is_none() && self.outcome == OutcomeConstraint::Any
    }

    /// Evaluate the query against one record
    ///
    /// Mirrors SQL comparison semantics: a record with no parseable date
    /// never satisfies a date bound, and a record with no result never
    /// satisfies an outcome constraint.
    pub fn matches(&self, record: &MatchRecord) -> bool {
        if let Some(since) = self.since {
            match record.played_at() {
                Some(played_at) if played_at >= since => {}
                _ => return false,
            }
        }

        if let Some(model) = self.model.as_deref() {
            if record.white_model() != Some(model) && record.black_model() != Some(model) {
                return false;
            }
        }

        match self.outcome {
            OutcomeConstraint::Any => true,
            OutcomeConstraint::Decisive => {
                record.result().is_some() && !record.outcome().is_undecided()
            }
            OutcomeConstraint::Draw => record.outcome() == Outcome::Draw,
        }
    }
}
