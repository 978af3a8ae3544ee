//! Dashboard filter criteria
//!
//! Filters only shape the query sent to the record store. Aggregation
//! works on whatever record set comes back.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel used by the model selector for "no model constraint"
pub const ALL_MODELS: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFilter {
    #[default]
    All,
    /// Decisive games only (no draws, no error rows)
    Win,
    Draw,
}

/// Filter selection as submitted by the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub date_range: DateRange,

    /// Model id, or `"all"`
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub result: ResultFilter,
}

fn default_model() -> String {
    ALL_MODELS.to_string()
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            date_range: DateRange::default(),
            model: default_model(),
            result: ResultFilter::default(),
        }
    }
}

impl FilterCriteria {
    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_result(mut self, result: ResultFilter) -> Self {
        self.result = result;
        self
    }

    /// The selected model, `None` when every model is selected
    pub fn model_id(&self) -> Option<&str> {
        let model = self.model.trim();
        if model.is_empty() || model.eq_ignore_ascii_case(ALL_MODELS) {
            None
        } else {
            Some(model)
        }
    }

    /// True when no criterion constrains the query
    pub fn is_unfiltered(&self) -> bool {
        self.date_range == DateRange::All
            && self.result == ResultFilter::All
            && self.model_id().is_none()
    }
}

impl FromStr for DateRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(DateRange::All),
            "week" => Ok(DateRange::Week),
            "month" => Ok(DateRange::Month),
            "year" => Ok(DateRange::Year),
            other => Err(Error::InvalidFilter(format!("unknown date range '{}'", other))),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DateRange::All => "all",
            DateRange::Week => "week",
            DateRange::Month => "month",
            DateRange::Year => "year",
        };
        f.write_str(s)
    }
}

impl FromStr for ResultFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ResultFilter::All),
            "win" => Ok(ResultFilter::Win),
            "draw" => Ok(ResultFilter::Draw),
            other => Err(Error::InvalidFilter(format!("unknown result filter '{}'", other))),
        }
    }
}

impl fmt::Display for ResultFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResultFilter::All => "all",
            ResultFilter::Win => "win",
            ResultFilter::Draw => "draw",
        };
        f.write_str(s)
    }
}
