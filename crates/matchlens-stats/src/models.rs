//! Data models handed to the rendering layer

use serde::{Deserialize, Serialize};

/// Headline statistics for the stat cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    pub total_games: u64,
    pub total_draws: u64,
    /// Invalid moves per game, rounded to 2 decimals
    pub avg_invalid_moves: f64,
    /// Percentage of games won by white, rounded to 1 decimal
    pub white_win_rate: f64,
}

/// Chart-ready series with index-aligned labels and values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries<T> {
    pub labels: Vec<String>,
    pub data: Vec<T>,
}

impl<T> Default for ChartSeries<T> {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            data: Vec::new(),
        }
    }
}

impl<T> ChartSeries<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: T) {
        self.labels.push(label.into());
        self.data.push(value);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(label, value)` pairs in series order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.labels.iter().map(String::as_str).zip(self.data.iter())
    }
}

impl<T, S: Into<String>> FromIterator<(S, T)> for ChartSeries<T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut series = ChartSeries::new();
        for (label, value) in iter {
            series.push(label, value);
        }
        series
    }
}

/// Count of games per classified result
///
/// The five counters always add up to the number of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeBreakdown {
    pub white_wins: u64,
    pub black_wins: u64,
    pub draws: u64,
    pub errors: u64,
    pub other: u64,
}

impl OutcomeBreakdown {
    pub fn total(&self) -> u64 {
        self.white_wins + self.black_wins + self.draws + self.errors + self.other
    }
}

/// One row of the recent games table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowView {
    pub date: String,
    pub white: String,
    pub black: String,
    pub result: String,
    pub winner: String,
    pub termination: String,
    pub invalid_moves: u32,
}

/// Display strings for the four stat cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCards {
    pub total_games: String,
    pub total_draws: String,
    pub avg_invalid_moves: String,
    pub white_win_rate: String,
}

/// Table row style keyed by result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowStyle {
    #[serde(rename = "table-light")]
    Light,
    #[serde(rename = "table-dark")]
    Dark,
    #[serde(rename = "table-secondary")]
    Secondary,
    #[serde(rename = "table-danger")]
    Danger,
}

impl RowStyle {
    /// CSS class name understood by the table renderer
    pub fn class_name(self) -> &'static str {
        match self {
            RowStyle::Light => "table-light",
            RowStyle::Dark => "table-dark",
            RowStyle::Secondary => "table-secondary",
            RowStyle::Danger => "table-danger",
        }
    }
}
