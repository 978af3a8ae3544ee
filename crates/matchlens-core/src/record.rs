//! Match records as stored by the match runner

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Result string for a white win
pub const RESULT_WHITE_WIN: &str = "1-0";
/// Result string for a black win
pub const RESULT_BLACK_WIN: &str = "0-1";
/// Result string for a draw
pub const RESULT_DRAW: &str = "1/2-1/2";
/// Result string written when a game was aborted by an error
pub const RESULT_ERROR: &str = "ERR";

/// One completed AI-vs-AI game
///
/// Every field is optional because rows written by older runners may lack
/// columns. Columns not listed here (`id`, `moves`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Run identifier (`YYYYMMDD_HHMMSS`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,

    /// ISO-8601 timestamp of the game
    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub white_model: Option<String>,

    #[serde(default)]
    pub black_model: Option<String>,

    /// One of `1-0`, `0-1`, `1/2-1/2`, `ERR`, or anything the runner wrote
    #[serde(default)]
    pub result: Option<String>,

    /// Model id of the winner, absent for draws and errors
    #[serde(default)]
    pub winner: Option<String>,

    #[serde(default)]
    pub termination_reason: Option<String>,

    /// Invalid move attempts made during the game (both sides combined)
    ///
    /// `None` when the column is missing from the row, `Some(None)` when it
    /// is present but null.
    #[serde(
        default,
        deserialize_with = "present_column",
        skip_serializing_if = "Option::is_none"
    )]
    pub invalid_moves: Option<Option<u32>>,
}

/// Marks a column as present even when its value is null
fn present_column<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Classified game result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    WhiteWin,
    BlackWin,
    Draw,
    Error,
    /// Absent or unrecognised result string
    Unknown,
}

impl Outcome {
    /// Classify a raw result string
    pub fn parse(result: Option<&str>) -> Self {
        match result {
            Some(RESULT_WHITE_WIN) => Outcome::WhiteWin,
            Some(RESULT_BLACK_WIN) => Outcome::BlackWin,
            Some(RESULT_DRAW) => Outcome::Draw,
            Some(RESULT_ERROR) => Outcome::Error,
            _ => Outcome::Unknown,
        }
    }

    /// True for draws and error rows, which never credit a winner
    pub fn is_undecided(self) -> bool {
        matches!(self, Outcome::Draw | Outcome::Error)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl MatchRecord {
    pub fn date(&self) -> Option<&str> {
        non_empty(&self.date)
    }

    pub fn white_model(&self) -> Option<&str> {
        non_empty(&self.white_model)
    }

    pub fn black_model(&self) -> Option<&str> {
        non_empty(&self.black_model)
    }

    pub fn result(&self) -> Option<&str> {
        non_empty(&self.result)
    }

    pub fn winner(&self) -> Option<&str> {
        non_empty(&self.winner)
    }

    pub fn termination_reason(&self) -> Option<&str> {
        non_empty(&self.termination_reason)
    }

    /// Invalid moves when the column was recorded, null read as zero
    pub fn recorded_invalid_moves(&self) -> Option<u32> {
        self.invalid_moves.map(|count| count.unwrap_or(0))
    }

    /// Invalid moves with missing and null both read as zero
    pub fn invalid_move_count(&self) -> u32 {
        self.recorded_invalid_moves().unwrap_or(0)
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::parse(self.result())
    }

    /// Parsed game timestamp, `None` when the date is absent or unparseable
    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        self.date().and_then(parse_timestamp)
    }
}

/// Parse the timestamp shapes found in the match table
///
/// Accepts RFC 3339 (`2024-01-01T10:00:00Z`), naive timestamps as written
/// by Python's `isoformat()` (read as UTC) and bare dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
