//! Presentation formatting for the stat cards and recent games table

use crate::models::{BasicStats, RowStyle, RowView, StatCards};
use chrono::{DateTime, Utc};
use matchlens_core::record::{RESULT_BLACK_WIN, RESULT_DRAW, RESULT_ERROR, RESULT_WHITE_WIN};
use matchlens_core::MatchRecord;
use std::cmp::Reverse;

/// Rows shown in the recent games table
pub const DEFAULT_RECENT_LIMIT: usize = 10;

const UNKNOWN: &str = "Unknown";
const NO_WINNER: &str = "N/A";
const INVALID_DATE: &str = "Invalid Date";

/// Format a timestamp the way the dashboard shows it (`Jan 1, 2024, 09:05 AM`)
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y, %I:%M %p").to_string()
}

fn display_date(record: &MatchRecord) -> String {
    match (record.date(), record.played_at()) {
        (None, _) => UNKNOWN.to_string(),
        (Some(_), Some(timestamp)) => format_timestamp(timestamp),
        (Some(_), None) => INVALID_DATE.to_string(),
    }
}

fn or_fallback(value: Option<&str>, fallback: &str) -> String {
    value.unwrap_or(fallback).to_string()
}

/// The most recent games as display rows, newest first
///
/// Works on a sorted copy; the caller's slice is untouched. Records with a
/// missing or unparseable date sort as the oldest, and records with equal
/// dates keep their input order.
pub fn recent_games(records: &[MatchRecord], limit: usize) -> Vec<RowView> {
    let mut ordered: Vec<&MatchRecord> = records.iter().collect();
    ordered.sort_by_cached_key(|record| Reverse(record.played_at()));

    ordered
        .into_iter()
        .take(limit)
        .map(|record| RowView {
            date: display_date(record),
            white: or_fallback(record.white_model(), UNKNOWN),
            black: or_fallback(record.black_model(), UNKNOWN),
            result: or_fallback(record.result(), UNKNOWN),
            winner: or_fallback(record.winner(), NO_WINNER),
            termination: or_fallback(record.termination_reason(), UNKNOWN),
            invalid_moves: record.invalid_move_count(),
        })
        .collect()
}

/// Display strings for the stat cards
pub fn stat_cards(stats: &BasicStats) -> StatCards {
    StatCards {
        total_games: stats.total_games.to_string(),
        total_draws: stats.total_draws.to_string(),
        avg_invalid_moves: format!("{:.2}", stats.avg_invalid_moves),
        white_win_rate: format!("{:.1}%", stats.white_win_rate),
    }
}

/// Row style for a raw result string, `None` for anything unrecognised
pub fn row_style(result: &str) -> Option<RowStyle> {
    match result {
        RESULT_WHITE_WIN => Some(RowStyle::Light),
        RESULT_BLACK_WIN => Some(RowStyle::Dark),
        RESULT_DRAW => Some(RowStyle::Secondary),
        RESULT_ERROR => Some(RowStyle::Danger),
        _ => None,
    }
}
