//! Statistics over a collection of match records

use crate::models::{BasicStats, ChartSeries, OutcomeBreakdown};
use matchlens_core::{MatchRecord, Outcome};
use std::collections::HashMap;

/// Number of models kept in the invalid moves chart
pub const INVALID_MOVES_TOP_N: usize = 10;

/// Round to a fixed number of decimals
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Keyed accumulator that remembers first-seen key order
struct Grouped<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V: Default> Grouped<V> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn entry(&mut self, key: &str) -> &mut V {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.entries.push((key.to_string(), V::default()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[slot].1
    }

    fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

fn count_by<'a>(keys: impl Iterator<Item = &'a str>) -> ChartSeries<u64> {
    let mut counts = Grouped::<u64>::new();
    for key in keys {
        *counts.entry(key) += 1;
    }
    counts.into_entries().into_iter().collect()
}

/// Headline statistics
///
/// Missing and null `invalid_moves` both count as zero here.
pub fn basic_stats(records: &[MatchRecord]) -> BasicStats {
    if records.is_empty() {
        return BasicStats::default();
    }

    let total_games = records.len() as u64;
    let breakdown = outcome_breakdown(records);
    let total_invalid: u64 = records
        .iter()
        .map(|r| u64::from(r.invalid_move_count()))
        .sum();

    BasicStats {
        total_games,
        total_draws: breakdown.draws,
        avg_invalid_moves: round_to(total_invalid as f64 / total_games as f64, 2),
        white_win_rate: round_to(
            breakdown.white_wins as f64 / total_games as f64 * 100.0,
            1,
        ),
    }
}

/// Count of games per classified result
pub fn outcome_breakdown(records: &[MatchRecord]) -> OutcomeBreakdown {
    let mut breakdown = OutcomeBreakdown::default();
    for record in records {
        match record.outcome() {
            Outcome::WhiteWin => breakdown.white_wins += 1,
            Outcome::BlackWin => breakdown.black_wins += 1,
            Outcome::Draw => breakdown.draws += 1,
            Outcome::Error => breakdown.errors += 1,
            Outcome::Unknown => breakdown.other += 1,
        }
    }
    breakdown
}

/// Wins per model, in order of each model's first win
///
/// Draws and error rows never credit a winner even when one is recorded.
pub fn model_wins(records: &[MatchRecord]) -> ChartSeries<u64> {
    count_by(
        records
            .iter()
            .filter(|r| !r.outcome().is_undecided())
            .filter_map(MatchRecord::winner),
    )
}

/// White wins, black wins and draws; always all three labels
pub fn color_wins(records: &[MatchRecord]) -> ChartSeries<u64> {
    let breakdown = outcome_breakdown(records);
    ChartSeries {
        labels: vec!["White".to_string(), "Black".to_string(), "Draw".to_string()],
        data: vec![breakdown.white_wins, breakdown.black_wins, breakdown.draws],
    }
}

/// Games per termination reason, in first-seen order
pub fn termination_reasons(records: &[MatchRecord]) -> ChartSeries<u64> {
    count_by(records.iter().filter_map(MatchRecord::termination_reason))
}

#[derive(Default)]
struct InvalidTally {
    attributed: f64,
    games: u32,
}

/// Average invalid moves per game for each model, top ten
///
/// Invalid moves are recorded per game, not per side, so each game's count
/// is split evenly and credited to both models. Games whose row lacks the
/// column are left out of both the sum and the game count; a null count is
/// a game with zero invalid moves. Ties keep the order in which models
/// first appeared.
pub fn invalid_moves_by_model(records: &[MatchRecord]) -> ChartSeries<f64> {
    let mut tallies = Grouped::<InvalidTally>::new();

    for record in records {
        let Some(invalid) = record.recorded_invalid_moves() else {
            continue;
        };
        let half = f64::from(invalid) / 2.0;

        for model in [record.white_model(), record.black_model()]
            .into_iter()
            .flatten()
        {
            let tally = tallies.entry(model);
            tally.attributed += half;
            tally.games += 1;
        }
    }

    let mut averages: Vec<(String, f64)> = tallies
        .into_entries()
        .into_iter()
        .map(|(model, tally)| (model, tally.attributed / f64::from(tally.games)))
        .collect();

    // sort_by is stable, equal averages stay in first-seen order
    averages.sort_by(|a, b| b.1.total_cmp(&a.1));
    averages.truncate(INVALID_MOVES_TOP_N);

    averages
        .into_iter()
        .map(|(model, avg)| (model, round_to(avg, 2)))
        .collect()
}

/// Every model that played either side, in first-seen order
pub fn unique_models(records: &[MatchRecord]) -> Vec<String> {
    let mut seen = Grouped::<()>::new();
    for record in records {
        for model in [record.white_model(), record.black_model()]
            .into_iter()
            .flatten()
        {
            seen.entry(model);
        }
    }
    seen.into_entries().into_iter().map(|(model, _)| model).collect()
}

#[cfg(test)]
mod tests;
