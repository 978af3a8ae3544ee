//! Plain-text dashboard report

use crate::dashboard::DashboardView;
use matchlens_stats::ChartSeries;
use std::fmt::Display;

const RULE_WIDTH: usize = 96;

/// Render a dashboard view as a terminal report
pub fn render_text(view: &DashboardView) -> String {
    let mut report = String::new();
    report.push_str("=== Match Lens ===\n");
    report.push_str(&format!(
        "Filters: date range {}, model {}, result {}\n\n",
        view.filters.date_range, view.filters.model, view.filters.result
    ));

    if let Some(notice) = &view.notice {
        report.push_str(&format!("! {}\n\n", notice));
    }

    report.push_str(&format!("Total games:        {}\n", view.cards.total_games));
    report.push_str(&format!("Total draws:        {}\n", view.cards.total_draws));
    report.push_str(&format!("Avg invalid moves:  {}\n", view.cards.avg_invalid_moves));
    report.push_str(&format!("White win rate:     {}\n\n", view.cards.white_win_rate));

    push_series(&mut report, "Wins by model", &view.model_wins);
    push_series(&mut report, "Wins by color", &view.color_wins);
    push_series(&mut report, "Termination reasons", &view.terminations);
    push_series(&mut report, "Avg invalid moves by model", &view.invalid_moves);

    report.push_str("Recent games:\n");
    if view.recent_games.is_empty() {
        report.push_str("No games found\n");
        return report;
    }

    report.push_str(&format!(
        "{:<24} {:<16} {:<16} {:<8} {:<16} {:<12} {:>7}\n",
        "Date", "White", "Black", "Result", "Winner", "Termination", "Invalid"
    ));
    report.push_str(&"-".repeat(RULE_WIDTH));
    report.push('\n');

    for game in &view.recent_games {
        let row = &game.row;
        report.push_str(&format!(
            "{:<24} {:<16} {:<16} {:<8} {:<16} {:<12} {:>7}\n",
            row.date,
            row.white,
            row.black,
            row.result,
            row.winner,
            row.termination,
            row.invalid_moves
        ));
    }

    report
}

fn push_series<T: Display>(report: &mut String, title: &str, series: &ChartSeries<T>) {
    report.push_str(&format!("{}:\n", title));
    if series.is_empty() {
        report.push_str("  (none)\n");
    }
    for (label, value) in series.iter() {
        report.push_str(&format!("  {:<28} {}\n", label, value));
    }
    report.push('\n');
}
