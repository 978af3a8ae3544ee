//! Tests for match aggregation

use super::*;

fn game(
    date: &str,
    white: &str,
    black: &str,
    result: &str,
    winner: Option<&str>,
    invalid_moves: Option<u32>,
) -> MatchRecord {
    MatchRecord {
        date: Some(date.to_string()),
        white_model: Some(white.to_string()),
        black_model: Some(black.to_string()),
        result: Some(result.to_string()),
        winner: winner.map(str::to_string),
        invalid_moves: invalid_moves.map(Some),
        ..Default::default()
    }
}

/// The two-game sample used throughout the dashboard docs
fn sample() -> Vec<MatchRecord> {
    vec![
        game("2024-01-01", "A", "B", "1-0", Some("A"), Some(4)),
        game("2024-01-02", "A", "C", "1/2-1/2", None, Some(2)),
    ]
}

#[test]
fn test_basic_stats_sample() {
    let stats = basic_stats(&sample());
    assert_eq!(stats.total_games, 2);
    assert_eq!(stats.total_draws, 1);
    assert_eq!(stats.avg_invalid_moves, 3.0);
    assert_eq!(stats.white_win_rate, 50.0);
}

#[test]
fn test_basic_stats_empty_is_zero_filled() {
    let stats = basic_stats(&[]);
    assert_eq!(stats, BasicStats::default());
    assert_eq!(stats.total_games, 0);
    assert!(!stats.avg_invalid_moves.is_nan());
    assert!(!stats.white_win_rate.is_nan());
}

#[test]
fn test_basic_stats_rounding_and_missing_invalid_moves() {
    let records = vec![
        game("2024-01-01", "A", "B", "1-0", Some("A"), Some(1)),
        game("2024-01-02", "A", "B", "0-1", Some("B"), None),
        game("2024-01-03", "A", "B", "0-1", Some("B"), Some(0)),
    ];

    let stats = basic_stats(&records);
    // 1 / 3 with the absent count read as zero
    assert_eq!(stats.avg_invalid_moves, 0.33);
    // 1 / 3 * 100
    assert_eq!(stats.white_win_rate, 33.3);
    assert_eq!(stats.total_draws, 0);
}

#[test]
fn test_outcome_breakdown_sums_to_total() {
    let mut records = sample();
    records.push(game("2024-01-03", "B", "C", "0-1", Some("C"), None));
    records.push(game("2024-01-04", "B", "C", "ERR", None, Some(12)));
    records.push(game("2024-01-05", "B", "C", "*", None, None));
    records.push(MatchRecord::default());

    let breakdown = outcome_breakdown(&records);
    assert_eq!(breakdown.white_wins, 1);
    assert_eq!(breakdown.black_wins, 1);
    assert_eq!(breakdown.draws, 1);
    assert_eq!(breakdown.errors, 1);
    assert_eq!(breakdown.other, 2);
    assert_eq!(breakdown.total(), basic_stats(&records).total_games);
}

#[test]
fn test_model_wins_first_seen_order() {
    let records = vec![
        game("2024-01-01", "B", "A", "1-0", Some("B"), None),
        game("2024-01-02", "A", "B", "1-0", Some("A"), None),
        game("2024-01-03", "A", "B", "0-1", Some("B"), None),
    ];

    let series = model_wins(&records);
    assert_eq!(series.labels, vec!["B", "A"]);
    assert_eq!(series.data, vec![2, 1]);
}

#[test]
fn test_model_wins_ignores_draws_and_errors() {
    let records = vec![
        game("2024-01-01", "A", "B", "1/2-1/2", Some("A"), None),
        game("2024-01-02", "A", "B", "ERR", Some("B"), None),
        game("2024-01-03", "A", "C", "1-0", Some("A"), None),
    ];

    let series = model_wins(&records);
    assert_eq!(series.labels, vec!["A"]);
    assert_eq!(series.data, vec![1]);
    assert!(!series.labels.contains(&"B".to_string()));
}

#[test]
fn test_model_wins_empty() {
    let series = model_wins(&[]);
    assert!(series.is_empty());
    assert!(series.data.is_empty());
}

#[test]
fn test_color_wins_sample() {
    let series = color_wins(&sample());
    assert_eq!(series.labels, vec!["White", "Black", "Draw"]);
    assert_eq!(series.data, vec![1, 0, 1]);
}

#[test]
fn test_color_wins_always_three_labels() {
    let series = color_wins(&[]);
    assert_eq!(series.labels, vec!["White", "Black", "Draw"]);
    assert_eq!(series.data, vec![0, 0, 0]);

    let errors_only = vec![game("2024-01-01", "A", "B", "ERR", None, None)];
    assert_eq!(color_wins(&errors_only).len(), 3);
}

#[test]
fn test_termination_reasons_skip_absent() {
    let mut records = sample();
    records[0].termination_reason = Some("checkmate".to_string());
    records[1].termination_reason = Some("stalemate".to_string());
    records.push(MatchRecord {
        termination_reason: Some("checkmate".to_string()),
        ..Default::default()
    });
    records.push(MatchRecord::default());

    let series = termination_reasons(&records);
    assert_eq!(series.labels, vec!["checkmate", "stalemate"]);
    assert_eq!(series.data, vec![2, 1]);
}

#[test]
fn test_invalid_moves_by_model_sample() {
    let series = invalid_moves_by_model(&sample());
    let averages: HashMap<&str, f64> = series.iter().map(|(m, v)| (m, *v)).collect();

    // A: (4/2 + 2/2) over 2 games
    assert_eq!(averages["A"], 1.5);
    assert_eq!(averages["B"], 2.0);
    assert_eq!(averages["C"], 1.0);
    assert_eq!(series.labels, vec!["B", "A", "C"]);
}

#[test]
fn test_invalid_moves_by_model_skips_missing_counts() {
    let records = vec![
        game("2024-01-01", "A", "B", "1-0", Some("A"), Some(6)),
        game("2024-01-02", "A", "C", "1-0", Some("A"), None),
        game("2024-01-03", "D", "E", "1-0", Some("D"), None),
    ];

    let series = invalid_moves_by_model(&records);
    // Game 2 contributes neither to A's sum nor to A's game count
    assert_eq!(series.labels, vec!["A", "B"]);
    assert_eq!(series.data, vec![3.0, 3.0]);
}

#[test]
fn test_invalid_moves_by_model_counts_null_as_zero() {
    let rows = serde_json::json!([
        { "white_model": "A", "black_model": "B", "result": "1-0", "invalid_moves": 4 },
        { "white_model": "A", "black_model": "B", "result": "1-0", "invalid_moves": null }
    ]);
    let records: Vec<MatchRecord> = serde_json::from_value(rows).unwrap();

    let series = invalid_moves_by_model(&records);
    // (2 + 0) / 2 games for each side
    assert_eq!(series.labels, vec!["A", "B"]);
    assert_eq!(series.data, vec![1.0, 1.0]);
    assert_eq!(basic_stats(&records).avg_invalid_moves, 2.0);
}

#[test]
fn test_invalid_moves_by_model_ties_keep_first_seen_order() {
    let records = vec![
        game("2024-01-01", "Z", "Y", "1-0", Some("Z"), Some(2)),
        game("2024-01-02", "X", "W", "1-0", Some("X"), Some(2)),
    ];

    let series = invalid_moves_by_model(&records);
    assert_eq!(series.labels, vec!["Z", "Y", "X", "W"]);
    assert!(series.data.iter().all(|v| *v == 1.0));
}

#[test]
fn test_invalid_moves_by_model_top_ten_descending() {
    let records: Vec<MatchRecord> = (0..15)
        .map(|i| {
            game(
                "2024-01-01",
                &format!("white-{i}"),
                &format!("black-{i}"),
                "1-0",
                None,
                Some(i),
            )
        })
        .collect();

    let series = invalid_moves_by_model(&records);
    assert_eq!(series.len(), INVALID_MOVES_TOP_N);
    assert!(series.data.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(series.labels[0], "white-14");
    assert_eq!(series.labels[1], "black-14");
    assert_eq!(series.data[0], 7.0);
}

#[test]
fn test_invalid_moves_by_model_rounds_to_two_decimals() {
    let records = vec![
        game("2024-01-01", "A", "B", "1-0", None, Some(1)),
        game("2024-01-02", "A", "C", "1-0", None, Some(0)),
        game("2024-01-03", "A", "D", "1-0", None, Some(0)),
    ];

    let series = invalid_moves_by_model(&records);
    let a = series.iter().find(|(m, _)| *m == "A").map(|(_, v)| *v);
    // 0.5 / 3
    assert_eq!(a, Some(0.17));
}

#[test]
fn test_invalid_moves_by_model_single_sided_record() {
    let records = vec![MatchRecord {
        white_model: Some("A".to_string()),
        invalid_moves: Some(Some(3)),
        ..Default::default()
    }];

    let series = invalid_moves_by_model(&records);
    assert_eq!(series.labels, vec!["A"]);
    assert_eq!(series.data, vec![1.5]);
}

#[test]
fn test_unique_models_first_seen() {
    let records = vec![
        game("2024-01-01", "A", "B", "1-0", None, None),
        game("2024-01-02", "C", "A", "1-0", None, None),
        MatchRecord {
            black_model: Some("D".to_string()),
            ..Default::default()
        },
    ];

    assert_eq!(unique_models(&records), vec!["A", "B", "C", "D"]);
    assert!(unique_models(&[]).is_empty());
}

#[test]
fn test_aggregation_does_not_mutate_input() {
    let records = sample();
    let before = records.clone();

    let _ = basic_stats(&records);
    let _ = model_wins(&records);
    let _ = invalid_moves_by_model(&records);

    assert_eq!(records, before);
}
