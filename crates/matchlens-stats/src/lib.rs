//! Match Lens Statistics
//!
//! Pure aggregation and presentation over an in-memory slice of match
//! records. Nothing here performs I/O or mutates its input; every function
//! is total and degrades missing fields to documented fallbacks.

pub mod aggregate;
pub mod format;
pub mod models;

pub use aggregate::{
    basic_stats, color_wins, invalid_moves_by_model, model_wins, outcome_breakdown,
    termination_reasons, unique_models,
};
pub use format::{recent_games, row_style, stat_cards, DEFAULT_RECENT_LIMIT};
pub use models::*;
