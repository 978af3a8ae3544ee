//! Dashboard view controller
//!
//! Owns the active filter selection and runs the load → aggregate → view
//! cycle. Loads are serialized: a second load waits until the one in
//! flight has finished.

use matchlens_core::{FilterCriteria, MatchRecord};
use matchlens_stats::{
    BasicStats, ChartSeries, RowStyle, RowView, StatCards, basic_stats, color_wins,
    invalid_moves_by_model, model_wins, recent_games, row_style, stat_cards, termination_reasons,
    unique_models,
};
use matchlens_store::StoreContext;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

pub const LOAD_FAILED_NOTICE: &str = "Failed to load data. Please try refreshing the page.";
pub const FILTER_FAILED_NOTICE: &str = "Failed to apply filters. Please try again.";

/// Recent games table row with its style class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(flatten)]
    pub row: RowView,
    pub style: Option<RowStyle>,
}

/// Everything the rendering layer needs for one dashboard update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub filters: FilterCriteria,
    pub stats: BasicStats,
    pub cards: StatCards,
    pub model_wins: ChartSeries<u64>,
    pub color_wins: ChartSeries<u64>,
    pub terminations: ChartSeries<u64>,
    pub invalid_moves: ChartSeries<f64>,
    pub recent_games: Vec<TableRow>,
    /// User-facing message when the load failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl DashboardView {
    /// Recompute every aggregate from a record snapshot
    pub fn build(filters: FilterCriteria, records: &[MatchRecord], recent_limit: usize) -> Self {
        let stats = basic_stats(records);
        let recent_games = recent_games(records, recent_limit)
            .into_iter()
            .map(|row| TableRow {
                style: row_style(&row.result),
                row,
            })
            .collect();

        Self {
            filters,
            cards: stat_cards(&stats),
            stats,
            model_wins: model_wins(records),
            color_wins: color_wins(records),
            terminations: termination_reasons(records),
            invalid_moves: invalid_moves_by_model(records),
            recent_games,
            notice: None,
        }
    }

    /// Empty view carrying a notice
    pub fn failed(filters: FilterCriteria, notice: impl Into<String>) -> Self {
        let mut view = Self::build(filters, &[], 0);
        view.notice = Some(notice.into());
        view
    }

    pub fn is_empty(&self) -> bool {
        self.stats.total_games == 0
    }
}

pub struct Dashboard {
    context: Arc<StoreContext>,
    recent_limit: usize,
    /// Active filters; holding the lock marks a load in progress
    filters: Mutex<FilterCriteria>,
}

impl Dashboard {
    pub fn new(context: Arc<StoreContext>, recent_limit: usize) -> Self {
        Self {
            context,
            recent_limit,
            filters: Mutex::new(FilterCriteria::default()),
        }
    }

    pub async fn current_filters(&self) -> FilterCriteria {
        self.filters.lock().await.clone()
    }

    /// Reload with the active filters
    pub async fn load(&self, force_refresh: bool) -> DashboardView {
        let filters = self.filters.lock().await;
        self.render(&filters, force_refresh, LOAD_FAILED_NOTICE).await
    }

    /// Make `filters` the active selection and load it
    pub async fn apply_filters(&self, filters: FilterCriteria) -> DashboardView {
        let mut active = self.filters.lock().await;
        *active = filters;
        info!(
            "Applying filters: date_range={} model={} result={}",
            active.date_range, active.model, active.result
        );
        self.render(&active, false, FILTER_FAILED_NOTICE).await
    }

    /// Models offered by the model filter
    ///
    /// Errors are logged and yield an empty list.
    pub async fn model_options(&self) -> Vec<String> {
        match self.context.records(&FilterCriteria::default(), false).await {
            Ok(records) => unique_models(&records),
            Err(e) => {
                error!("Failed to get unique models: {}", e);
                Vec::new()
            }
        }
    }

    async fn render(
        &self,
        filters: &FilterCriteria,
        force_refresh: bool,
        failure_notice: &str,
    ) -> DashboardView {
        match self.context.records(filters, force_refresh).await {
            Ok(records) => DashboardView::build(filters.clone(), &records, self.recent_limit),
            Err(e) => {
                error!("Dashboard load failed: {}", e);
                DashboardView::failed(filters.clone(), failure_notice)
            }
        }
    }
}
