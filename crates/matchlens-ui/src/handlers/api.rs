//! JSON API handlers

use crate::AppState;
use crate::dashboard::DashboardView;
use axum::{
    Json,
    extract::{Query, State},
};
use matchlens_core::FilterCriteria;
use serde_json::{Value, json};

/// Liveness check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Dashboard view for the submitted filters
///
/// Missing parameters fall back to `all`.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(filters): Query<FilterCriteria>,
) -> Json<DashboardView> {
    Json(state.dashboard.apply_filters(filters).await)
}

/// Forced reload with the active filters
pub async fn refresh(State(state): State<AppState>) -> Json<DashboardView> {
    Json(state.dashboard.load(true).await)
}

/// Model filter options
pub async fn models_list(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.dashboard.model_options().await)
}
