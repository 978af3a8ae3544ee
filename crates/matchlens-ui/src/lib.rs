//! Match Lens Dashboard
//!
//! View controller and rendering layer for the match dashboard:
//! - `Dashboard` orchestrates load → aggregate → view
//! - JSON API server consumed by the browser dashboard
//! - Plain-text report for the terminal

pub mod dashboard;
pub mod handlers;
pub mod report;
pub mod server;

pub use dashboard::{Dashboard, DashboardView, TableRow};
pub use server::{UiConfig, UiServer};

use std::sync::Arc;

/// Shared application state for the UI server
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}
