//! Match Lens Server
//!
//! Serves the match dashboard API backed by the Supabase match table, or
//! prints a one-off text report.
//!
//! Usage:
//! ```bash
//! # With environment variables
//! SUPABASE_URL=https://<project>.supabase.co SUPABASE_KEY=<anon key> matchlens
//!
//! # With config file (env vars override config)
//! matchlens --config config.yaml serve
//!
//! # Text report for the last week, from a JSON export
//! matchlens report --date-range week --from-file matches.json
//! ```

mod config;

use clap::{Parser, Subcommand};
use config::ServerConfig;
use matchlens_core::{DateRange, FilterCriteria, RecordStore, ResultFilter, filter::ALL_MODELS};
use matchlens_store::{JsonFileStore, StoreContext, UnavailableStore, connect_or_unavailable};
use matchlens_ui::{Dashboard, UiServer, report};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Match Lens - AI chess match dashboard
#[derive(Parser)]
#[command(name = "matchlens")]
#[command(about = "Dashboard API and reports for AI chess match results", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to configuration file (YAML or TOML)
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "MATCHLENS_CONFIG",
        global = true
    )]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard API server (default if no command specified)
    Serve,
    /// Print a text report of the dashboard
    Report {
        /// Time window: all, week, month or year
        #[arg(long, default_value = "all")]
        date_range: DateRange,

        /// Only games involving this model
        #[arg(long, default_value = ALL_MODELS)]
        model: String,

        /// Result filter: all, win or draw
        #[arg(long, default_value = "all")]
        result: ResultFilter,

        /// Rows in the recent games table (defaults to the configured limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Read rows from a JSON export instead of the remote table
        #[arg(long, value_name = "FILE")]
        from_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => {
            let path = shellexpand::tilde(path).to_string();
            ServerConfig::from_file(&path)?
        }
        None => ServerConfig::default(),
    };

    // Merge environment variables (they override config file)
    config.merge_env();

    init_tracing(&config.logging.level)?;
    if let Some(path) = &cli.config {
        info!("📁 Loaded configuration from: {}", path);
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Report {
            date_range,
            model,
            result,
            limit,
            from_file,
        } => {
            let filters = FilterCriteria {
                date_range,
                model,
                result,
            };
            let limit = limit.unwrap_or(config.dashboard.recent_limit);
            run_report(config, filters, limit, from_file).await
        }
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let mut filter = EnvFilter::try_new(level).unwrap_or_else(|e| {
        eprintln!("Warning: Invalid log level '{}' ({}), using info", level, e);
        EnvFilter::new("info")
    });

    // HTTP internals are noisy below warn
    for directive in ["hyper=warn", "reqwest=warn"] {
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Warning: Failed to set log filter {}: {}", directive, e),
        }
    }

    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Match store for the configured table
///
/// A missing configuration or a table that stays unreachable yields a store
/// whose fetches fail, so callers get the dashboard's failure notice.
async fn open_store(config: &ServerConfig) -> Arc<dyn RecordStore> {
    match config.postgrest_config() {
        Ok(pg_config) => {
            info!(
                "🔌 Connecting to {} (table {})",
                pg_config.base_url, pg_config.table
            );
            connect_or_unavailable(pg_config).await
        }
        Err(e) => {
            error!("❌ Match store is not configured: {:#}", e);
            let store: Arc<dyn RecordStore> = Arc::new(UnavailableStore::new(e.to_string()));
            store
        }
    }
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    info!("🚀 Initializing Match Lens");

    let store = open_store(&config).await;
    let context = Arc::new(StoreContext::new(store, config.cache_config()));
    let dashboard = Arc::new(Dashboard::new(context, config.dashboard.recent_limit));

    // Warm the cache so the first page load is served immediately
    let view = dashboard.load(false).await;
    match &view.notice {
        Some(notice) => warn!("Initial load failed: {}", notice),
        None => info!("📊 Loaded {} games", view.stats.total_games),
    }

    UiServer::new(config.ui, dashboard).serve().await
}

async fn run_report(
    config: ServerConfig,
    filters: FilterCriteria,
    limit: usize,
    from_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let store: Arc<dyn RecordStore> = match from_file {
        Some(path) => {
            let path = shellexpand::tilde(&path.to_string_lossy()).to_string();
            Arc::new(JsonFileStore::new(path))
        }
        None => open_store(&config).await,
    };

    let context = Arc::new(StoreContext::new(store, config.cache_config()));
    let dashboard = Dashboard::new(context, limit);
    let view = dashboard.apply_filters(filters).await;

    println!("{}", report::render_text(&view));

    if view.notice.is_some() {
        anyhow::bail!("Report data could not be loaded");
    }
    Ok(())
}
