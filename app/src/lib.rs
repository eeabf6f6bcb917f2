//! FILENAME: app/src/lib.rs
// PURPOSE: Dashboard coordinator - shared state, command modules and the CLI runner.

use clap::Parser;
use engine::RecordStore;
use insight_engine::{apply_filter, reset_filter_to_data_bounds, FilterSpec, FilteredSet};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

pub mod logging;
pub mod api_types;
pub mod commands;
pub mod config;
pub mod loader;

pub use api_types::{
    ChartDataset, ChartPayloads, DashboardResponse, FilterOptions, FilterRequest,
    MultiSeriesChartData, PieChartData, SeriesChartData, NO_DATA_LABEL,
};
pub use config::{load_config, ConfigError, DashboardConfig};
pub use loader::{load_dataset, LoadSource, LoadedDataset};

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// State behind every dashboard command.
/// The record store is frozen after load; filters, the filtered set and the
/// page change on user input.
pub struct DashboardState {
    pub store: RecordStore,
    pub config: DashboardConfig,
    /// Active filter
    pub filters: Mutex<FilterSpec>,
    /// Records accepted by `filters`, in load order
    pub filtered: Mutex<FilteredSet>,
    /// 1-based page of the records table
    pub current_page: Mutex<usize>,
}

pub fn create_app_state(store: RecordStore, config: DashboardConfig) -> DashboardState {
    log_info!("SYS", "Creating DashboardState with {} records", store.len());
    let filters = reset_filter_to_data_bounds(&store);
    let filtered = apply_filter(&store, &filters).unwrap_or_else(|e| {
        log_warn!("SYS", "default filter rejected ({}), showing all records", e);
        FilteredSet::all(&store)
    });

    DashboardState {
        store,
        config,
        filters: Mutex::new(filters),
        filtered: Mutex::new(filtered),
        current_page: Mutex::new(1),
    }
}

// ============================================================================
// COMMAND LINE
// ============================================================================

/// Video-game sales dashboard: loads the dataset, applies the filters and
/// prints the dashboard snapshot as JSON.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dashboard", version, about)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// CSV dataset (overrides the configured path)
    #[arg(long)]
    pub data: Option<PathBuf>,

    #[arg(long)]
    pub platform: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    /// Inclusive release years, e.g. 2000..2010
    #[arg(long, value_parser = parse_range::<i32>)]
    pub years: Option<(i32, i32)>,

    /// Inclusive global sales in millions, e.g. 0..5.5
    #[arg(long, value_parser = parse_range::<f64>)]
    pub sales: Option<(f64, f64)>,

    /// Table page to show
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Write the filtered records to this CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,

    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Parses `min..max`.
pub fn parse_range<T>(value: &str) -> Result<(T, T), String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let (min, max) = value
        .split_once("..")
        .ok_or_else(|| format!("expected <min>..<max>, got '{}'", value))?;
    let parse = |s: &str| s.trim().parse::<T>().map_err(|e| format!("'{}': {}", s.trim(), e));
    Ok((parse(min)?, parse(max)?))
}

/// Merges command-line filter flags over the current filter.
pub fn filter_request_from_cli(cli: &Cli, current: &FilterSpec) -> FilterRequest {
    let mut request = FilterRequest::from(current);
    if let Some(platform) = &cli.platform {
        request.platform = platform.clone();
    }
    if let Some(genre) = &cli.genre {
        request.genre = genre.clone();
    }
    if let Some((min, max)) = cli.years {
        request.year_min = min;
        request.year_max = max;
    }
    if let Some((min, max)) = cli.sales {
        request.sales_min = min;
        request.sales_max = max;
    }
    request
}

/// Runs one dashboard refresh for `cli` and returns the snapshot.
pub async fn run_cli(cli: &Cli) -> Result<DashboardResponse, String> {
    let mut config = match &cli.config {
        Some(path) => load_config(path).map_err(|e| e.to_string())?,
        None => DashboardConfig::default(),
    }
    .apply_env_overrides();
    if let Some(data) = &cli.data {
        config.data_path = data.clone();
    }

    if let Some(log_path) = cli.log_file.as_ref().or(config.log_file.as_ref()) {
        logging::init_log_file(log_path)?;
    }

    let loaded = load_dataset(&config).await;
    log_info!("SYS", "dataset source {:?}", loaded.source);
    let state = create_app_state(loaded.store, config);

    let current = commands::current_filters(&state)?;
    commands::apply_filters(&state, filter_request_from_cli(cli, &current))?;
    commands::go_to_page(&state, cli.page)?;

    if let Some(path) = &cli.export {
        let rows = commands::save_filtered_csv(&state, path)?;
        log_info!("EXPORT", "wrote {} rows to {:?}", rows, path);
    }

    commands::get_dashboard(&state)
}

/// Entry point of the `dashboard` binary.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();
    logging::init_logger(log::LevelFilter::Info);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {}", e))?;
    let response = runtime.block_on(run_cli(&cli))?;

    let json = serde_json::to_string_pretty(&response).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}
