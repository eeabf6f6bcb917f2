//! FILENAME: app/src/commands.rs
// PURPOSE: Dashboard commands - filter updates, table paging, exports.
// CONTEXT: Every filter change refilters the frozen store, resets the table to
//          page 1 and returns a fresh snapshot. Rejected filters leave the
//          previous state untouched.

use std::path::Path;

use insight_engine::{
    apply_filter, compute_aggregates_with, paginate, reset_filter_to_data_bounds, FilterSpec,
    FilteredSet, TablePage,
};
use persistence::{export_csv, save_csv};

use crate::api_types::{ChartPayloads, DashboardResponse, FilterOptions, FilterRequest};
use crate::{log_debug, log_enter, log_exit, log_info, log_warn};
use crate::DashboardState;

/// Message returned when an export is requested on an empty selection.
pub const NO_DATA_TO_EXPORT: &str = "No data to export";

// ============================================================================
// HELPERS
// ============================================================================

fn build_response(
    state: &DashboardState,
    filters: &FilterSpec,
    filtered: &FilteredSet,
    page: usize,
) -> DashboardResponse {
    let aggregates = compute_aggregates_with(filtered, &state.config.limits);
    let table = paginate(filtered, page, state.config.items_per_page);
    let charts = ChartPayloads::from_aggregates(&aggregates, state.config.label_max_chars);

    DashboardResponse {
        filters: filters.clone(),
        stats: aggregates.summary_stats,
        table,
        charts,
        aggregates,
    }
}

/// Validates and installs `spec`, then returns the refreshed snapshot.
fn replace_filters(state: &DashboardState, spec: FilterSpec) -> Result<DashboardResponse, String> {
    let filtered = apply_filter(&state.store, &spec).map_err(|e| {
        log_warn!("FILTER", "rejected filter {:?}: {}", spec, e);
        e.to_string()
    })?;

    let mut filters = state.filters.lock().map_err(|e| format!("Lock error: {}", e))?;
    let mut current = state.filtered.lock().map_err(|e| format!("Lock error: {}", e))?;
    let mut page = state.current_page.lock().map_err(|e| format!("Lock error: {}", e))?;

    log_info!(
        "FILTER",
        "platform={:?} genre={:?} years={}..{} sales={}..{} -> {} of {} records",
        spec.platform,
        spec.genre,
        spec.year_range.min,
        spec.year_range.max,
        spec.sales_range.min,
        spec.sales_range.max,
        filtered.len(),
        state.store.len()
    );

    *filters = spec;
    *current = filtered;
    *page = 1;

    Ok(build_response(state, &filters, &current, *page))
}

/// Applies `edit` to a copy of the active filter and installs the result.
fn update_filters<F>(state: &DashboardState, edit: F) -> Result<DashboardResponse, String>
where
    F: FnOnce(FilterSpec) -> FilterSpec,
{
    let spec = current_filters(state)?;
    replace_filters(state, edit(spec))
}

/// Moves the table to `target` (clamped) and returns that page.
fn move_to_page<F>(state: &DashboardState, target: F) -> Result<TablePage, String>
where
    F: FnOnce(usize) -> usize,
{
    let filtered = state.filtered.lock().map_err(|e| format!("Lock error: {}", e))?;
    let mut page = state.current_page.lock().map_err(|e| format!("Lock error: {}", e))?;

    let table = paginate(&filtered, target(*page), state.config.items_per_page);
    *page = table.page;
    log_debug!("TABLE", "page {} of {}", table.page, table.page_count);
    Ok(table)
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Returns the active filter.
pub fn current_filters(state: &DashboardState) -> Result<FilterSpec, String> {
    let filters = state.filters.lock().map_err(|e| format!("Lock error: {}", e))?;
    Ok(filters.clone())
}

/// Full dashboard snapshot for the current filter and page.
pub fn get_dashboard(state: &DashboardState) -> Result<DashboardResponse, String> {
    let filters = state.filters.lock().map_err(|e| format!("Lock error: {}", e))?;
    let filtered = state.filtered.lock().map_err(|e| format!("Lock error: {}", e))?;
    let page = state.current_page.lock().map_err(|e| format!("Lock error: {}", e))?;

    Ok(build_response(state, &filters, &filtered, *page))
}

/// Distinct platforms and genres plus the data bounds, for the filter widgets.
pub fn get_filter_options(state: &DashboardState) -> FilterOptions {
    let defaults = reset_filter_to_data_bounds(&state.store);
    FilterOptions {
        platforms: state.store.platforms(),
        genres: state.store.genres(),
        year_bounds: defaults.year_range,
        sales_bounds: defaults.sales_range,
    }
}

// ============================================================================
// FILTER COMMANDS
// ============================================================================

/// Replaces the whole filter from the filter panel.
pub fn apply_filters(
    state: &DashboardState,
    request: FilterRequest,
) -> Result<DashboardResponse, String> {
    log_enter!("FILTER", "apply_filters", "{:?}", request);
    let result = replace_filters(state, request.to_spec());
    log_exit!("FILTER", "apply_filters", "ok={}", result.is_ok());
    result
}

/// Platform dropdown; an empty string selects all platforms.
pub fn set_platform(state: &DashboardState, platform: String) -> Result<DashboardResponse, String> {
    update_filters(state, |spec| spec.with_platform(platform))
}

/// Genre dropdown; an empty string selects all genres.
pub fn set_genre(state: &DashboardState, genre: String) -> Result<DashboardResponse, String> {
    update_filters(state, |spec| spec.with_genre(genre))
}

pub fn set_year_range(
    state: &DashboardState,
    min: i32,
    max: i32,
) -> Result<DashboardResponse, String> {
    update_filters(state, |spec| spec.with_year_range(min, max))
}

pub fn set_sales_range(
    state: &DashboardState,
    min: f64,
    max: f64,
) -> Result<DashboardResponse, String> {
    update_filters(state, |spec| spec.with_sales_range(min, max))
}

/// Restores the default filter spanning the whole dataset.
pub fn reset_filters(state: &DashboardState) -> Result<DashboardResponse, String> {
    log_info!("FILTER", "reset_filters");
    replace_filters(state, reset_filter_to_data_bounds(&state.store))
}

// ============================================================================
// TABLE COMMANDS
// ============================================================================

pub fn get_table_page(state: &DashboardState) -> Result<TablePage, String> {
    move_to_page(state, |page| page)
}

pub fn next_page(state: &DashboardState) -> Result<TablePage, String> {
    move_to_page(state, |page| page.saturating_add(1))
}

pub fn previous_page(state: &DashboardState) -> Result<TablePage, String> {
    move_to_page(state, |page| page.saturating_sub(1))
}

/// Jumps to a 1-based page; out-of-range values are clamped.
pub fn go_to_page(state: &DashboardState, page: usize) -> Result<TablePage, String> {
    move_to_page(state, |_| page)
}

// ============================================================================
// EXPORT COMMANDS
// ============================================================================

/// CSV text of the filtered records.
pub fn export_filtered_csv(state: &DashboardState) -> Result<String, String> {
    let filtered = state.filtered.lock().map_err(|e| format!("Lock error: {}", e))?;
    if filtered.is_empty() {
        log_warn!("EXPORT", "{}", NO_DATA_TO_EXPORT);
        return Err(NO_DATA_TO_EXPORT.to_string());
    }
    export_csv(filtered.iter()).map_err(|e| e.to_string())
}

/// Writes the filtered records to `path` and returns the row count.
pub fn save_filtered_csv(state: &DashboardState, path: &Path) -> Result<usize, String> {
    let filtered = state.filtered.lock().map_err(|e| format!("Lock error: {}", e))?;
    if filtered.is_empty() {
        log_warn!("EXPORT", "{}", NO_DATA_TO_EXPORT);
        return Err(NO_DATA_TO_EXPORT.to_string());
    }
    save_csv(path, filtered.iter()).map_err(|e| format!("Failed to save {:?}: {}", path, e))?;
    log_info!("EXPORT", "saved {} rows to {:?}", filtered.len(), path);
    Ok(filtered.len())
}
