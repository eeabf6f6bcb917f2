//! FILENAME: app/src/api_types.rs
// PURPOSE: Request and response types of the dashboard commands.
// CONTEXT: All structs use camelCase serialization for JavaScript interoperability.

use engine::Region;
use insight_engine::{
    Aggregates, Bounds, FilterSpec, RegionSeries, SummaryStats, TablePage,
};
use serde::{Deserialize, Serialize};

/// Label shown by charts that have nothing to plot.
pub const NO_DATA_LABEL: &str = "No data";

/// Pie slices drawn when every region sums to zero.
pub const PLACEHOLDER_PIE: [f64; 4] = [1.0, 1.0, 1.0, 1.0];

// ============================================================================
// REQUESTS
// ============================================================================

/// Complete filter state sent by the filter panel.
/// Empty `platform` / `genre` means "all".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub genre: String,
    pub year_min: i32,
    pub year_max: i32,
    pub sales_min: f64,
    pub sales_max: f64,
}

impl FilterRequest {
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec::unbounded()
            .with_platform(self.platform.as_str())
            .with_genre(self.genre.as_str())
            .with_year_range(self.year_min, self.year_max)
            .with_sales_range(self.sales_min, self.sales_max)
    }
}

impl From<&FilterSpec> for FilterRequest {
    fn from(spec: &FilterSpec) -> Self {
        FilterRequest {
            platform: spec.platform.clone().unwrap_or_default(),
            genre: spec.genre.clone().unwrap_or_default(),
            year_min: spec.year_range.min,
            year_max: spec.year_range.max,
            sales_min: spec.sales_range.min,
            sales_max: spec.sales_range.max,
        }
    }
}

// ============================================================================
// FILTER OPTIONS
// ============================================================================

/// Values that populate the filter widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Distinct platforms, sorted.
    pub platforms: Vec<String>,
    /// Distinct genres, sorted.
    pub genres: Vec<String>,
    pub year_bounds: Bounds<i32>,
    pub sales_bounds: Bounds<f64>,
}

// ============================================================================
// CHART PAYLOADS
// ============================================================================

/// Single-series chart (bar, line, pie).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesChartData {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    /// True when `data` is a placeholder.
    pub is_default: bool,
}

impl SeriesChartData {
    fn placeholder() -> Self {
        SeriesChartData {
            labels: vec![NO_DATA_LABEL.to_string()],
            data: vec![0.0],
            is_default: true,
        }
    }

    fn from_pairs(pairs: Vec<(String, f64)>) -> Self {
        if pairs.is_empty() {
            return Self::placeholder();
        }
        let (labels, data) = pairs.into_iter().unzip();
        SeriesChartData {
            labels,
            data,
            is_default: false,
        }
    }
}

/// Region pie with percent shares for the tooltips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChartData {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    /// Percent of the regional total per slice; zeros when there is no data.
    pub shares: Vec<f64>,
    pub is_default: bool,
}

/// One line of a multi-series chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub color: String,
}

/// Radar and stacked-area charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSeriesChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    pub is_default: bool,
}

impl MultiSeriesChartData {
    fn build(
        labels: Vec<String>,
        series: &[RegionSeries],
        has_data: bool,
        palette: fn(Region) -> &'static str,
    ) -> Self {
        let empty = labels.is_empty();
        let datasets = series
            .iter()
            .map(|s| ChartDataset {
                label: s.region.label().to_string(),
                data: if empty { vec![0.0] } else { s.values.to_vec() },
                color: palette(s.region).to_string(),
            })
            .collect();

        MultiSeriesChartData {
            labels: if empty { vec![NO_DATA_LABEL.to_string()] } else { labels },
            datasets,
            is_default: !has_data,
        }
    }
}

fn radar_color(region: Region) -> &'static str {
    match region {
        Region::NorthAmerica => "#FF69B4",
        Region::Europe => "#00BFFF",
        Region::Japan => "#FFA500",
        Region::Other => "#9E9E9E",
    }
}

fn stacked_color(region: Region) -> &'static str {
    match region {
        Region::NorthAmerica => "#7C4DFF",
        Region::Europe => "#4FC3F7",
        Region::Japan => "#FF5252",
        Region::Other => "#B9F6CA",
    }
}

/// Everything the six dashboard charts draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPayloads {
    pub region_pie: PieChartData,
    pub top_games: SeriesChartData,
    pub platform_sales: SeriesChartData,
    pub sales_over_time: SeriesChartData,
    pub genre_radar: MultiSeriesChartData,
    pub stacked_regions: MultiSeriesChartData,
}

impl ChartPayloads {
    pub fn from_aggregates(aggregates: &Aggregates, label_max_chars: usize) -> Self {
        let regions = &aggregates.region_totals;
        let region_pie = PieChartData {
            labels: Region::ALL.iter().map(|r| r.label().to_string()).collect(),
            data: if regions.has_data {
                regions.values().to_vec()
            } else {
                PLACEHOLDER_PIE.to_vec()
            },
            shares: regions.shares().to_vec(),
            is_default: !regions.has_data,
        };

        let top_games = SeriesChartData::from_pairs(
            aggregates
                .top_games
                .iter()
                .map(|g| (truncate_label(&g.name, label_max_chars), g.global_sales))
                .collect(),
        );

        let platform_sales = SeriesChartData::from_pairs(
            aggregates
                .platform_totals
                .iter()
                .map(|p| (p.platform.clone(), p.total_sales))
                .collect(),
        );

        let sales_over_time = SeriesChartData::from_pairs(
            aggregates
                .yearly_series
                .iter()
                .map(|y| (y.year.to_string(), y.total_sales))
                .collect(),
        );

        let radar = &aggregates.genre_region_matrix;
        let genre_radar = MultiSeriesChartData::build(
            radar.genres.clone(),
            &radar.series,
            radar.has_data,
            radar_color,
        );

        let stacked = &aggregates.year_region_matrix;
        let stacked_regions = MultiSeriesChartData::build(
            stacked.years.iter().map(|y| y.to_string()).collect(),
            &stacked.series,
            stacked.has_data,
            stacked_color,
        );

        ChartPayloads {
            region_pie,
            top_games,
            platform_sales,
            sales_over_time,
            genre_radar,
            stacked_regions,
        }
    }
}

/// Cuts `label` to at most `max_chars` characters (not bytes).
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    label.chars().take(max_chars).collect()
}

// ============================================================================
// DASHBOARD SNAPSHOT
// ============================================================================

/// Full state of the dashboard after a refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub filters: FilterSpec,
    pub stats: SummaryStats,
    pub table: TablePage,
    pub charts: ChartPayloads,
    pub aggregates: Aggregates,
}
