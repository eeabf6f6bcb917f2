//! FILENAME: core/insight-engine/src/view.rs
//! Dashboard Views - Renderable output for the presentation layer.
//!
//! Every struct here is a plain value derived from a filtered set.
//! Empty inputs produce empty (never missing) views, so the presentation
//! layer can decide how to show "no data".

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use engine::{Region, SalesRecord};

/// Values of one series. Radar series hold at most a handful of entries.
pub type SeriesValues = SmallVec<[f64; 8]>;

// ============================================================================
// SUMMARY
// ============================================================================

/// Headline counters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub count: usize,
    pub total_sales: f64,
    pub platform_count: usize,
    pub genre_count: usize,
}

// ============================================================================
// REGION TOTALS
// ============================================================================

/// Sum of each regional figure over the filtered set.
///
/// These are not expected to add up to `SummaryStats::total_sales`.
/// When `has_data` is false the consumer substitutes its own placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionTotals {
    pub north_america: f64,
    pub europe: f64,
    pub japan: f64,
    pub other: f64,
    pub has_data: bool,
}

impl RegionTotals {
    pub fn from_values(values: [f64; 4]) -> Self {
        RegionTotals {
            north_america: values[0],
            europe: values[1],
            japan: values[2],
            other: values[3],
            has_data: values.iter().any(|&v| v > 0.0),
        }
    }

    /// Totals in `Region::ALL` order.
    pub fn values(&self) -> [f64; 4] {
        [self.north_america, self.europe, self.japan, self.other]
    }

    pub fn get(&self, region: Region) -> f64 {
        self.values()[region.index()]
    }

    pub fn total(&self) -> f64 {
        self.values().iter().sum()
    }

    /// Percentage of the regional total per region. A zero total gives 0%.
    pub fn shares(&self) -> [f64; 4] {
        let total = self.total();
        self.values()
            .map(|v| if total > 0.0 { v / total * 100.0 } else { 0.0 })
    }
}

// ============================================================================
// RANKINGS
// ============================================================================

/// One entry of the top-games ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedGame {
    pub name: String,
    pub platform: String,
    pub year: i32,
    pub genre: String,
    pub global_sales: f64,
}

impl From<&SalesRecord> for RankedGame {
    fn from(record: &SalesRecord) -> Self {
        RankedGame {
            name: record.name.clone(),
            platform: record.platform.clone(),
            year: record.year,
            genre: record.genre.clone(),
            global_sales: record.global(),
        }
    }
}

/// Global sales of one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformTotal {
    pub platform: String,
    pub total_sales: f64,
}

/// Global sales of one release year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearTotal {
    pub year: i32,
    pub total_sales: f64,
}

// ============================================================================
// MATRICES
// ============================================================================

/// One region's sums, aligned to the category list of its matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSeries {
    pub region: Region,
    pub values: SeriesValues,
}

impl RegionSeries {
    pub fn has_positive(&self) -> bool {
        self.values.iter().any(|&v| v > 0.0)
    }
}

/// Regional sales per genre (NA, EU, JP) for the first few genres seen.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreRegionMatrix {
    pub genres: Vec<String>,
    pub series: Vec<RegionSeries>,
    pub has_data: bool,
}

impl GenreRegionMatrix {
    pub fn series_for(&self, region: Region) -> Option<&RegionSeries> {
        self.series.iter().find(|s| s.region == region)
    }
}

/// Regional sales per year (all four regions), years ascending.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRegionMatrix {
    pub years: Vec<i32>,
    pub series: Vec<RegionSeries>,
    pub has_data: bool,
}

impl YearRegionMatrix {
    pub fn series_for(&self, region: Region) -> Option<&RegionSeries> {
        self.series.iter().find(|s| s.region == region)
    }
}

// ============================================================================
// BUNDLE
// ============================================================================

/// All seven views of one refresh.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregates {
    pub summary_stats: SummaryStats,
    pub region_totals: RegionTotals,
    pub top_games: Vec<RankedGame>,
    pub platform_totals: Vec<PlatformTotal>,
    pub yearly_series: Vec<YearTotal>,
    pub genre_region_matrix: GenreRegionMatrix,
    pub year_region_matrix: YearRegionMatrix,
}

// ============================================================================
// TABLE PAGE
// ============================================================================

/// One page of the records table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    /// 1-based page number actually shown (after clamping).
    pub page: usize,
    pub page_size: usize,
    /// `ceil(total_rows / page_size)`; zero when there are no rows.
    pub page_count: usize,
    pub total_rows: usize,
    pub rows: Vec<SalesRecord>,
    pub has_previous: bool,
    pub has_next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_shares_zero_total() {
        let totals = RegionTotals::from_values([0.0; 4]);
        assert!(!totals.has_data);
        assert_eq!(totals.shares(), [0.0; 4]);
    }

    #[test]
    fn test_region_shares() {
        let totals = RegionTotals::from_values([2.0, 1.0, 1.0, 0.0]);
        assert!(totals.has_data);
        assert_eq!(totals.shares(), [50.0, 25.0, 25.0, 0.0]);
        assert_eq!(totals.get(Region::Europe), 1.0);
    }

    #[test]
    fn test_series_serializes_as_list() {
        let series = RegionSeries {
            region: Region::Japan,
            values: SmallVec::from_slice(&[1.0, 2.0]),
        };
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["region"], "Japan");
        assert_eq!(json["values"][1], 2.0);
    }
}
