//! FILENAME: core/insight-engine/src/engine.rs
//! Insight Engine - The calculation core that turns records into views.
//!
//! This module takes a RecordStore (data) and a FilterSpec (configuration)
//! and produces a FilteredSet, then derives the seven aggregate views.
//!
//! Algorithm:
//! 1. Validate the spec and keep matching store positions (order preserved)
//! 2. Build the group index once (platform, genre, year totals)
//! 3. Read each grouped view straight from the index
//! 4. Rank the top games with a partial selection over the filtered set

use std::cmp::Ordering;

use engine::{Region, RecordStore, SalesRecord};

use crate::definition::{AggregateLimits, FilterSpec};
use crate::error::FilterError;
use crate::index::{FilteredSet, GroupIndex, GroupTotals};
use crate::view::{
    Aggregates, GenreRegionMatrix, PlatformTotal, RankedGame, RegionSeries, RegionTotals,
    SeriesValues, SummaryStats, YearRegionMatrix, YearTotal,
};

/// Regions plotted on the genre radar.
const RADAR_REGIONS: [Region; 3] = [Region::NorthAmerica, Region::Europe, Region::Japan];

// ============================================================================
// FILTER
// ============================================================================

/// Applies `spec` to the whole store.
///
/// Inverted or non-finite ranges are rejected. Zero matches is a valid,
/// empty result.
pub fn apply_filter(store: &RecordStore, spec: &FilterSpec) -> Result<FilteredSet, FilterError> {
    spec.validate()?;

    let positions = store
        .iter()
        .enumerate()
        .filter(|(_, record)| spec.matches(record))
        .map(|(position, _)| position)
        .collect();

    Ok(FilteredSet::from_positions(store.clone(), positions))
}

// ============================================================================
// AGGREGATE CALCULATOR
// ============================================================================

/// Derives every aggregate view from one filtered set.
pub struct AggregateCalculator<'a> {
    filtered: &'a FilteredSet,
    limits: AggregateLimits,
    index: GroupIndex<'a>,
}

impl<'a> AggregateCalculator<'a> {
    /// Builds the group index for `filtered`.
    pub fn new(filtered: &'a FilteredSet, limits: AggregateLimits) -> Self {
        AggregateCalculator {
            filtered,
            limits,
            index: GroupIndex::build(filtered),
        }
    }

    /// Executes every view and bundles the results.
    pub fn calculate(&self) -> Aggregates {
        Aggregates {
            summary_stats: self.summary_stats(),
            region_totals: self.region_totals(),
            top_games: self.top_games(),
            platform_totals: self.platform_totals(),
            yearly_series: self.yearly_series(),
            genre_region_matrix: self.genre_region_matrix(),
            year_region_matrix: self.year_region_matrix(),
        }
    }

    pub fn summary_stats(&self) -> SummaryStats {
        SummaryStats {
            count: self.index.overall.count,
            total_sales: self.index.overall.global_sales,
            platform_count: self.index.platforms.len(),
            genre_count: self.index.genres.len(),
        }
    }

    pub fn region_totals(&self) -> RegionTotals {
        RegionTotals::from_values(self.index.overall.regional_sales)
    }

    /// Best sellers by global sales, descending. Ties have no defined order.
    pub fn top_games(&self) -> Vec<RankedGame> {
        let limit = self.limits.top_games;
        if limit == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<&SalesRecord> = self.filtered.iter().collect();
        if ranked.len() > limit {
            ranked.select_nth_unstable_by(limit - 1, by_sales_descending);
            ranked.truncate(limit);
        }
        ranked.sort_unstable_by(by_sales_descending);

        ranked.into_iter().map(RankedGame::from).collect()
    }

    /// Platforms by summed global sales, descending, truncated to the limit.
    pub fn platform_totals(&self) -> Vec<PlatformTotal> {
        let mut totals: Vec<PlatformTotal> = self
            .index
            .platforms
            .iter()
            .map(|(platform, totals)| PlatformTotal {
                platform: platform.to_string(),
                total_sales: totals.global_sales,
            })
            .collect();

        totals.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales));
        totals.truncate(self.limits.top_platforms);
        totals
    }

    /// Summed global sales per year, years ascending.
    pub fn yearly_series(&self) -> Vec<YearTotal> {
        let mut series: Vec<YearTotal> = self
            .index
            .years
            .iter()
            .map(|(year, totals)| YearTotal {
                year,
                total_sales: totals.global_sales,
            })
            .collect();

        series.sort_by_key(|point| point.year);
        series
    }

    /// NA/EU/JP sales for the first genres encountered (not sorted).
    pub fn genre_region_matrix(&self) -> GenreRegionMatrix {
        let groups: Vec<(&str, &GroupTotals)> = self
            .index
            .genres
            .iter()
            .take(self.limits.radar_genres)
            .collect();

        let series = region_series(&RADAR_REGIONS, &groups);
        let has_data = !groups.is_empty() && series.iter().any(RegionSeries::has_positive);

        GenreRegionMatrix {
            genres: groups.iter().map(|(genre, _)| genre.to_string()).collect(),
            series,
            has_data,
        }
    }

    /// Sales of every region per year, years ascending.
    pub fn year_region_matrix(&self) -> YearRegionMatrix {
        let mut groups: Vec<(i32, &GroupTotals)> = self.index.years.iter().collect();
        groups.sort_by_key(|(year, _)| *year);

        let series = region_series(&Region::ALL, &groups);
        let has_data = !groups.is_empty() && series.iter().any(RegionSeries::has_positive);

        YearRegionMatrix {
            years: groups.iter().map(|(year, _)| *year).collect(),
            series,
            has_data,
        }
    }
}

fn by_sales_descending(a: &&SalesRecord, b: &&SalesRecord) -> Ordering {
    b.global().total_cmp(&a.global())
}

/// One series per region, each aligned to `groups`.
fn region_series<K>(regions: &[Region], groups: &[(K, &GroupTotals)]) -> Vec<RegionSeries> {
    regions
        .iter()
        .map(|&region| RegionSeries {
            region,
            values: groups
                .iter()
                .map(|(_, totals)| totals.region(region))
                .collect::<SeriesValues>(),
        })
        .collect()
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Computes all seven views with the default limits.
pub fn compute_aggregates(filtered: &FilteredSet) -> Aggregates {
    compute_aggregates_with(filtered, &AggregateLimits::default())
}

/// Computes all seven views with custom ranking limits.
pub fn compute_aggregates_with(filtered: &FilteredSet, limits: &AggregateLimits) -> Aggregates {
    AggregateCalculator::new(filtered, *limits).calculate()
}
