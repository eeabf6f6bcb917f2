//! FILENAME: core/insight-engine/src/definition.rs
//! Filter Definition - The serializable description of what the user selected.
//!
//! This module contains the types needed to DESCRIBE a dashboard query.
//! These structures are designed to be:
//! - Serializable (sent to and from the presentation layer)
//! - Immutable snapshots of user intent, replaced wholesale on every change

use serde::{Deserialize, Serialize};
use engine::{RecordStore, SalesRecord};

use crate::error::FilterError;

/// Number of titles in the top-games ranking.
pub const DEFAULT_TOP_GAMES: usize = 5;

/// Number of platforms in the platform ranking.
pub const DEFAULT_TOP_PLATFORMS: usize = 10;

/// Number of genres shown on the genre/region radar.
pub const DEFAULT_RADAR_GENRES: usize = 5;

// ============================================================================
// BOUNDS
// ============================================================================

/// A closed interval `[min, max]`, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn new(min: T, max: T) -> Self {
        Bounds { min, max }
    }

    /// Whether `value` lies inside the interval.
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Whether the interval is well formed (`min <= max`).
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    /// Whether this interval contains all of `other`.
    pub fn covers(&self, other: &Bounds<T>) -> bool {
        self.min <= other.min && other.max <= self.max
    }
}

// ============================================================================
// FILTER SPEC
// ============================================================================

/// The active filter predicate.
///
/// An absent or empty `platform` / `genre` places no constraint.
/// Text matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default)]
    pub platform: Option<String>,

    #[serde(default)]
    pub genre: Option<String>,

    /// Release years, inclusive.
    pub year_range: Bounds<i32>,

    /// Global sales in millions, inclusive.
    pub sales_range: Bounds<f64>,
}

impl FilterSpec {
    /// A spec that accepts every record.
    pub fn unbounded() -> Self {
        FilterSpec {
            platform: None,
            genre: None,
            year_range: Bounds::new(i32::MIN, i32::MAX),
            sales_range: Bounds::new(f64::MIN, f64::MAX),
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = non_empty(platform.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = non_empty(genre.into());
        self
    }

    pub fn with_year_range(mut self, min: i32, max: i32) -> Self {
        self.year_range = Bounds::new(min, max);
        self
    }

    pub fn with_sales_range(mut self, min: f64, max: f64) -> Self {
        self.sales_range = Bounds::new(min, max);
        self
    }

    /// Checks the range invariants. Inverted ranges are rejected, not repaired.
    pub fn validate(&self) -> Result<(), FilterError> {
        if !self.year_range.is_ordered() {
            return Err(FilterError::InvalidYearRange {
                min: self.year_range.min,
                max: self.year_range.max,
            });
        }
        if !self.sales_range.min.is_finite() || !self.sales_range.max.is_finite() {
            return Err(FilterError::NonFiniteSalesBound);
        }
        if !self.sales_range.is_ordered() {
            return Err(FilterError::InvalidSalesRange {
                min: self.sales_range.min,
                max: self.sales_range.max,
            });
        }
        Ok(())
    }

    /// The record predicate.
    pub fn matches(&self, record: &SalesRecord) -> bool {
        text_matches(self.platform.as_deref(), &record.platform)
            && text_matches(self.genre.as_deref(), &record.genre)
            && self.year_range.contains(record.year)
            && self.sales_range.contains(record.global())
    }

    /// Whether every record accepted by `other` is also accepted by `self`.
    pub fn is_wider_than(&self, other: &FilterSpec) -> bool {
        let text_wider = |mine: Option<&str>, theirs: Option<&str>| match (mine, theirs) {
            (None | Some(""), _) => true,
            (Some(a), Some(b)) => a == b,
            (Some(_), None) => false,
        };
        text_wider(self.platform.as_deref(), other.platform.as_deref())
            && text_wider(self.genre.as_deref(), other.genre.as_deref())
            && self.year_range.covers(&other.year_range)
            && self.sales_range.covers(&other.sales_range)
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec::unbounded()
    }
}

fn text_matches(constraint: Option<&str>, value: &str) -> bool {
    match constraint {
        None | Some("") => true,
        Some(expected) => expected == value,
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Builds the default spec spanning the observed data.
///
/// Years cover the observed `[min, max]`. Sales start at zero and end at the
/// observed maximum rounded up to a whole million, so every record passes.
/// An empty store yields the degenerate ranges `[0, 0]` and `[0.0, 0.0]`.
pub fn reset_filter_to_data_bounds(store: &RecordStore) -> FilterSpec {
    let (min_year, max_year) = store.year_bounds().unwrap_or((0, 0));
    let max_sales = store
        .sales_bounds()
        .map(|(_, max)| max.ceil())
        .unwrap_or(0.0);

    FilterSpec {
        platform: None,
        genre: None,
        year_range: Bounds::new(min_year, max_year),
        sales_range: Bounds::new(0.0, max_sales),
    }
}

// ============================================================================
// AGGREGATE LIMITS
// ============================================================================

/// How many entries the ranked and radar views keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AggregateLimits {
    pub top_games: usize,
    pub top_platforms: usize,
    pub radar_genres: usize,
}

impl Default for AggregateLimits {
    fn default() -> Self {
        AggregateLimits {
            top_games: DEFAULT_TOP_GAMES,
            top_platforms: DEFAULT_TOP_PLATFORMS,
            radar_genres: DEFAULT_RADAR_GENRES,
        }
    }
}
