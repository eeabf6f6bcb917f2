//! FILENAME: core/engine/src/record.rs
//! PURPOSE: The sales record - one row of the dataset.
//! CONTEXT: Created once by the ingestion layer and never mutated afterwards.

use serde::{Deserialize, Serialize};

// ============================================================================
// REGION
// ============================================================================

/// A sales region. Every record carries one figure per region
/// plus an independently sourced global figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    NorthAmerica,
    Europe,
    Japan,
    Other,
}

impl Region {
    /// All regions in dataset column order.
    pub const ALL: [Region; 4] = [
        Region::NorthAmerica,
        Region::Europe,
        Region::Japan,
        Region::Other,
    ];

    /// Short code used in column headers (e.g. "NA" for `NA_Sales`).
    pub fn code(self) -> &'static str {
        match self {
            Region::NorthAmerica => "NA",
            Region::Europe => "EU",
            Region::Japan => "JP",
            Region::Other => "Other",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Region::NorthAmerica => "North America",
            Region::Europe => "Europe",
            Region::Japan => "Japan",
            Region::Other => "Other",
        }
    }

    /// Position of this region inside `Region::ALL`.
    pub fn index(self) -> usize {
        match self {
            Region::NorthAmerica => 0,
            Region::Europe => 1,
            Region::Japan => 2,
            Region::Other => 3,
        }
    }
}

// ============================================================================
// SALES RECORD
// ============================================================================

/// One game's sales row. Sales are in millions of units.
///
/// `global_sales` is not guaranteed to equal the sum of the regional
/// figures; the source data is taken as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Platform")]
    pub platform: String,

    #[serde(rename = "Year")]
    pub year: i32,

    #[serde(rename = "Genre")]
    pub genre: String,

    #[serde(rename = "Global_Sales", default)]
    pub global_sales: f64,

    #[serde(rename = "NA_Sales", default)]
    pub na_sales: f64,

    #[serde(rename = "EU_Sales", default)]
    pub eu_sales: f64,

    #[serde(rename = "JP_Sales", default)]
    pub jp_sales: f64,

    #[serde(rename = "Other_Sales", default)]
    pub other_sales: f64,
}

impl SalesRecord {
    /// Creates a record with all sales figures at zero.
    /// Surrounding whitespace is stripped from the text fields.
    pub fn new(
        name: impl Into<String>,
        platform: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
    ) -> Self {
        SalesRecord {
            name: trimmed(name.into()),
            platform: trimmed(platform.into()),
            year,
            genre: trimmed(genre.into()),
            global_sales: 0.0,
            na_sales: 0.0,
            eu_sales: 0.0,
            jp_sales: 0.0,
            other_sales: 0.0,
        }
    }

    /// Sets the global sales figure.
    pub fn with_global_sales(mut self, value: f64) -> Self {
        self.global_sales = value;
        self
    }

    /// Sets the four regional figures in `Region::ALL` order.
    pub fn with_regional_sales(mut self, na: f64, eu: f64, jp: f64, other: f64) -> Self {
        self.na_sales = na;
        self.eu_sales = eu;
        self.jp_sales = jp;
        self.other_sales = other;
        self
    }

    /// Global sales as a summable contribution (never NaN, never negative).
    pub fn global(&self) -> f64 {
        contribution(self.global_sales)
    }

    /// Regional sales as a summable contribution (never NaN, never negative).
    pub fn sales(&self, region: Region) -> f64 {
        let raw = match region {
            Region::NorthAmerica => self.na_sales,
            Region::Europe => self.eu_sales,
            Region::Japan => self.jp_sales,
            Region::Other => self.other_sales,
        };
        contribution(raw)
    }

    /// Regional contributions in `Region::ALL` order.
    pub fn regional(&self) -> [f64; 4] {
        Region::ALL.map(|region| self.sales(region))
    }
}

fn trimmed(value: String) -> String {
    if value.trim().len() == value.len() {
        value
    } else {
        value.trim().to_string()
    }
}

/// Maps a raw sales figure to the amount it adds to a sum.
/// Missing or malformed figures count as zero.
pub fn contribution(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_order_matches_index() {
        for (i, region) in Region::ALL.iter().enumerate() {
            assert_eq!(region.index(), i);
        }
        assert_eq!(Region::Japan.code(), "JP");
    }

    #[test]
    fn test_contribution_sanitizes() {
        assert_eq!(contribution(2.5), 2.5);
        assert_eq!(contribution(f64::NAN), 0.0);
        assert_eq!(contribution(f64::INFINITY), 0.0);
        assert_eq!(contribution(-1.0), 0.0);
    }

    #[test]
    fn test_regional_contributions() {
        let record = SalesRecord::new("A", "PS4", 2015, "Action")
            .with_global_sales(5.0)
            .with_regional_sales(3.0, f64::NAN, 0.5, 0.5);

        assert_eq!(record.regional(), [3.0, 0.0, 0.5, 0.5]);
        assert_eq!(record.global(), 5.0);
    }

    #[test]
    fn test_new_trims_text_fields() {
        let record = SalesRecord::new(" Halo ", "XB\t", 2001, "  Shooter");
        assert_eq!(record.name, "Halo");
        assert_eq!(record.platform, "XB");
        assert_eq!(record.genre, "Shooter");
    }

    #[test]
    fn test_serializes_with_dataset_columns() {
        let record = SalesRecord::new("A", "PS4", 2015, "Action").with_global_sales(1.5);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Name"], "A");
        assert_eq!(json["Global_Sales"], 1.5);
        assert_eq!(json["Year"], 2015);
    }
}
