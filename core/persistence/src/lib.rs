//! FILENAME: core/persistence/src/lib.rs
//! Sales Dataset Persistence Module
//!
//! Reads the sales dataset from CSV into typed records and writes filtered
//! snapshots back out. Everything above this crate trusts the records
//! completely: coercion and row rejection happen here.

mod error;
mod csv_reader;
mod csv_writer;

pub use error::PersistenceError;
pub use csv_reader::{load_csv, parse_csv, read_csv, ParsedDataset};
pub use csv_writer::{export_csv, save_csv, write_csv};

// ============================================================================
// COLUMN NAMES
// ============================================================================

pub const NAME_COLUMN: &str = "Name";
pub const PLATFORM_COLUMN: &str = "Platform";
pub const YEAR_COLUMN: &str = "Year";
pub const GENRE_COLUMN: &str = "Genre";
pub const GLOBAL_SALES_COLUMN: &str = "Global_Sales";
pub const NA_SALES_COLUMN: &str = "NA_Sales";
pub const EU_SALES_COLUMN: &str = "EU_Sales";
pub const JP_SALES_COLUMN: &str = "JP_Sales";
pub const OTHER_SALES_COLUMN: &str = "Other_Sales";

/// Columns written by the CSV export, in order.
pub const EXPORT_COLUMNS: [&str; 9] = [
    NAME_COLUMN,
    PLATFORM_COLUMN,
    YEAR_COLUMN,
    GENRE_COLUMN,
    GLOBAL_SALES_COLUMN,
    NA_SALES_COLUMN,
    EU_SALES_COLUMN,
    JP_SALES_COLUMN,
    OTHER_SALES_COLUMN,
];
