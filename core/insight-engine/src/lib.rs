//! FILENAME: core/insight-engine/src/lib.rs
//! Filter-and-aggregate subsystem for the sales dashboard.
//!
//! This crate turns the frozen record store into everything the dashboard
//! shows. It depends on `engine` only for the shared data model
//! (SalesRecord, Region, RecordStore).
//!
//! Layers:
//! - `definition`: Serializable configuration (what the filter IS)
//! - `index`: Filtered set and group index (HOW we compute)
//! - `view`: Renderable output for the frontend (WHAT we display)
//! - `engine`: Filter and aggregate calculations
//! - `page`: Table pagination

pub mod definition;
pub mod error;
pub mod index;
pub mod view;
pub mod engine;
pub mod page;

pub use self::definition::*;
pub use self::error::FilterError;
pub use self::index::{FilteredSet, GroupIndex, GroupTable, GroupTotals, RecordPosition};
pub use self::view::*;
pub use self::engine::{
    apply_filter, compute_aggregates, compute_aggregates_with, AggregateCalculator,
};
pub use self::page::{page_count, paginate, DEFAULT_PAGE_SIZE};
