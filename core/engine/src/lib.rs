//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the sales data model.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod record;
pub mod store;

// Re-export commonly used types at the crate root
pub use record::{contribution, Region, SalesRecord};
pub use store::RecordStore;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_creates_records() {
        let record = SalesRecord::new("Tetris", "GB", 1989, "Puzzle").with_global_sales(30.26);
        assert_eq!(record.global(), 30.26);
        assert_eq!(record.sales(Region::Japan), 0.0);
    }

    #[test]
    fn it_freezes_records_in_store() {
        let records = vec![
            SalesRecord::new("A", "PS4", 2015, "Action"),
            SalesRecord::new("B", "PS4", 2018, "RPG"),
        ];
        let store = RecordStore::from(records);

        assert_eq!(store.len(), 2);
        let names: Vec<&str> = store.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
