//! FILENAME: core/insight-engine/src/page.rs
//! Table pagination over a filtered set.

use crate::index::FilteredSet;
use crate::view::TablePage;

/// Rows per page in the records table.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `total_rows` (zero rows means zero pages).
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1))
}

/// Returns the 1-based `page` of `filtered`.
///
/// The page number is clamped into `[1, max(page_count, 1)]`, and a zero
/// page size is treated as one row per page.
pub fn paginate(filtered: &FilteredSet, page: usize, page_size: usize) -> TablePage {
    let page_size = page_size.max(1);
    let total_rows = filtered.len();
    let page_count = page_count(total_rows, page_size);
    let page = page.clamp(1, page_count.max(1));

    let start = (page - 1) * page_size;
    let rows = filtered
        .iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    TablePage {
        page,
        page_size,
        page_count,
        total_rows,
        rows,
        has_previous: page > 1,
        has_next: page < page_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{RecordStore, SalesRecord};

    fn create_store(rows: usize) -> RecordStore {
        RecordStore::new(
            (0..rows)
                .map(|i| SalesRecord::new(format!("Game {i}"), "PC", 2000, "Misc"))
                .collect(),
        )
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(3, 0), 3);
    }

    #[test]
    fn test_first_and_last_page() {
        let store = create_store(23);
        let set = FilteredSet::all(&store);

        let first = paginate(&set, 1, 10);
        assert_eq!(first.rows.len(), 10);
        assert_eq!(first.rows[0].name, "Game 0");
        assert!(!first.has_previous);
        assert!(first.has_next);
        assert_eq!(first.page_count, 3);

        let last = paginate(&set, 3, 10);
        assert_eq!(last.rows.len(), 3);
        assert_eq!(last.rows[0].name, "Game 20");
        assert!(last.has_previous);
        assert!(!last.has_next);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let store = create_store(5);
        let set = FilteredSet::all(&store);

        assert_eq!(paginate(&set, 0, 10).page, 1);
        assert_eq!(paginate(&set, 9, 2).page, 3);
        assert_eq!(paginate(&set, 9, 2).rows.len(), 1);
    }

    #[test]
    fn test_empty_set_page() {
        let set = FilteredSet::all(&RecordStore::empty());
        let page = paginate(&set, 4, 10);

        assert_eq!(page.page, 1);
        assert_eq!(page.page_count, 0);
        assert!(page.rows.is_empty());
        assert!(!page.has_previous);
        assert!(!page.has_next);
    }
}
