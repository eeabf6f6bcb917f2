//! FILENAME: core/engine/src/store.rs
//! PURPOSE: The record store - the frozen dataset shared by every view.
//! CONTEXT: Built once after ingestion. Clones share the same allocation.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::record::SalesRecord;

/// Immutable, ordered collection of sales records.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<[SalesRecord]>,
}

impl RecordStore {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        RecordStore {
            records: records.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in load order.
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }

    pub fn get(&self, position: usize) -> Option<&SalesRecord> {
        self.records.get(position)
    }

    /// Observed `(min, max)` release year, or `None` for an empty store.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let mut iter = self.records.iter().map(|r| r.year);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    /// Observed `(min, max)` global sales, or `None` for an empty store.
    /// Malformed figures are read as zero.
    pub fn sales_bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.records.iter().map(|r| r.global());
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s))))
    }

    /// Distinct platforms, sorted ascending.
    pub fn platforms(&self) -> Vec<String> {
        sorted_distinct(self.records.iter().map(|r| r.platform.as_str()))
    }

    /// Distinct genres, sorted ascending.
    pub fn genres(&self) -> Vec<String> {
        sorted_distinct(self.records.iter().map(|r| r.genre.as_str()))
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        RecordStore::new(Vec::new())
    }
}

impl From<Vec<SalesRecord>> for RecordStore {
    fn from(records: Vec<SalesRecord>) -> Self {
        RecordStore::new(records)
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a SalesRecord;
    type IntoIter = std::slice::Iter<'a, SalesRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn sorted_distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
