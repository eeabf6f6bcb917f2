//! FILENAME: core/insight-engine/src/index.rs
//! Filtered Set and Group Index - The internal representation we compute from.
//!
//! The filtered set is a list of positions into the shared record store, so
//! refiltering never copies records. The group index is built once per
//! filtered set and answers every grouped aggregate without a rescan:
//! - Each distinct key is stored once and assigned a slot (first-seen order)
//! - Each slot carries pre-summed totals (count, global, per region)

use std::hash::Hash;

use rustc_hash::FxHashMap;
use engine::{Region, RecordStore, SalesRecord};

use crate::definition::FilterSpec;
use crate::error::FilterError;

/// Position of a record inside its `RecordStore`.
pub type RecordPosition = usize;

// ============================================================================
// FILTERED SET
// ============================================================================

/// The records that satisfy a filter, in store order.
#[derive(Debug, Clone, Default)]
pub struct FilteredSet {
    store: RecordStore,
    positions: Vec<RecordPosition>,
}

impl FilteredSet {
    /// A filtered set holding every record of the store.
    pub fn all(store: &RecordStore) -> Self {
        FilteredSet {
            store: store.clone(),
            positions: (0..store.len()).collect(),
        }
    }

    pub(crate) fn from_positions(store: RecordStore, positions: Vec<RecordPosition>) -> Self {
        FilteredSet { store, positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Store positions of the matching records, ascending.
    pub fn positions(&self) -> &[RecordPosition] {
        &self.positions
    }

    pub fn get(&self, index: usize) -> Option<&SalesRecord> {
        self.positions
            .get(index)
            .and_then(|&position| self.store.get(position))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SalesRecord> + '_ {
        self.positions
            .iter()
            .filter_map(move |&position| self.store.get(position))
    }

    /// Applies `spec` to this set, keeping only records that also match it.
    pub fn refine(&self, spec: &FilterSpec) -> Result<FilteredSet, FilterError> {
        spec.validate()?;
        let positions = self
            .positions
            .iter()
            .copied()
            .filter(|&position| self.store.get(position).is_some_and(|r| spec.matches(r)))
            .collect();
        Ok(FilteredSet::from_positions(self.store.clone(), positions))
    }
}

impl PartialEq for FilteredSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

// ============================================================================
// GROUP TOTALS
// ============================================================================

/// Running totals for one group of records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupTotals {
    pub count: usize,
    pub global_sales: f64,
    /// Per-region sums, indexed by `Region::index()`.
    pub regional_sales: [f64; 4],
}

impl GroupTotals {
    pub fn add(&mut self, record: &SalesRecord) {
        self.count += 1;
        self.global_sales += record.global();
        for region in Region::ALL {
            self.regional_sales[region.index()] += record.sales(region);
        }
    }

    pub fn region(&self, region: Region) -> f64 {
        self.regional_sales[region.index()]
    }
}

// ============================================================================
// GROUP TABLE
// ============================================================================

/// Totals keyed by a field value, remembering the order keys were first seen.
#[derive(Debug, Clone)]
pub struct GroupTable<K> {
    /// Map from key to its slot (for deduplication during build).
    key_to_slot: FxHashMap<K, usize>,

    /// Keys in first-seen order (indexed by slot).
    keys: Vec<K>,

    /// Totals per slot.
    totals: Vec<GroupTotals>,
}

impl<K: Eq + Hash + Copy> GroupTable<K> {
    pub fn new() -> Self {
        GroupTable {
            key_to_slot: FxHashMap::default(),
            keys: Vec::new(),
            totals: Vec::new(),
        }
    }

    /// Adds a record to the group for `key`, creating the group on first sight.
    pub fn add(&mut self, key: K, record: &SalesRecord) {
        let slot = match self.key_to_slot.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.keys.len();
                self.keys.push(key);
                self.totals.push(GroupTotals::default());
                self.key_to_slot.insert(key, slot);
                slot
            }
        };
        self.totals[slot].add(record);
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&GroupTotals> {
        self.key_to_slot.get(key).map(|&slot| &self.totals[slot])
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// `(key, totals)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &GroupTotals)> + '_ {
        self.keys.iter().copied().zip(self.totals.iter())
    }
}

impl<K: Eq + Hash + Copy> Default for GroupTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// GROUP INDEX
// ============================================================================

/// Every grouping the aggregates need, built in one pass over a filtered set.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex<'a> {
    pub overall: GroupTotals,
    pub platforms: GroupTable<&'a str>,
    pub genres: GroupTable<&'a str>,
    pub years: GroupTable<i32>,
}

impl<'a> GroupIndex<'a> {
    pub fn build(filtered: &'a FilteredSet) -> Self {
        let mut index = GroupIndex::default();
        for record in filtered.iter() {
            index.overall.add(record);
            index.platforms.add(record.platform.as_str(), record);
            index.genres.add(record.genre.as_str(), record);
            index.years.add(record.year, record);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> RecordStore {
        RecordStore::new(vec![
            SalesRecord::new("A", "PS4", 2015, "Action")
                .with_global_sales(5.0)
                .with_regional_sales(3.0, 1.0, 0.5, 0.5),
            SalesRecord::new("B", "Wii", 2015, "Sports")
                .with_global_sales(2.0)
                .with_regional_sales(1.0, 0.5, 0.3, 0.2),
            SalesRecord::new("C", "PS4", 2013, "Action")
                .with_global_sales(1.0)
                .with_regional_sales(0.5, 0.25, 0.25, 0.0),
        ])
    }

    #[test]
    fn test_all_keeps_store_order() {
        let store = create_test_store();
        let set = FilteredSet::all(&store);
        let names: Vec<&str> = set.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(set.positions(), &[0, 1, 2]);
    }

    #[test]
    fn test_refine_narrows() {
        let store = create_test_store();
        let set = FilteredSet::all(&store);
        let refined = set.refine(&FilterSpec::unbounded().with_platform("PS4")).unwrap();
        assert_eq!(refined.positions(), &[0, 2]);
        assert_eq!(refined.get(1).map(|r| r.name.as_str()), Some("C"));
        assert_eq!(refined.get(2), None);
    }

    #[test]
    fn test_group_table_first_seen_order() {
        let store = create_test_store();
        let set = FilteredSet::all(&store);
        let index = GroupIndex::build(&set);

        assert_eq!(index.platforms.keys(), &["PS4", "Wii"]);
        assert_eq!(index.years.keys(), &[2015, 2013]);
        assert_eq!(index.genres.len(), 2);
    }

    #[test]
    fn test_group_totals() {
        let store = create_test_store();
        let set = FilteredSet::all(&store);
        let index = GroupIndex::build(&set);

        let ps4 = index.platforms.get(&"PS4").unwrap();
        assert_eq!(ps4.count, 2);
        assert_eq!(ps4.global_sales, 6.0);
        assert_eq!(ps4.region(Region::NorthAmerica), 3.5);

        assert_eq!(index.overall.count, 3);
        assert_eq!(index.overall.global_sales, 8.0);
    }

    #[test]
    fn test_empty_index() {
        let set = FilteredSet::all(&RecordStore::empty());
        let index = GroupIndex::build(&set);
        assert!(index.platforms.is_empty());
        assert_eq!(index.overall, GroupTotals::default());
    }
}
