use crate::storage::cell::Cell;
use crate::storage::range::KeyRange;
use crate::storage::table_store::{TableStore, TableStoreIterator};
use std::sync::Arc;

/// A handle to a scan over a `TableStore`, bounded by a list of key ranges.
///
/// This struct holds the `Arc<TableStore>` to keep the data alive during the
/// scan. The iterator is created on demand via `.iter()`, which yields a
/// `TableIterator` bound to the lifetime of `TableScan`.
pub struct TableScan {
    store: Arc<TableStore>,
    ranges: Vec<KeyRange>,
}

impl TableScan {
    /// Creates a scan over the whole table.
    pub fn new(store: Arc<TableStore>) -> Self {
        Self::with_ranges(store, Vec::new())
    }

    /// Creates a scan over the given ranges.
    ///
    /// An empty list scans the whole table. Otherwise empty ranges are dropped
    /// and the rest are sorted and merged, so every row is visited once, in key order.
    pub fn with_ranges(store: Arc<TableStore>, ranges: Vec<KeyRange>) -> Self {
        let ranges = if ranges.is_empty() {
            vec![KeyRange::all()]
        } else {
            KeyRange::normalize(ranges)
        };
        Self { store, ranges }
    }

    pub fn ranges(&self) -> &[KeyRange] {
        &self.ranges
    }

    /// Returns an iterator over the cells inside the scan's ranges.
    pub fn iter(&self) -> TableIterator<'_> {
        TableIterator {
            iter: Box::new(
                self.ranges
                    .iter()
                    .flat_map(move |range| self.store.scan(range)),
            ),
        }
    }
}

/// Iterator over the cells of a `TableScan`.
///
/// This iterator borrows from `TableScan` and thus cannot outlive it.
pub struct TableIterator<'a> {
    iter: TableStoreIterator<'a>,
}

impl Iterator for TableIterator<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::cell::Column;
    use crate::storage::row::Row;

    fn store() -> Arc<TableStore> {
        let store = TableStore::new();
        for row_id in ["r1", "r2", "r3", "r4"] {
            store.put_row(&Row::empty(row_id).add(Column::new("cf", "name"), row_id));
        }
        Arc::new(store)
    }

    fn scanned_rows(table_scan: &TableScan) -> Vec<Vec<u8>> {
        table_scan
            .iter()
            .map(|cell| cell.key().row().to_vec())
            .collect()
    }

    #[test]
    fn scan_the_whole_table() {
        let table_scan = TableScan::new(store());
        assert_eq!(4, table_scan.iter().count());
    }

    #[test]
    fn scan_two_ranges_in_order() {
        let table_scan = TableScan::with_ranges(
            store(),
            vec![KeyRange::exact("r1"), KeyRange::greater_than("r3")],
        );

        assert_eq!(vec![b"r1".to_vec(), b"r4".to_vec()], scanned_rows(&table_scan));
    }

    #[test]
    fn scan_overlapping_ranges_given_out_of_order() {
        let table_scan = TableScan::with_ranges(
            store(),
            vec![
                KeyRange::at_least("r3"),
                KeyRange::exact("r1"),
                KeyRange::new(
                    std::ops::Bound::Included(b"r3".to_vec()),
                    std::ops::Bound::Included(b"r4".to_vec()),
                ),
            ],
        );

        assert_eq!(
            vec![b"r1".to_vec(), b"r3".to_vec(), b"r4".to_vec()],
            scanned_rows(&table_scan)
        );
    }

    #[test]
    fn skip_an_empty_range() {
        let empty = KeyRange::exact("r1").intersect(&KeyRange::exact("r2"));
        let table_scan = TableScan::with_ranges(store(), vec![empty]);

        assert_eq!(0, table_scan.iter().count());
    }

    #[test]
    fn scan_can_be_iterated_more_than_once() {
        let table_scan = TableScan::with_ranges(store(), vec![KeyRange::exact("r2")]);

        assert_eq!(1, table_scan.iter().count());
        assert_eq!(1, table_scan.iter().count());
    }
}
