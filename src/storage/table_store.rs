use crate::storage::cell::{Cell, Key};
use crate::storage::range::KeyRange;
use crate::storage::row::Row;
use crate::types::RawValue;
use crossbeam_skiplist::SkipMap;
use std::ops::Bound;

/// Iterator over the cells of a `TableStore`, in key order.
pub type TableStoreIterator<'a> = Box<dyn Iterator<Item = Cell> + 'a>;

/// `TableStore` is the sorted key/value store the filter stages run over.
///
/// Cells are kept ordered by `Key` (row identifier, then family, then qualifier),
/// so all cells of one row are adjacent in a scan.
pub struct TableStore {
    entries: SkipMap<Key, RawValue>,
}

impl TableStore {
    pub fn new() -> TableStore {
        Self {
            entries: SkipMap::new(),
        }
    }

    pub fn put(&self, key: Key, value: RawValue) {
        self.entries.insert(key, value);
    }

    /// Stores every entry of the row under the row's identifier.
    pub fn put_row(&self, row: &Row) {
        for cell in row.cells() {
            let (key, value) = cell.into_parts();
            self.put(key, value);
        }
    }

    pub fn put_rows(&self, rows: &[Row]) {
        for row in rows {
            self.put_row(row);
        }
    }

    pub fn get(&self, key: &Key) -> Option<RawValue> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Returns the cells whose row identifier falls inside `range`, in key order.
    ///
    /// The scan is lazy; cells are read from the store as the iterator advances.
    pub fn scan<'a>(&'a self, range: &'a KeyRange) -> TableStoreIterator<'a> {
        let start = match range.start() {
            Bound::Included(row) | Bound::Excluded(row) => Bound::Included(Key::row_start(row)),
            Bound::Unbounded => Bound::Unbounded,
        };

        Box::new(
            self.entries
                .range((start, Bound::Unbounded))
                .skip_while(move |entry| !range.is_after_start(entry.key().row()))
                .take_while(move |entry| range.is_before_end(entry.key().row()))
                .map(|entry| Cell::new(entry.key().clone(), entry.value().clone())),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new()
    }
}
