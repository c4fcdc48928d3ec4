use crate::storage::cell::{Cell, Column, Key};
use crate::types::RawValue;
use std::collections::BTreeMap;

/// `Row` is the unit a filter stage decides on: a row identifier together
/// with every column stored under it.
///
/// Entries are kept sorted by column, so two rows with the same content are
/// equal regardless of the order their entries were added in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    row_id: Vec<u8>,
    entries: BTreeMap<Column, RawValue>,
}

impl Row {
    pub fn empty(row_id: impl Into<Vec<u8>>) -> Row {
        Self {
            row_id: row_id.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn filled(row_id: impl Into<Vec<u8>>, entries: Vec<(Column, RawValue)>) -> Row {
        Self {
            row_id: row_id.into(),
            entries: entries.into_iter().collect(),
        }
    }

    pub fn add(mut self, column: Column, value: impl Into<RawValue>) -> Self {
        self.entries.insert(column, value.into());
        self
    }

    pub(crate) fn insert(&mut self, column: Column, value: RawValue) {
        self.entries.insert(column, value);
    }

    pub fn row_id(&self) -> &[u8] {
        &self.row_id
    }

    /// Returns the value stored at `column`, or `None` if the row lacks it.
    pub fn value(&self, column: &Column) -> Option<&[u8]> {
        self.entries.get(column).map(Vec::as_slice)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Column, &[u8])> + '_ {
        self.entries
            .iter()
            .map(|(column, value)| (column, value.as_slice()))
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the row's key/value pairs in key order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.entries
            .iter()
            .map(|(column, value)| Cell::new(Key::new(self.row_id.clone(), column.clone()), value.clone()))
    }

    /// Returns the only entry of the row if the row holds exactly one.
    pub(crate) fn single_entry(&self) -> Option<(&Column, &[u8])> {
        if self.entries.len() != 1 {
            return None;
        }
        self.entries().next()
    }
}
