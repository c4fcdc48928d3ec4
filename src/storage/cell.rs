use crate::types::RawValue;
use std::fmt::{Display, Formatter};

const FAMILY_QUALIFIER_SEPARATOR: char = '|';

/// A column address inside a row: a family and a qualifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column {
    family: Vec<u8>,
    qualifier: Vec<u8>,
}

impl Column {
    pub fn new(family: impl Into<Vec<u8>>, qualifier: impl Into<Vec<u8>>) -> Self {
        Self {
            family: family.into(),
            qualifier: qualifier.into(),
        }
    }

    /// Parses a column written as `family|qualifier`.
    ///
    /// A column without a separator addresses the empty qualifier of the family.
    /// Returns `None` for an empty family.
    pub fn parse(column: &str) -> Option<Column> {
        let (family, qualifier) = column
            .split_once(FAMILY_QUALIFIER_SEPARATOR)
            .unwrap_or((column, ""));

        if family.is_empty() {
            return None;
        }
        Some(Column::new(family, qualifier))
    }

    pub fn family(&self) -> &[u8] {
        &self.family
    }

    pub fn qualifier(&self) -> &[u8] {
        &self.qualifier
    }
}

impl Display for Column {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}{}{}",
            String::from_utf8_lossy(&self.family),
            FAMILY_QUALIFIER_SEPARATOR,
            String::from_utf8_lossy(&self.qualifier)
        )
    }
}

/// The sort key of a stored value: row identifier first, then column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key {
    row: Vec<u8>,
    column: Column,
}

impl Key {
    pub fn new(row: impl Into<Vec<u8>>, column: Column) -> Self {
        Self {
            row: row.into(),
            column,
        }
    }

    /// Returns the smallest key of the given row.
    pub(crate) fn row_start(row: &[u8]) -> Self {
        Key::new(row, Column::new("", ""))
    }

    pub fn row(&self) -> &[u8] {
        &self.row
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn into_parts(self) -> (Vec<u8>, Column) {
        (self.row, self.column)
    }
}

/// One key/value pair as it streams out of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    key: Key,
    value: RawValue,
}

impl Cell {
    pub fn new(key: Key, value: RawValue) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn into_parts(self) -> (Key, RawValue) {
        (self.key, self.value)
    }
}
