use crate::filter::error::FilterError;
use crate::predicate::column_mapping::ColumnMapping;
use crate::storage::cell::Column;
use crate::storage::row::Row;
use crate::storage::table_store::TableStore;
use crate::types::comparator_type::ComparatorType;
use crate::types::typed_value::TypedValue;
use crate::{row, rows};

/// The column family every student column is stored under.
pub const FAMILY: &str = "cf";

/// Three students, in row identifier order.
pub fn student_rows() -> Vec<Row> {
    rows![
        ["r1", FAMILY => "name" => "brian", FAMILY => "sid" => 1, FAMILY => "dgrs" => 44.5, FAMILY => "mills" => 555i64],
        ["r2", FAMILY => "name" => "mark", FAMILY => "sid" => 2, FAMILY => "dgrs" => 55.5, FAMILY => "mills" => 666i64],
        ["r3", FAMILY => "name" => "dennis", FAMILY => "sid" => 3, FAMILY => "dgrs" => 65.5, FAMILY => "mills" => 777i64]
    ]
}

/// A store holding the student rows.
pub fn student_store() -> TableStore {
    let store = TableStore::new();
    store.put_rows(&student_rows());
    store
}

/// Maps the logical student columns onto the store: `rowid` is the row identifier.
pub fn student_mapping() -> ColumnMapping {
    ColumnMapping::new()
        .with_row_id("rowid")
        .with_column("name", Column::new(FAMILY, "name"), ComparatorType::String)
        .with_column("sid", Column::new(FAMILY, "sid"), ComparatorType::Int32)
        .with_column("dgrs", Column::new(FAMILY, "dgrs"), ComparatorType::Float64)
        .with_column("mills", Column::new(FAMILY, "mills"), ComparatorType::Int64)
}

/// A single-entry row, used where a test only needs one column.
pub fn single_column_row(row_id: &str, qualifier: &str, value: TypedValue) -> Row {
    row!(row_id, FAMILY => qualifier => value)
}

/// A helper struct for asserting properties of a single `Row`.
///
/// `RowAssertion` provides a fluent interface for checking expected values of columns
/// within a row. It is typically created via the [`assert_row`] function.
pub struct RowAssertion(Row);

/// Creates a `RowAssertion` for the given row.
pub fn assert_row(row: Row) -> RowAssertion {
    RowAssertion(row)
}

/// Asserts that the iterator has no rows left.
///
/// # Panics
///
/// Panics if the iterator yields another row or an error.
pub fn assert_no_more_rows(iterator: &mut dyn Iterator<Item = Result<Row, FilterError>>) {
    assert!(iterator.next().is_none());
}

impl RowAssertion {
    /// Asserts that the row has the expected identifier.
    pub fn row_id(self, expected: &str) -> Self {
        assert_eq!(expected.as_bytes(), self.0.row_id(), "Mismatch in row id");
        self
    }

    /// Asserts that the row holds exactly `expected` entries.
    pub fn entry_count(self, expected: usize) -> Self {
        assert_eq!(expected, self.0.entry_count(), "Mismatch in entry count");
        self
    }

    /// Asserts that a student column exists and has the expected value.
    ///
    /// # Arguments
    ///
    /// * `qualifier` - The qualifier of the column to check, under the student family.
    /// * `expected` - The expected value. `TypedValue` implements `From` for common types,
    ///   so you can pass `10`, `"string"`, etc. directly.
    ///
    /// # Panics
    ///
    /// Panics if the column does not exist or if the value does not match.
    pub fn match_column<V: Into<TypedValue>>(self, qualifier: &str, expected: V) -> Self {
        let actual = self
            .0
            .value(&Column::new(FAMILY, qualifier))
            .expect("Column not found");
        assert_eq!(
            expected.into().to_bytes().as_slice(),
            actual,
            "Mismatch in column '{}'",
            qualifier
        );
        self
    }

    /// Asserts that a student column does not exist in the row.
    pub fn does_not_have_column(self, qualifier: &str) -> Self {
        assert!(self.0.value(&Column::new(FAMILY, qualifier)).is_none());
        self
    }
}
