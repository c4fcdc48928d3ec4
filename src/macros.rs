/// Creates a `Row` from a row identifier and a list of `family => qualifier => value` entries.
///
/// Values are converted into `TypedValue`s using `From` implementations and
/// stored in their type's byte layout.
///
/// # Examples
///
/// ```
/// use kvsieve::row;
/// use kvsieve::storage::cell::Column;
///
/// let row = row!("r1", "cf" => "name" => "brian", "cf" => "sid" => 1);
///
/// assert_eq!(b"r1", row.row_id());
/// assert_eq!(Some(1i32.to_be_bytes().as_slice()), row.value(&Column::new("cf", "sid")));
/// ```
#[macro_export]
macro_rules! row {
    ( $row_id:expr $( , $family:expr => $qualifier:expr => $value:expr )* ) => {
        {
            use $crate::storage::cell::Column;
            use $crate::storage::row::Row;
            use $crate::types::typed_value::TypedValue;
            Row::filled($row_id, vec![
                $( (Column::new($family, $qualifier), TypedValue::from($value).to_bytes()) ),*
            ])
        }
    };
}

/// Creates a `Vec<Row>` from a list of row definitions.
///
/// # Examples
///
/// ```
/// use kvsieve::rows;
///
/// let rows = rows![["r1", "cf" => "sid" => 1], ["r2", "cf" => "sid" => 2]];
/// assert_eq!(2, rows.len());
/// ```
#[macro_export]
macro_rules! rows {
    ( $( [ $( $definition:tt )* ] ),* $(,)? ) => {
        vec![
            $(
                $crate::row![ $( $definition )* ]
            ),*
        ]
    };
}
