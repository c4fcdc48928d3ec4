use crate::filter::error::FilterError;
use crate::storage::cell::{Cell, Key};
use crate::storage::envelope::{decode_row, encode_row, is_envelope};
use crate::storage::error::EnvelopeError;
use crate::storage::row::Row;

/// Wraps a cell, usually an envelope already, in one more envelope layer.
pub(crate) fn wrap_cell(cell: Cell) -> Result<Cell, EnvelopeError> {
    let (key, value) = cell.into_parts();
    let (row_id, column) = key.into_parts();
    let mut row = Row::empty(row_id);
    row.insert(column, value);
    encode_row(&row)
}

/// Peels exactly `layers` envelope layers off a cell and returns the plain row.
///
/// Each layer but the innermost holds a single entry: the envelope one level down.
///
/// # Returns
///
/// * `Ok(Row)` - The row with its original entries.
/// * `Err(FilterError::DecodeLayerMismatch)` - If the cell holds fewer or more layers than `layers`.
/// * `Err(FilterError::Envelope)` - If an envelope is damaged.
pub(crate) fn peel_layers(key: &Key, value: &[u8], layers: usize) -> Result<Row, FilterError> {
    let mismatch = FilterError::DecodeLayerMismatch { layers };
    let mut row = Row::empty(key.row());
    row.insert(key.column().clone(), value.to_vec());

    for _ in 0..layers {
        let Some((column, value)) = row.single_entry() else {
            return Err(mismatch);
        };
        let key = Key::new(row.row_id(), column.clone());
        row = decode_row(&key, value).map_err(|error| layer_error(error, layers))?;
    }

    if let Some((column, value)) = row.single_entry() {
        if is_envelope(&Key::new(row.row_id(), column.clone()), value) {
            return Err(mismatch);
        }
    }
    Ok(row)
}

/// A pair that is not an envelope where one was expected means a layer count
/// mismatch, not damage.
pub(crate) fn layer_error(error: EnvelopeError, layers: usize) -> FilterError {
    match error {
        EnvelopeError::NotAnEnvelope => FilterError::DecodeLayerMismatch { layers },
        error => FilterError::Envelope(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{single_column_row, student_rows};
    use crate::types::typed_value::TypedValue;

    #[test]
    fn wrapping_adds_one_layer() {
        let row = student_rows()[1].clone();
        let wrapped = wrap_cell(wrap_cell(encode_row(&row).unwrap()).unwrap()).unwrap();

        assert_eq!(b"r2", wrapped.key().row());
        assert_eq!(row, peel_layers(wrapped.key(), wrapped.value(), 3).unwrap());
    }

    #[test]
    fn peel_no_layers_off_a_plain_cell() {
        let row = single_column_row("r1", "sid", TypedValue::Int32(1));
        let cell = row.cells().next().unwrap();

        assert_eq!(row, peel_layers(cell.key(), cell.value(), 0).unwrap());
    }

    #[test]
    fn attempt_to_peel_too_few_layers() {
        let wrapped = wrap_cell(encode_row(&student_rows()[1]).unwrap()).unwrap();

        let result = peel_layers(wrapped.key(), wrapped.value(), 1);
        assert!(matches!(result, Err(FilterError::DecodeLayerMismatch { layers: 1 })));
    }

    #[test]
    fn attempt_to_peel_too_many_layers() {
        let cell = encode_row(&single_column_row("r1", "sid", TypedValue::Int32(1))).unwrap();

        let result = peel_layers(cell.key(), cell.value(), 2);
        assert!(matches!(result, Err(FilterError::DecodeLayerMismatch { layers: 2 })));
    }

    #[test]
    fn attempt_to_peel_a_damaged_envelope() {
        let cell = encode_row(&student_rows()[0]).unwrap();
        let damaged = &cell.value()[..cell.value().len() - 1];

        let result = peel_layers(cell.key(), damaged, 1);
        assert!(matches!(
            result,
            Err(FilterError::Envelope(EnvelopeError::Truncated { .. }))
        ));
    }
}
