use crate::filter::error::FilterError;
use crate::filter::CellResult;
use crate::storage::row::Row;
use std::iter::Peekable;

/// Gathers the next run of cells sharing a row identifier into one `Row`.
///
/// Cells arrive in key order, so a row ends at the first cell with a different
/// row identifier. An error in the source is returned as soon as it is reached.
pub(crate) fn next_row<I>(source: &mut Peekable<I>) -> Option<Result<Row, FilterError>>
where
    I: Iterator<Item = CellResult>,
{
    let (key, value) = match source.next()? {
        Ok(cell) => cell.into_parts(),
        Err(error) => return Some(Err(error)),
    };
    let (row_id, column) = key.into_parts();
    let mut row = Row::empty(row_id);
    row.insert(column, value);

    while let Some(next) = source.next_if(|next| match next {
        Ok(cell) => cell.key().row() == row.row_id(),
        Err(_) => true,
    }) {
        let (key, value) = match next {
            Ok(cell) => cell.into_parts(),
            Err(error) => return Some(Err(error)),
        };
        row.insert(key.into_parts().1, value);
    }
    Some(Ok(row))
}
