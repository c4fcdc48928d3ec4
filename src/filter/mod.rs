use crate::filter::error::FilterError;
use crate::storage::cell::Cell;
use crate::storage::table_scan::TableScan;

pub mod error;
pub(crate) mod layers;
pub(crate) mod row_assembler;
pub mod row_filter_stage;
pub mod scanner;
pub mod stage_config;

/// Represents the result for an individual cell leaving a stage.
pub type CellResult = Result<Cell, FilterError>;

/// A stream of cells flowing up the stage stack.
pub type CellStream<'a> = Box<dyn Iterator<Item = CellResult> + 'a>;

/// Lifts the raw cells of a table scan into the stream the bottom stage reads.
pub(crate) fn raw_cells(table_scan: &TableScan) -> CellStream<'_> {
    Box::new(table_scan.iter().map(Ok::<Cell, FilterError>))
}
