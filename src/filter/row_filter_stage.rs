use crate::compare::operator::ComparisonOperator;
use crate::filter::error::FilterError;
use crate::filter::layers::{peel_layers, wrap_cell};
use crate::filter::row_assembler::next_row;
use crate::filter::stage_config::RowFilterStageConfig;
use crate::filter::{CellResult, CellStream};
use crate::storage::cell::{Cell, Column};
use crate::storage::envelope::encode_row;
use crate::storage::row::Row;
use std::iter::Peekable;
use tracing::{debug, warn};

/// `RowFilterStage` is one filtering boundary of the scan pipeline.
///
/// It reads from the layer below, decides on whole rows, and emits one
/// envelope cell per accepted row. Stage `0` reads raw cells, groups them by
/// row identifier and wraps the row. Stage `k > 0` reads cells carrying `k`
/// layers, peels them to evaluate the row, and wraps the cell it received,
/// so every stage adds exactly one layer.
///
/// A row that lacks the stage's column is rejected, whatever the operator.
/// An error while evaluating a row is yielded once and ends the stream.
pub struct RowFilterStage<'a> {
    source: Peekable<CellStream<'a>>,
    column: Column,
    operator: ComparisonOperator,
    ordinal: usize,
    finished: bool,
}

impl<'a> RowFilterStage<'a> {
    /// Creates a new `RowFilterStage` over `source`.
    ///
    /// # Arguments
    ///
    /// * `source` - The cells of the layer below: raw cells for stage `0`, envelopes otherwise.
    /// * `config` - The stage's configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(RowFilterStage)` - The stage, ready to stream.
    /// * `Err(FilterError::Compare)` - If the constant or the operator do not fit the declared type.
    pub fn new(source: CellStream<'a>, config: &RowFilterStageConfig) -> Result<Self, FilterError> {
        let operator = config.prepare()?;
        debug!(
            ordinal = config.ordinal(),
            column = %config.column(),
            operator = config.operator_kind().name(),
            comparator = config.comparator_type().name(),
            "row filter stage prepared"
        );

        Ok(Self {
            source: source.peekable(),
            column: config.column().clone(),
            operator,
            ordinal: config.ordinal(),
            finished: false,
        })
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Reads the next row from the layer below, with the cell to re-emit if it is accepted.
    fn next_input(&mut self) -> Option<Result<(Row, Option<Cell>), FilterError>> {
        if self.ordinal == 0 {
            return next_row(&mut self.source).map(|row| row.map(|row| (row, None)));
        }
        let cell = match self.source.next()? {
            Ok(cell) => cell,
            Err(error) => return Some(Err(error)),
        };
        Some(peel_layers(cell.key(), cell.value(), self.ordinal).map(|row| (row, Some(cell))))
    }

    fn accepts(&self, row: &Row) -> Result<bool, FilterError> {
        match row.value(&self.column) {
            Some(value) => Ok(self.operator.accept(value)?),
            None => Ok(false),
        }
    }

    fn abort(&mut self, error: FilterError) -> Option<CellResult> {
        warn!(
            ordinal = self.ordinal,
            column = %self.column,
            error = %error,
            "row filter stage aborted the scan"
        );
        self.finished = true;
        Some(Err(error))
    }
}

impl Iterator for RowFilterStage<'_> {
    type Item = CellResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let (row, received) = match self.next_input() {
                None => {
                    self.finished = true;
                    return None;
                }
                Some(Ok(input)) => input,
                Some(Err(error)) => return self.abort(error),
            };
            match self.accepts(&row) {
                Ok(true) => {
                    let emitted = match received {
                        Some(cell) => wrap_cell(cell),
                        None => encode_row(&row),
                    };
                    return match emitted {
                        Ok(cell) => Some(Ok(cell)),
                        Err(error) => self.abort(error.into()),
                    };
                }
                Ok(false) => continue,
                Err(error) => return self.abort(error),
            }
        }
    }
}
