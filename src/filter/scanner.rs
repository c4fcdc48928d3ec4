use crate::config::PushdownConfig;
use crate::filter::error::FilterError;
use crate::filter::row_assembler::next_row;
use crate::filter::row_filter_stage::RowFilterStage;
use crate::filter::stage_config::RowFilterStageConfig;
use crate::filter::{raw_cells, CellStream};
use crate::predicate::decomposed::DecomposedPredicate;
use crate::predicate::handler::PredicateHandler;
use crate::storage::range::KeyRange;
use crate::storage::row::Row;
use crate::storage::table_scan::TableScan;
use crate::storage::table_store::TableStore;
use std::iter::Peekable;
use std::sync::Arc;

/// `Scanner` runs one filtered scan: a `TableScan` at the bottom with a stack
/// of `RowFilterStage`s on top, stage `0` closest to the data.
///
/// Each call to `iter` or `rows` builds an independent stack, so one scanner
/// can serve several scans.
pub struct Scanner {
    table_scan: TableScan,
    stages: Vec<RowFilterStageConfig>,
    prefix: String,
}

impl Scanner {
    /// Creates a scanner over the whole table with no stages.
    pub fn new(store: Arc<TableStore>) -> Self {
        Self::with_ranges(store, Vec::new())
    }

    /// Creates a scanner bounded by `ranges` with no stages.
    pub fn with_ranges(store: Arc<TableStore>, ranges: Vec<KeyRange>) -> Self {
        Self {
            table_scan: TableScan::with_ranges(store, ranges),
            stages: Vec::new(),
            prefix: PushdownConfig::default().stage_prefix().to_string(),
        }
    }

    /// Creates a scanner that applies the pushed part of a decomposed predicate.
    ///
    /// # Arguments
    ///
    /// * `store` - The table to scan.
    /// * `decomposed` - Supplies the key ranges and the stage configs.
    /// * `config` - Supplies the prefix the stages are named with.
    pub fn from_decomposed(
        store: Arc<TableStore>,
        decomposed: &DecomposedPredicate,
        config: &PushdownConfig,
    ) -> Self {
        Self {
            table_scan: TableScan::with_ranges(store, decomposed.ranges().to_vec()),
            stages: decomposed.pushed_stages().to_vec(),
            prefix: config.stage_prefix().to_string(),
        }
    }

    pub fn add_stage(&mut self, stage: RowFilterStageConfig) {
        self.stages.push(stage);
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// The names the stages are installed under, in stacking order.
    pub fn stage_names(&self) -> Vec<String> {
        self.ordered_stages()
            .iter()
            .map(|stage| stage.name(&self.prefix))
            .collect()
    }

    pub fn ranges(&self) -> &[KeyRange] {
        self.table_scan.ranges()
    }

    /// Builds the stage stack and returns the cells leaving its top.
    ///
    /// With no stages these are the raw cells of the table; otherwise each cell
    /// is an envelope holding one accepted row, wrapped once per stage.
    ///
    /// # Returns
    ///
    /// * `Ok(CellStream)` - The cell stream, with every stage already prepared.
    /// * `Err(FilterError::InvalidStageOrdinals)` - If the ordinals are not exactly `0..N`.
    /// * `Err(FilterError::Compare)` - If any stage cannot be prepared; no cell is read.
    pub fn iter(&self) -> Result<CellStream<'_>, FilterError> {
        let stages = self.ordered_stages();
        let contiguous = stages
            .iter()
            .enumerate()
            .all(|(position, stage)| stage.ordinal() == position);
        if !contiguous {
            return Err(FilterError::InvalidStageOrdinals(
                self.stages.iter().map(RowFilterStageConfig::ordinal).collect(),
            ));
        }

        stages
            .into_iter()
            .try_fold(raw_cells(&self.table_scan), |source, stage| {
                let stage = RowFilterStage::new(source, stage)?;
                Ok::<CellStream<'_>, FilterError>(Box::new(stage))
            })
    }

    /// Runs the scan and returns plain rows, every envelope layer removed.
    pub fn rows(&self) -> Result<ScanRows<'_>, FilterError> {
        Ok(ScanRows {
            cells: self.iter()?.peekable(),
            layers: self.stage_count(),
            finished: false,
        })
    }

    fn ordered_stages(&self) -> Vec<&RowFilterStageConfig> {
        let mut stages: Vec<&RowFilterStageConfig> = self.stages.iter().collect();
        stages.sort_by_key(|stage| stage.ordinal());
        stages
    }
}

/// Iterator over the rows of a `Scanner`.
///
/// Decodes as many envelope layers per cell as the scanner has stages. Stops
/// after the first error.
pub struct ScanRows<'a> {
    cells: Peekable<CellStream<'a>>,
    layers: usize,
    finished: bool,
}

impl Iterator for ScanRows<'_> {
    type Item = Result<Row, FilterError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let row = if self.layers == 0 {
            next_row(&mut self.cells)
        } else {
            self.cells.next().map(|cell| {
                cell.and_then(|cell| {
                    PredicateHandler::decode_layers(cell.key(), cell.value(), self.layers)
                })
            })
        };
        match row {
            Some(Ok(row)) => Some(Ok(row)),
            Some(Err(error)) => {
                self.finished = true;
                Some(Err(error))
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}
