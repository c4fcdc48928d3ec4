use crate::compare::operator::OperatorKind;
use crate::config::PushdownConfig;
use crate::filter::error::FilterError;
use crate::filter::layers::{layer_error, peel_layers};
use crate::filter::stage_config::RowFilterStageConfig;
use crate::predicate::ast::{BinaryOperator, Literal, Operand, PredicateExpr};
use crate::predicate::column_mapping::{ColumnMapping, ColumnTarget};
use crate::predicate::decomposed::DecomposedPredicate;
use crate::storage::cell::{Column, Key};
use crate::storage::envelope::decode_row;
use crate::storage::range::KeyRange;
use crate::storage::row::Row;
use crate::types::comparator_type::ComparatorType;
use crate::types::typed_value::TypedValue;
use tracing::debug;

/// `PredicateHandler` splits a predicate into what the store can enforce and
/// what the caller must re-check, and decodes what the store returns.
pub struct PredicateHandler {
    mapping: ColumnMapping,
    config: PushdownConfig,
}

/// How a single conjunct can be enforced by the store.
enum Pushdown {
    Range(KeyRange),
    Stage {
        column: Column,
        operator_kind: OperatorKind,
        constant: TypedValue,
    },
}

impl PredicateHandler {
    pub fn new(mapping: ColumnMapping, config: PushdownConfig) -> Self {
        Self { mapping, config }
    }

    /// Decomposes a predicate into stages, key ranges and a residual.
    ///
    /// The predicate is read as a conjunction of terms. A term is pushed when it
    /// compares one mapped column against a literal that converts losslessly to
    /// the column's declared type; row identifier terms become one key range.
    /// Every other term, disjunctions and negations included, is left in the
    /// residual. Stages are numbered in the order their terms appear.
    pub fn decompose(&self, predicate: &PredicateExpr) -> DecomposedPredicate {
        let mut stages: Vec<RowFilterStageConfig> = Vec::new();
        let mut range: Option<KeyRange> = None;
        let mut pushed = Vec::new();
        let mut residual = Vec::new();

        for term in predicate.conjuncts() {
            match self.pushdown_for(term) {
                Some(Pushdown::Range(term_range)) => {
                    range = Some(match range {
                        Some(range) => range.intersect(&term_range),
                        None => term_range,
                    });
                    pushed.push(term.clone());
                }
                Some(Pushdown::Stage {
                    column,
                    operator_kind,
                    constant,
                }) if self.config.iterator_pushdown() => {
                    stages.push(RowFilterStageConfig::typed(
                        stages.len(),
                        column,
                        operator_kind,
                        constant,
                    ));
                    pushed.push(term.clone());
                }
                _ => residual.push(term.clone()),
            }
        }

        debug!(
            stages = stages.len(),
            bounded = range.is_some(),
            residual_terms = residual.len(),
            "predicate decomposed"
        );
        DecomposedPredicate::new(
            stages,
            range.into_iter().collect(),
            PredicateExpr::conjunction(pushed),
            PredicateExpr::conjunction(residual),
        )
    }

    /// Decodes exactly one envelope layer.
    ///
    /// # Returns
    ///
    /// * `Ok(Row)` - The row the envelope carries.
    /// * `Err(FilterError::DecodeLayerMismatch)` - If the pair is not an envelope.
    /// * `Err(FilterError::Envelope)` - If the envelope is damaged.
    pub fn decode_envelope(key: &Key, value: &[u8]) -> Result<Row, FilterError> {
        decode_row(key, value).map_err(|error| layer_error(error, 1))
    }

    /// Decodes `layers` envelope layers, outermost first, and returns the plain row.
    ///
    /// A scan through N stages yields cells wrapped in N layers; decoding must
    /// peel exactly that many.
    pub fn decode_layers(key: &Key, value: &[u8], layers: usize) -> Result<Row, FilterError> {
        peel_layers(key, value, layers)
    }

    fn pushdown_for(&self, term: &PredicateExpr) -> Option<Pushdown> {
        let PredicateExpr::Comparison {
            left,
            operator,
            right,
        } = term
        else {
            return None;
        };
        let (column_name, operator, literal) = match (left, right) {
            (Operand::Column(name), Operand::Literal(literal)) => (name, *operator, literal),
            (Operand::Literal(literal), Operand::Column(name)) => (name, operator.reversed()?, literal),
            _ => return None,
        };

        match self.mapping.target(column_name)? {
            ColumnTarget::RowId => row_id_range(operator, literal).map(Pushdown::Range),
            ColumnTarget::Cell {
                column,
                comparator_type,
            } => {
                if operator == BinaryOperator::Like && *comparator_type != ComparatorType::String {
                    return None;
                }
                Some(Pushdown::Stage {
                    column: column.clone(),
                    operator_kind: operator.operator_kind(),
                    constant: literal.coerce_to(*comparator_type)?,
                })
            }
        }
    }
}

fn row_id_range(operator: BinaryOperator, literal: &Literal) -> Option<KeyRange> {
    let Literal::String(row_id) = literal else {
        return None;
    };
    let row_id = row_id.as_bytes();
    match operator {
        BinaryOperator::Eq => Some(KeyRange::exact(row_id)),
        BinaryOperator::Greater => Some(KeyRange::greater_than(row_id)),
        BinaryOperator::GreaterEq => Some(KeyRange::at_least(row_id)),
        BinaryOperator::Lesser => Some(KeyRange::less_than(row_id)),
        BinaryOperator::LesserEq => Some(KeyRange::at_most(row_id)),
        BinaryOperator::NotEq | BinaryOperator::Like => None,
    }
}
