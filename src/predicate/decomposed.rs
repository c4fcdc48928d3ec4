use crate::filter::stage_config::RowFilterStageConfig;
use crate::predicate::ast::PredicateExpr;
use crate::storage::range::KeyRange;

/// The result of splitting a predicate between the store and the caller.
///
/// Every row the store returns satisfies `pushed` and lies within `ranges`.
/// The caller must still apply `residual` to every returned row.
#[derive(Debug, Clone, PartialEq)]
pub struct DecomposedPredicate {
    pushed_stages: Vec<RowFilterStageConfig>,
    ranges: Vec<KeyRange>,
    pushed: Option<PredicateExpr>,
    residual: Option<PredicateExpr>,
}

impl DecomposedPredicate {
    pub(crate) fn new(
        pushed_stages: Vec<RowFilterStageConfig>,
        ranges: Vec<KeyRange>,
        pushed: Option<PredicateExpr>,
        residual: Option<PredicateExpr>,
    ) -> Self {
        Self {
            pushed_stages,
            ranges,
            pushed,
            residual,
        }
    }

    /// The stage configs to install, ordered by ordinal.
    pub fn pushed_stages(&self) -> &[RowFilterStageConfig] {
        &self.pushed_stages
    }

    /// The row identifier ranges bounding the scan; empty means the whole table.
    pub fn ranges(&self) -> &[KeyRange] {
        &self.ranges
    }

    pub fn pushed(&self) -> Option<&PredicateExpr> {
        self.pushed.as_ref()
    }

    pub fn residual(&self) -> Option<&PredicateExpr> {
        self.residual.as_ref()
    }

    /// Returns `true` if the caller has nothing left to check.
    pub fn is_fully_pushed(&self) -> bool {
        self.residual.is_none()
    }
}
