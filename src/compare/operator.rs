use crate::compare::comparator::TypedComparator;
use crate::compare::error::CompareError;
use crate::compare::like_pattern::LikePattern;
use crate::types::comparator_type::ComparatorType;
use std::cmp::Ordering;

/// `OperatorKind` defines the relational tests a stage can apply.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum OperatorKind {
    /// Equal to `=`.
    Equal,
    /// Not equal to `!=`.
    NotEqual,
    /// Greater than `>`.
    GreaterThan,
    /// Greater than or equal to `>=`.
    GreaterThanOrEqual,
    /// Less than `<`.
    LessThan,
    /// Less than or equal to `<=`.
    LessThanOrEqual,
    /// Pattern match with `%` wildcards. Strings only.
    Like,
}

impl OperatorKind {
    /// Returns the name used for this operator in a stage configuration.
    pub fn name(&self) -> &'static str {
        match self {
            OperatorKind::Equal => "eq",
            OperatorKind::NotEqual => "ne",
            OperatorKind::GreaterThan => "gt",
            OperatorKind::GreaterThanOrEqual => "gte",
            OperatorKind::LessThan => "lt",
            OperatorKind::LessThanOrEqual => "lte",
            OperatorKind::Like => "like",
        }
    }

    pub fn parse(name: &str) -> Option<OperatorKind> {
        match name.trim().to_ascii_lowercase().as_str() {
            "eq" => Some(OperatorKind::Equal),
            "ne" => Some(OperatorKind::NotEqual),
            "gt" => Some(OperatorKind::GreaterThan),
            "gte" => Some(OperatorKind::GreaterThanOrEqual),
            "lt" => Some(OperatorKind::LessThan),
            "lte" => Some(OperatorKind::LessThanOrEqual),
            "like" => Some(OperatorKind::Like),
            _ => None,
        }
    }

    /// Maps the ordering of a value relative to the constant to the test's outcome.
    ///
    /// `Like` never holds for an ordering; it is evaluated on raw bytes instead.
    fn holds_for(&self, ordering: Ordering) -> bool {
        match self {
            OperatorKind::Equal => ordering.is_eq(),
            OperatorKind::NotEqual => ordering.is_ne(),
            OperatorKind::GreaterThan => ordering.is_gt(),
            OperatorKind::GreaterThanOrEqual => ordering.is_ge(),
            OperatorKind::LessThan => ordering.is_lt(),
            OperatorKind::LessThanOrEqual => ordering.is_le(),
            OperatorKind::Like => false,
        }
    }
}

/// `ComparisonOperator` pairs one `TypedComparator` with one relational test.
///
/// Every test except `Like` is expressed through the three-way ordering the
/// comparator returns, so a new primitive type needs no change here. `Like`
/// matches the raw bytes against the comparator's string constant, read as a pattern.
#[derive(Debug, Clone)]
pub struct ComparisonOperator {
    kind: OperatorKind,
    comparator: TypedComparator,
    pattern: Option<LikePattern>,
}

impl ComparisonOperator {
    /// Creates a new `ComparisonOperator`.
    ///
    /// # Returns
    ///
    /// * `Ok(ComparisonOperator)` - The operator, ready to evaluate values.
    /// * `Err(CompareError::UnsupportedOperatorForType)` - If `Like` is requested on a non-string comparator.
    /// * `Err(CompareError::InvalidPattern)` - If the `Like` pattern cannot be compiled.
    pub fn new(kind: OperatorKind, comparator: TypedComparator) -> Result<Self, CompareError> {
        let pattern = match kind {
            OperatorKind::Like => {
                let pattern = comparator.constant().string_value().ok_or(
                    CompareError::UnsupportedOperatorForType {
                        operator: kind,
                        comparator_type: comparator.comparator_type(),
                    },
                )?;
                Some(LikePattern::new(pattern)?)
            }
            _ => None,
        };

        Ok(Self {
            kind,
            comparator,
            pattern,
        })
    }

    /// Evaluates the test against a stored value.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the value satisfies the test.
    /// * `Ok(false)` - If it does not.
    /// * `Err(CompareError)` - If the value cannot be read as the comparator's type.
    pub fn accept(&self, bytes: &[u8]) -> Result<bool, CompareError> {
        if let Some(pattern) = &self.pattern {
            return Ok(pattern.matches(bytes));
        }
        let ordering = self.comparator.compare(bytes)?;
        Ok(self.kind.holds_for(ordering))
    }

    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    pub fn comparator_type(&self) -> ComparatorType {
        self.comparator.comparator_type()
    }
}
