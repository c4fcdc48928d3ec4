use crate::compare::operator::OperatorKind;
use crate::types::comparator_type::ComparatorType;
use std::fmt::{Display, Formatter};

/// Represents errors raised while building or evaluating a comparison.
#[derive(Debug, PartialEq)]
pub enum CompareError {
    /// A stage's constant does not follow its declared type's byte layout.
    /// Raised at setup, before a scan starts.
    MalformedConstant {
        /// The declared type of the constant.
        expected: ComparatorType,
        /// The length of the rejected bytes.
        length: usize,
    },
    /// A stored value does not follow the declared type's byte layout.
    /// Raised during evaluation and aborts the scan.
    MalformedValue {
        /// The declared type of the column.
        expected: ComparatorType,
        /// The length of the rejected bytes.
        length: usize,
    },
    /// The operator is not defined for the comparator's type (e.g. `like` on a number).
    UnsupportedOperatorForType {
        operator: OperatorKind,
        comparator_type: ComparatorType,
    },
    /// A stored double is NaN, which has no ordering against the constant.
    UnorderedValue,
    /// The LIKE pattern could not be compiled.
    InvalidPattern(String),
}

impl Display for CompareError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CompareError::MalformedConstant { expected, length } => write!(
                formatter,
                "constant of {} bytes is not a valid {} value",
                length, expected
            ),
            CompareError::MalformedValue { expected, length } => write!(
                formatter,
                "stored value of {} bytes is not a valid {} value",
                length, expected
            ),
            CompareError::UnsupportedOperatorForType {
                operator,
                comparator_type,
            } => write!(
                formatter,
                "operator {} is not supported for {} comparator",
                operator.name(),
                comparator_type
            ),
            CompareError::UnorderedValue => {
                write!(formatter, "NaN cannot be ordered against the constant")
            }
            CompareError::InvalidPattern(reason) => {
                write!(formatter, "invalid like pattern: {}", reason)
            }
        }
    }
}

impl std::error::Error for CompareError {}

impl From<regex::Error> for CompareError {
    fn from(error: regex::Error) -> Self {
        CompareError::InvalidPattern(error.to_string())
    }
}
