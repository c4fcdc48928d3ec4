use std::fmt::{Display, Formatter};

/// Represents errors that can occur while building a `ColumnMapping`.
#[derive(Debug, PartialEq)]
pub enum MappingError {
    /// The number of logical columns and mapped store columns differ.
    ColumnCountMismatch { names: usize, mappings: usize },
    /// The number of declared types differs from the number of logical columns.
    TypeCountMismatch { names: usize, types: usize },
    /// A store column is not of the form `family|qualifier`.
    InvalidColumn(String),
    /// A declared type name is not a supported comparator type.
    UnknownType(String),
    /// More than one logical column is mapped to the row identifier.
    DuplicateRowId,
}

impl Display for MappingError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingError::ColumnCountMismatch { names, mappings } => write!(
                formatter,
                "{} logical columns but {} mapped columns",
                names, mappings
            ),
            MappingError::TypeCountMismatch { names, types } => write!(
                formatter,
                "{} logical columns but {} declared types",
                names, types
            ),
            MappingError::InvalidColumn(column) => {
                write!(formatter, "invalid column mapping '{}'", column)
            }
            MappingError::UnknownType(name) => write!(formatter, "unknown column type '{}'", name),
            MappingError::DuplicateRowId => {
                write!(formatter, "the row identifier is mapped more than once")
            }
        }
    }
}

impl std::error::Error for MappingError {}
