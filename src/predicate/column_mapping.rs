use crate::predicate::error::MappingError;
use crate::storage::cell::Column;
use crate::types::comparator_type::ComparatorType;
use std::collections::HashMap;

/// The store location a logical column resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnTarget {
    /// The row identifier itself.
    RowId,
    /// A stored column with its declared type.
    Cell {
        column: Column,
        comparator_type: ComparatorType,
    },
}

/// `ColumnMapping` maps logical column names, case-insensitively, to where the
/// values live in the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMapping {
    targets: HashMap<String, ColumnTarget>,
}

/// The mapping entry that stands for the row identifier.
pub const ROW_ID_MAPPING: &str = "rowID";

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a mapping in the form hosts declare it in table properties.
    ///
    /// # Arguments
    ///
    /// * `names` - Comma-separated logical column names.
    /// * `mappings` - Comma-separated store columns, `family|qualifier` or `rowID`, one per name.
    /// * `types` - Colon-separated type names, one per name. Every column is a string when absent.
    ///
    /// # Returns
    ///
    /// * `Ok(ColumnMapping)` - If every name has exactly one valid mapping and type.
    /// * `Err(MappingError)` - Otherwise.
    pub fn parse(names: &str, mappings: &str, types: Option<&str>) -> Result<Self, MappingError> {
        let names: Vec<&str> = split_list(names, ',');
        let mappings: Vec<&str> = split_list(mappings, ',');
        if names.len() != mappings.len() {
            return Err(MappingError::ColumnCountMismatch {
                names: names.len(),
                mappings: mappings.len(),
            });
        }

        let types = match types {
            Some(types) => split_list(types, ':')
                .into_iter()
                .map(|name| {
                    ComparatorType::parse(name)
                        .ok_or_else(|| MappingError::UnknownType(name.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => vec![ComparatorType::String; names.len()],
        };
        if types.len() != names.len() {
            return Err(MappingError::TypeCountMismatch {
                names: names.len(),
                types: types.len(),
            });
        }

        let mut mapping = ColumnMapping::new();
        let mut has_row_id = false;
        for ((name, target), comparator_type) in names.into_iter().zip(mappings).zip(types) {
            if target == ROW_ID_MAPPING {
                if has_row_id {
                    return Err(MappingError::DuplicateRowId);
                }
                has_row_id = true;
                mapping = mapping.with_row_id(name);
            } else {
                let column = Column::parse(target)
                    .filter(|column| !column.qualifier().is_empty())
                    .ok_or_else(|| MappingError::InvalidColumn(target.to_string()))?;
                mapping = mapping.with_column(name, column, comparator_type);
            }
        }
        Ok(mapping)
    }

    /// Maps `name` to the row identifier.
    pub fn with_row_id(mut self, name: &str) -> Self {
        self.targets.insert(name.to_lowercase(), ColumnTarget::RowId);
        self
    }

    /// Maps `name` to a stored column of the given type.
    pub fn with_column(mut self, name: &str, column: Column, comparator_type: ComparatorType) -> Self {
        self.targets.insert(
            name.to_lowercase(),
            ColumnTarget::Cell {
                column,
                comparator_type,
            },
        );
        self
    }

    /// Resolves a logical column name, or `None` if it is not mapped.
    pub fn target(&self, name: &str) -> Option<&ColumnTarget> {
        self.targets.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

fn split_list(list: &str, separator: char) -> Vec<&str> {
    list.split(separator)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}
