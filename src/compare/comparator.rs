use crate::compare::error::CompareError;
use crate::types::comparator_type::ComparatorType;
use crate::types::typed_value::TypedValue;
use std::cmp::Ordering;

/// `TypedComparator` holds one constant of a declared primitive type and
/// orders raw values of that type against it.
///
/// The constant is deserialized once, when the comparator is initialized,
/// and never changes afterwards. A comparator carries no operator logic.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedComparator {
    comparator_type: ComparatorType,
    constant: TypedValue,
}

impl TypedComparator {
    /// Initializes a comparator from the constant's raw bytes.
    ///
    /// # Arguments
    ///
    /// * `comparator_type` - The declared type of the constant and of every value compared against it.
    /// * `bytes` - The constant in the type's byte layout.
    ///
    /// # Returns
    ///
    /// * `Ok(TypedComparator)` - If the bytes follow the layout.
    /// * `Err(CompareError::MalformedConstant)` - If they do not, or if the constant is a NaN double.
    pub fn init(comparator_type: ComparatorType, bytes: &[u8]) -> Result<Self, CompareError> {
        let constant = TypedValue::from_bytes(comparator_type, bytes)
            .filter(|constant| !constant.is_nan())
            .ok_or(CompareError::MalformedConstant {
                expected: comparator_type,
                length: bytes.len(),
            })?;

        Ok(Self {
            comparator_type,
            constant,
        })
    }

    /// Deserializes a stored value into this comparator's type.
    ///
    /// Fails with `MalformedValue` when the bytes do not follow the layout; the
    /// caller treats this as a schema mismatch, not as a non-matching row.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<TypedValue, CompareError> {
        TypedValue::from_bytes(self.comparator_type, bytes).ok_or(CompareError::MalformedValue {
            expected: self.comparator_type,
            length: bytes.len(),
        })
    }

    /// Orders a stored value against the constant (`value.cmp(constant)`).
    ///
    /// # Returns
    ///
    /// * `Ok(Ordering)` - The ordering of the value relative to the constant.
    /// * `Err(CompareError::MalformedValue)` - If the value does not follow the layout.
    /// * `Err(CompareError::UnorderedValue)` - If the value is a NaN double.
    pub fn compare(&self, bytes: &[u8]) -> Result<Ordering, CompareError> {
        let value = self.deserialize(bytes)?;
        value
            .compare(&self.constant)
            .ok_or(CompareError::UnorderedValue)
    }

    pub fn comparator_type(&self) -> ComparatorType {
        self.comparator_type
    }

    pub fn constant(&self) -> &TypedValue {
        &self.constant
    }
}
