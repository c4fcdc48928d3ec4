use crate::types::comparator_type::ComparatorType;
use crate::types::RawValue;
use std::cmp::Ordering;

/// A value deserialized from its raw bytes according to a declared `ComparatorType`.
#[derive(Debug, PartialEq, Clone)]
pub enum TypedValue {
    String(String),
    Int32(i32),
    Int64(i64),
    Float64(f64),
}

impl TypedValue {
    /// Returns the type this value belongs to.
    pub fn comparator_type(&self) -> ComparatorType {
        match self {
            TypedValue::String(_) => ComparatorType::String,
            TypedValue::Int32(_) => ComparatorType::Int32,
            TypedValue::Int64(_) => ComparatorType::Int64,
            TypedValue::Float64(_) => ComparatorType::Float64,
        }
    }

    /// Serializes the value into its fixed byte layout.
    ///
    /// Integers and doubles are written big-endian; strings are written as UTF-8.
    pub fn to_bytes(&self) -> RawValue {
        match self {
            TypedValue::String(value) => value.as_bytes().to_vec(),
            TypedValue::Int32(value) => value.to_be_bytes().to_vec(),
            TypedValue::Int64(value) => value.to_be_bytes().to_vec(),
            TypedValue::Float64(value) => value.to_be_bytes().to_vec(),
        }
    }

    /// Deserializes `bytes` as a value of `comparator_type`.
    ///
    /// Returns `None` if the bytes do not follow the type's layout: a wrong
    /// length for the fixed-width types, or invalid UTF-8 for strings.
    pub fn from_bytes(comparator_type: ComparatorType, bytes: &[u8]) -> Option<TypedValue> {
        match comparator_type {
            ComparatorType::String => std::str::from_utf8(bytes)
                .ok()
                .map(|value| TypedValue::String(value.to_string())),
            ComparatorType::Int32 => <[u8; 4]>::try_from(bytes)
                .ok()
                .map(|bytes| TypedValue::Int32(i32::from_be_bytes(bytes))),
            ComparatorType::Int64 => <[u8; 8]>::try_from(bytes)
                .ok()
                .map(|bytes| TypedValue::Int64(i64::from_be_bytes(bytes))),
            ComparatorType::Float64 => <[u8; 8]>::try_from(bytes)
                .ok()
                .map(|bytes| TypedValue::Float64(f64::from_be_bytes(bytes))),
        }
    }

    /// Orders two values of the same type by the type's natural ordering.
    ///
    /// Returns `None` for values of different types, and for doubles that have
    /// no IEEE ordering (either side is NaN).
    pub(crate) fn compare(&self, other: &TypedValue) -> Option<Ordering> {
        match (self, other) {
            (TypedValue::String(left), TypedValue::String(right)) => Some(left.cmp(right)),
            (TypedValue::Int32(left), TypedValue::Int32(right)) => Some(left.cmp(right)),
            (TypedValue::Int64(left), TypedValue::Int64(right)) => Some(left.cmp(right)),
            (TypedValue::Float64(left), TypedValue::Float64(right)) => left.partial_cmp(right),
            _ => None,
        }
    }

    pub(crate) fn is_nan(&self) -> bool {
        matches!(self, TypedValue::Float64(value) if value.is_nan())
    }

    pub(crate) fn string_value(&self) -> Option<&str> {
        if let TypedValue::String(ref value) = self {
            return Some(value);
        }
        None
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::String(value.to_string())
    }
}

impl From<i32> for TypedValue {
    fn from(value: i32) -> Self {
        TypedValue::Int32(value)
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        TypedValue::Int64(value)
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        TypedValue::Float64(value)
    }
}
