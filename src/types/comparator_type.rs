use std::fmt::{Display, Formatter};

/// `ComparatorType` is the primitive type a column is declared with.
///
/// The type decides the byte layout used to deserialize a stored value and
/// the natural ordering used to compare two values of that type.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ComparatorType {
    /// UTF-8 text, ordered lexicographically.
    String,
    /// 4-byte big-endian signed integer.
    Int32,
    /// 8-byte big-endian signed integer.
    Int64,
    /// 8-byte big-endian IEEE-754 double.
    Float64,
}

impl ComparatorType {
    /// Returns the name used for this type in a stage configuration.
    pub fn name(&self) -> &'static str {
        match self {
            ComparatorType::String => "string",
            ComparatorType::Int32 => "int32",
            ComparatorType::Int64 => "int64",
            ComparatorType::Float64 => "float64",
        }
    }

    /// Parses a type name.
    ///
    /// Besides the names returned by [`ComparatorType::name`], the column type
    /// names of a Hive-style table definition (`int`, `bigint`, `double`) are accepted.
    pub fn parse(name: &str) -> Option<ComparatorType> {
        match name.trim().to_ascii_lowercase().as_str() {
            "string" => Some(ComparatorType::String),
            "int32" | "int" => Some(ComparatorType::Int32),
            "int64" | "bigint" => Some(ComparatorType::Int64),
            "float64" | "double" => Some(ComparatorType::Float64),
            _ => None,
        }
    }
}

impl Display for ComparatorType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.name())
    }
}
