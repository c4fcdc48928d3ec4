pub mod comparator_type;
pub mod typed_value;

/// The wire form of every stored value. No type information travels with it.
pub type RawValue = Vec<u8>;
