pub mod comparator;
pub mod error;
pub(crate) mod like_pattern;
pub mod operator;
