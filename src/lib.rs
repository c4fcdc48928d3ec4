pub mod compare;
pub mod config;
pub mod filter;
pub mod macros;
pub mod predicate;
pub mod storage;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod types;
