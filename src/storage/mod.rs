pub mod cell;
pub mod envelope;
pub mod error;
pub mod range;
pub mod row;
pub mod table_scan;
pub mod table_store;
