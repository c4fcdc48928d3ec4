pub mod ast;
pub mod column_mapping;
pub mod decomposed;
pub mod error;
pub mod handler;
