pub mod error;
pub mod query;
pub mod row;
pub mod source;
