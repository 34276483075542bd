pub mod file;
pub mod object_store;
pub mod sql;
