pub mod core;
pub mod records;
