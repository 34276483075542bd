pub mod adapter;
pub mod data_type;
pub mod params;
