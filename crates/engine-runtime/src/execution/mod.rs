pub mod artifact;
pub mod executor;
