pub mod stats;
pub mod validate;
