// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod adapter;
pub mod item;
pub mod parser;

pub use adapter::{Record, from_record, to_record};
pub use item::Card;
pub use parser::{DATE_FORMAT, RawPoints, validate_date, validate_name, validate_points};
