//! CSV utilities for dialects and record tokenizing

mod dialect;
mod parser;

pub use dialect::Dialect;
pub use parser::{extract_record, CsvParser, Cursor, Records};
