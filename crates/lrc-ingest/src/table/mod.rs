//! Delimited text reading into raw tables.

mod header;
mod reader;

pub use header::{missing_columns, normalize_header};
pub use reader::{check_input_exists, read_raw_table, read_raw_table_from_reader};
