//! Lab results ingestion.
//!
//! Reads the flat lab-results extract into a [`lrc_model::RawTable`]. Every
//! field is kept as text; typed interpretation happens later in
//! `lrc-transform`.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use lrc_ingest::{IngestOptions, read_raw_table};
//!
//! let table = read_raw_table(Path::new("input.csv"), &IngestOptions::default())?;
//! println!("{} rows", table.len());
//! ```

mod error;
mod options;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Table Reading ===
pub use table::{
    check_input_exists, missing_columns, normalize_header, read_raw_table,
    read_raw_table_from_reader,
};

// === Options ===
pub use options::{DEFAULT_NA_VALUES, IngestOptions};
