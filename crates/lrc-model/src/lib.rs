//! Data model for lab results consolidation.
//!
//! Shared by the ingest, transform, output, and CLI crates: column
//! definitions, record types at each pipeline stage, the output manifest, and
//! run options.

pub mod columns;
pub mod error;
pub mod manifest;
pub mod options;
pub mod record;
pub mod value;

pub use columns::{
    COLLECT_DATE, ColumnKind, NUMERIC_COLUMNS, PATIENT, RECONCILED_COLUMNS, column_kind,
    output_columns, required_columns,
};
pub use error::{OptionsError, Result};
pub use manifest::Manifest;
pub use options::{
    ConsolidateOptions, DEFAULT_CHUNK_SIZE, DEFAULT_FILE_EXTENSION, DEFAULT_FILE_PREFIX,
    DEFAULT_MANIFEST_NAME,
};
pub use record::{
    ConsolidatedRecord, GroupKey, NormalizedRecord, NormalizedTable, RawRecord, RawTable,
};
pub use value::{DATE_FORMAT, FieldValue, format_date, format_numeric};
