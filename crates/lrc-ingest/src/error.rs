//! Error types for lab results ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading the input extract.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file does not exist.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the input file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Malformed delimited text.
    #[error("failed to parse {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Input has no header row.
    #[error("input file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// A data row has more fields than the header.
    #[error("line {line} of {path} has {found} fields, header has {expected}")]
    RaggedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    // === Schema Errors ===
    /// Required column not found in the header.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/input.csv"),
        };
        assert_eq!(err.to_string(), "input file not found: /data/input.csv");

        let err = IngestError::MissingColumn {
            column: "CollectDate".to_string(),
            path: PathBuf::from("input.csv"),
        };
        assert_eq!(
            err.to_string(),
            "required column 'CollectDate' not found in input.csv"
        );
    }
}
