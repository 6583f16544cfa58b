//! Error types for writing consolidated output.

use std::path::PathBuf;

use lrc_model::OptionsError;
use thiserror::Error;

/// Errors that can occur while writing partitions or the manifest.
///
/// Partitions already written when an error occurs are left in place; the
/// manifest is only written once every partition succeeded.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("invalid output options: {0}")]
    Options(#[from] OptionsError),

    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write partition {path}: {source}")]
    WritePartition {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write manifest {path}: {source}")]
    WriteManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;
