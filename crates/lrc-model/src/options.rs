//! Configuration for consolidation and output partitioning.

use serde::{Deserialize, Serialize};

use crate::error::{OptionsError, Result};

/// Default maximum number of rows per partition file.
pub const DEFAULT_CHUNK_SIZE: usize = 50_000;

/// Default partition file name prefix.
pub const DEFAULT_FILE_PREFIX: &str = "Consolidated_Results";

/// Default partition file extension.
pub const DEFAULT_FILE_EXTENSION: &str = "csv";

/// Default manifest file name.
pub const DEFAULT_MANIFEST_NAME: &str = "chunk_summary.txt";

/// Options controlling how consolidated rows are partitioned and written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidateOptions {
    /// Maximum number of rows per partition file.
    pub chunk_size: usize,
    /// Partition files are named `{file_prefix}_part_{n}.{file_extension}`.
    pub file_prefix: String,
    pub file_extension: String,
    pub manifest_name: String,
    /// Field delimiter of the partition files.
    pub delimiter: u8,
}

impl Default for ConsolidateOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            delimiter: b',',
        }
    }
}

impl ConsolidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    #[must_use]
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    #[must_use]
    pub fn with_manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_name = name.into();
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// File name of the 1-based partition `index`.
    pub fn partition_file_name(&self, index: usize) -> String {
        format!(
            "{}_part_{}.{}",
            self.file_prefix,
            index,
            self.file_extension.trim_start_matches('.')
        )
    }

    /// Check the options before any input is read.
    ///
    /// # Errors
    ///
    /// Returns the first rejected field.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(OptionsError::ZeroChunkSize);
        }
        if self.file_prefix.trim().is_empty() {
            return Err(OptionsError::EmptyPrefix);
        }
        if self.file_extension.trim_start_matches('.').trim().is_empty() {
            return Err(OptionsError::EmptyExtension);
        }
        if self.manifest_name.trim().is_empty() {
            return Err(OptionsError::EmptyManifestName);
        }
        Ok(())
    }
}
