use thiserror::Error;

/// Rejected [`ConsolidateOptions`](crate::ConsolidateOptions) values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("chunk size must be at least 1")]
    ZeroChunkSize,
    #[error("output file prefix must not be empty")]
    EmptyPrefix,
    #[error("output file extension must not be empty")]
    EmptyExtension,
    #[error("manifest file name must not be empty")]
    EmptyManifestName,
}

pub type Result<T> = std::result::Result<T, OptionsError>;
