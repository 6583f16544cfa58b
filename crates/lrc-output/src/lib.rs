//! Consolidated output writing.
//!
//! Sorted consolidated records are split into partitions of at most
//! `chunk_size` rows, each written as `{prefix}_part_{n}.{extension}`, and a
//! manifest listing the partitions is written once all of them succeeded.

mod error;
mod writer;

pub use error::{OutputError, Result};
pub use writer::{
    EmitResult, WrittenPartition, emit, ensure_output_dir, record_cells, write_manifest,
    write_partition, write_records,
};
