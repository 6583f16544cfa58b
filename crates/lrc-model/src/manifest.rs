//! Summary of a completed partitioned write.

use serde::{Deserialize, Serialize};

/// Row total and ordered partition file names of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub total_rows: usize,
    pub partition_count: usize,
    /// Partition file names (no directory), in write order.
    pub files: Vec<String>,
}

impl Manifest {
    pub fn new(total_rows: usize, files: Vec<String>) -> Self {
        Self {
            total_rows,
            partition_count: files.len(),
            files,
        }
    }

    /// Text form written next to the partitions.
    pub fn render(&self) -> String {
        let mut text = format!(
            "Total rows: {}\nNumber of chunks: {}\nChunk files:\n",
            self.total_rows, self.partition_count
        );
        for file in &self.files {
            text.push_str("- ");
            text.push_str(file);
            text.push('\n');
        }
        text
    }
}
