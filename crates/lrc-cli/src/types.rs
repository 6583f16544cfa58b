//! Run results shared by the command, summary, and report writers.

use std::path::PathBuf;

use lrc_model::Manifest;
use lrc_transform::{ConflictCounts, DropCounts};
use serde::Serialize;

/// Machine-readable outcome of one consolidation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub input_rows: usize,
    pub dropped: DropCounts,
    pub conflicts: ConflictCounts,
    pub total_rows: usize,
    pub partitions: Vec<PartitionSummary>,
    /// Absent on dry runs.
    pub manifest: Option<Manifest>,
    pub manifest_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartitionSummary {
    pub index: usize,
    pub file_name: String,
    pub rows: usize,
}

/// Report plus the first rendered rows requested with `--preview`.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub report: RunReport,
    pub preview: Vec<Vec<String>>,
}
