//! Progress notifications emitted while consolidating.
//!
//! Observers are purely informational; nothing they do can change the
//! outcome of a run.

use std::path::Path;

use serde::Serialize;

use crate::consolidate::ConflictCounts;
use crate::profile::ColumnProfile;

/// Point in the pipeline at which column profiles were taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStage {
    Normalized,
    Consolidated,
}

impl ProfileStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileStage::Normalized => "before consolidation",
            ProfileStage::Consolidated => "after consolidation",
        }
    }
}

/// Why input rows were excluded from grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// The collection date was missing or not a valid `DD/MM/YYYY` date.
    InvalidCollectDate,
    /// The patient identifier was missing.
    MissingPatient,
}

impl DropReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DropReason::InvalidCollectDate => "invalid collection date",
            DropReason::MissingPatient => "missing patient identifier",
        }
    }
}

/// Receives pipeline notices. Every method defaults to doing nothing.
pub trait ConsolidationObserver {
    fn columns_observed(&self, _stage: ProfileStage, _profiles: &[ColumnProfile]) {}

    /// Only called with a non-zero `count`.
    fn rows_dropped(&self, _reason: DropReason, _count: usize) {}

    /// Only called when at least one group had conflicting values.
    fn conflicts_found(&self, _conflicts: &ConflictCounts) {}

    /// Partition `index` (1-based) of `count` was written with `rows` rows.
    fn partition_written(&self, _index: usize, _count: usize, _rows: usize, _path: &Path) {}

    fn completed(&self, _total_rows: usize) {}
}

/// Observer that ignores every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ConsolidationObserver for NoopObserver {}
