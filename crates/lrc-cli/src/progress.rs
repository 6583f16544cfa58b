//! Observer that turns consolidation notices into log events.

use std::path::Path;

use lrc_transform::{ColumnProfile, ConflictCounts, ConsolidationObserver, DropReason, ProfileStage};
use tracing::{debug, info};

/// Logs every notice through `tracing`. Carries no row-level data.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ConsolidationObserver for TracingObserver {
    fn columns_observed(&self, stage: ProfileStage, profiles: &[ColumnProfile]) {
        info!(
            stage = stage.as_str(),
            columns = %column_types(profiles),
            "column types"
        );
        for profile in profiles {
            debug!(
                ?stage,
                column = %profile.name,
                kind = %profile.kind,
                present = profile.present,
                missing = profile.missing,
                "column profile"
            );
        }
    }

    fn rows_dropped(&self, reason: DropReason, count: usize) {
        debug!(count, reason = reason.as_str(), "rows excluded from consolidation");
    }

    fn conflicts_found(&self, conflicts: &ConflictCounts) {
        for (column, groups) in &conflicts.by_column {
            info!(%column, groups, "duplicate rows disagreed; first value kept");
        }
    }

    fn partition_written(&self, index: usize, count: usize, rows: usize, path: &Path) {
        info!(
            "saved chunk {index}/{count}: {} ({rows} rows)",
            path.display()
        );
    }

    fn completed(&self, total_rows: usize) {
        info!(total_rows, "processing complete");
    }
}

/// `name: kind` pairs in profile order.
fn column_types(profiles: &[ColumnProfile]) -> String {
    profiles
        .iter()
        .map(|profile| format!("{}: {}", profile.name, profile.kind))
        .collect::<Vec<_>>()
        .join(", ")
}
