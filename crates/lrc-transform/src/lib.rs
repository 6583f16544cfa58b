//! Lab results normalization and consolidation.
//!
//! # Overview
//!
//! - **Field normalization**: measurement columns to `f64` (comma or period
//!   decimals), the collection date to a calendar date. Malformed fields
//!   become missing; nothing here returns an error.
//! - **Consolidation**: rows sharing a (patient, collection date) key are
//!   merged into one row, keeping the first non-missing value of each
//!   reconciled column in source row order.
//! - **Partitioning**: the sorted rows are split into contiguous chunks.
//!
//! # Example
//!
//! ```ignore
//! use lrc_transform::{NoopObserver, consolidate, normalize_table, plan_partitions};
//!
//! let normalized = normalize_table(&raw_table);
//! let result = consolidate(&normalized, &NoopObserver);
//! let plans = plan_partitions(result.records.len(), 50_000);
//! ```

pub mod consolidate;
pub mod normalization;
pub mod normalize;
pub mod observer;
pub mod partition;
pub mod profile;

pub use consolidate::{
    ConflictCounts, Consolidation, DropCounts, ReconciledGroup, consolidate, filter_records,
    group_records, reconcile_group, sort_records,
};
pub use normalization::{normalize_date, normalize_numeric, parse_collect_date, parse_numeric};
pub use normalize::{normalize_field, normalize_record, normalize_table};
pub use observer::{ConsolidationObserver, DropReason, NoopObserver, ProfileStage};
pub use partition::{PartitionPlan, partition_count, partition_records, plan_partitions};
pub use profile::{ColumnProfile, profile_consolidated, profile_normalized};
