//! Consolidation pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: read the input extract, every field as text
//! 2. **Normalize**: coerce measurement and date columns
//! 3. **Consolidate**: drop undated rows, group by (patient, date),
//!    reconcile, sort
//! 4. **Output**: write size-bounded partitions, then the manifest
//!
//! Each stage takes the output of the previous stage and returns a new value;
//! nothing is revisited.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace};

use lrc_ingest::{IngestOptions, check_input_exists, read_raw_table};
use lrc_model::{ConsolidateOptions, NormalizedTable, RawTable, format_date};
use lrc_output::{EmitResult, emit};
use lrc_transform::{
    Consolidation, ConsolidationObserver, PartitionPlan, consolidate, normalize_table,
    plan_partitions,
};

use crate::logging::redact_value;
use crate::types::{PartitionSummary, RunReport};

/// Inputs of a full run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub ingest: IngestOptions,
    pub options: ConsolidateOptions,
    /// Consolidate and report without writing any file.
    pub dry_run: bool,
}

impl PipelineConfig {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            ingest: IngestOptions::default(),
            options: ConsolidateOptions::default(),
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ConsolidateOptions) -> Self {
        self.ingest.delimiter = options.delimiter;
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Everything a run produced.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub consolidation: Consolidation,
    /// Partitions the records map to (also computed on dry runs).
    pub plans: Vec<PartitionPlan>,
    /// `None` on dry runs.
    pub emitted: Option<EmitResult>,
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Check that the input exists and read it.
pub fn ingest(input: &Path, options: &IngestOptions) -> Result<RawTable> {
    check_input_exists(input)?;
    let table =
        read_raw_table(input, options).with_context(|| format!("read {}", input.display()))?;
    info!(rows = table.len(), columns = table.headers.len(), "ingested input");
    Ok(table)
}

// ============================================================================
// Stage 2: Normalize
// ============================================================================

pub fn normalize(table: &RawTable) -> NormalizedTable {
    normalize_table(table)
}

// ============================================================================
// Stage 3: Consolidate
// ============================================================================

pub fn consolidate_records(
    table: &NormalizedTable,
    observer: &dyn ConsolidationObserver,
) -> Consolidation {
    let consolidation = consolidate(table, observer);
    for record in &consolidation.records {
        trace!(
            patient = %redact_value(&record.key.patient),
            collect_date = %format_date(record.key.collect_date),
            "consolidated record"
        );
    }
    info!(
        input_rows = consolidation.input_rows,
        dropped = consolidation.dropped.total(),
        consolidated_rows = consolidation.records.len(),
        "consolidated records"
    );
    consolidation
}

// ============================================================================
// Stage 4: Output
// ============================================================================

pub fn output(
    output_dir: &Path,
    consolidation: &Consolidation,
    options: &ConsolidateOptions,
    observer: &dyn ConsolidationObserver,
) -> Result<EmitResult> {
    emit(output_dir, &consolidation.records, options, observer)
        .with_context(|| format!("write output to {}", output_dir.display()))
}

/// Run every stage. Options are validated before the input is touched.
///
/// # Errors
///
/// Returns an error for invalid options, an unreadable input, or a failed
/// write. Partition files written before a failed write are left behind
/// without a manifest.
pub fn run_pipeline(
    config: &PipelineConfig,
    observer: &dyn ConsolidationObserver,
) -> Result<PipelineOutcome> {
    config.options.validate().context("invalid options")?;

    let table = info_span!("ingest", input = %config.input.display()).in_scope(|| {
        let start = Instant::now();
        let table = ingest(&config.input, &config.ingest);
        info!(elapsed_ms = start.elapsed().as_millis(), "ingest complete");
        table
    })?;

    let normalized = info_span!("normalize").in_scope(|| {
        let start = Instant::now();
        let normalized = normalize(&table);
        info!(elapsed_ms = start.elapsed().as_millis(), "normalize complete");
        normalized
    });
    drop(table);

    let consolidation = info_span!("consolidate").in_scope(|| {
        let start = Instant::now();
        let consolidation = consolidate_records(&normalized, observer);
        info!(elapsed_ms = start.elapsed().as_millis(), "consolidate complete");
        consolidation
    });
    drop(normalized);

    let plans = plan_partitions(consolidation.records.len(), config.options.chunk_size);
    let emitted = if config.dry_run {
        info!(partitions = plans.len(), "dry run: no files written");
        None
    } else {
        let span = info_span!("emit", output_dir = %config.output_dir.display());
        let emitted = span.in_scope(|| {
            let start = Instant::now();
            let emitted = output(&config.output_dir, &consolidation, &config.options, observer);
            info!(elapsed_ms = start.elapsed().as_millis(), "output complete");
            emitted
        })?;
        Some(emitted)
    };

    Ok(PipelineOutcome {
        consolidation,
        plans,
        emitted,
    })
}

/// Build the serializable report of a finished run.
pub fn build_report(config: &PipelineConfig, outcome: &PipelineOutcome) -> RunReport {
    let partitions = match &outcome.emitted {
        Some(emitted) => emitted
            .partitions
            .iter()
            .map(|partition| PartitionSummary {
                index: partition.index,
                file_name: partition.file_name.clone(),
                rows: partition.rows,
            })
            .collect(),
        None => outcome
            .plans
            .iter()
            .map(|plan| PartitionSummary {
                index: plan.index,
                file_name: config.options.partition_file_name(plan.index),
                rows: plan.len(),
            })
            .collect(),
    };
    RunReport {
        input: config.input.clone(),
        output_dir: config.output_dir.clone(),
        dry_run: config.dry_run,
        input_rows: outcome.consolidation.input_rows,
        dropped: outcome.consolidation.dropped,
        conflicts: outcome.consolidation.conflicts.clone(),
        total_rows: outcome.consolidation.records.len(),
        partitions,
        manifest: outcome.emitted.as_ref().map(|e| e.manifest.clone()),
        manifest_path: outcome.emitted.as_ref().map(|e| e.manifest_path.clone()),
    }
}
