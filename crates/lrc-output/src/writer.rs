//! Writes sorted consolidated records as numbered partition files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use lrc_model::{ConsolidateOptions, ConsolidatedRecord, Manifest, format_date, output_columns};
use lrc_transform::{ConsolidationObserver, partition_records};
use tracing::{debug, info};

use crate::error::{OutputError, Result};

/// A partition file that was written successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPartition {
    /// 1-based partition number.
    pub index: usize,
    pub file_name: String,
    pub path: PathBuf,
    pub rows: usize,
}

/// Everything [`emit`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitResult {
    pub partitions: Vec<WrittenPartition>,
    pub manifest: Manifest,
    pub manifest_path: PathBuf,
}

/// Create the output directory (and parents) if needed.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Output cells of one record in [`output_columns`] order: the reconciled
/// columns, then patient and `DD/MM/YYYY` date. Missing values are empty
/// cells.
pub fn record_cells(record: &ConsolidatedRecord) -> Vec<String> {
    let mut cells: Vec<String> = Vec::with_capacity(record.values.len() + 2);
    cells.extend(
        record
            .values
            .iter()
            .map(|value| value.as_ref().map(ToString::to_string).unwrap_or_default()),
    );
    cells.push(record.key.patient.clone());
    cells.push(format_date(record.key.collect_date));
    cells
}

/// Write a header row and `records` as delimited text.
pub fn write_records<W: Write>(
    output: W,
    records: &[ConsolidatedRecord],
    delimiter: u8,
) -> csv::Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(output);
    writer.write_record(output_columns())?;
    for record in records {
        writer.write_record(record_cells(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one partition file, replacing any existing file at `path`.
pub fn write_partition(path: &Path, records: &[ConsolidatedRecord], delimiter: u8) -> Result<()> {
    let to_error = |source: csv::Error| OutputError::WritePartition {
        path: path.to_path_buf(),
        source,
    };
    let file = fs::File::create(path).map_err(|e| to_error(csv::Error::from(e)))?;
    write_records(file, records, delimiter).map_err(to_error)
}

/// Write the manifest text file.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    fs::write(path, manifest.render()).map_err(|source| OutputError::WriteManifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Write every partition of `records` into `dir`, then the manifest.
///
/// `records` must already be sorted. Partitions are written in index order
/// and reported to `observer` as they complete. The manifest is written
/// last, so its presence marks a complete run.
///
/// # Errors
///
/// Returns an error for invalid options or on the first failed write.
pub fn emit(
    dir: &Path,
    records: &[ConsolidatedRecord],
    options: &ConsolidateOptions,
    observer: &dyn ConsolidationObserver,
) -> Result<EmitResult> {
    options.validate()?;
    ensure_output_dir(dir)?;

    let parts = partition_records(records, options.chunk_size);
    let count = parts.len();
    let mut partitions = Vec::with_capacity(count);
    for (plan, slice) in parts {
        let file_name = options.partition_file_name(plan.index);
        let path = dir.join(&file_name);
        write_partition(&path, slice, options.delimiter)?;
        debug!(
            index = plan.index,
            count,
            rows = slice.len(),
            path = %path.display(),
            "wrote partition"
        );
        observer.partition_written(plan.index, count, slice.len(), &path);
        partitions.push(WrittenPartition {
            index: plan.index,
            file_name,
            path,
            rows: slice.len(),
        });
    }

    let manifest = Manifest::new(
        records.len(),
        partitions.iter().map(|p| p.file_name.clone()).collect(),
    );
    let manifest_path = dir.join(&options.manifest_name);
    write_manifest(&manifest_path, &manifest)?;
    info!(
        total_rows = manifest.total_rows,
        partitions = manifest.partition_count,
        manifest = %manifest_path.display(),
        "wrote consolidated output"
    );
    observer.completed(manifest.total_rows);

    Ok(EmitResult {
        partitions,
        manifest,
        manifest_path,
    })
}
