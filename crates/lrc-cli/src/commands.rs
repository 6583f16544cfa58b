use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use lrc_cli::pipeline::{PipelineConfig, build_report, run_pipeline};
use lrc_cli::progress::TracingObserver;
use lrc_cli::types::{RunReport, RunResult};
use lrc_model::{ConsolidateOptions, column_kind, required_columns};
use lrc_output::record_cells;

use crate::cli::ConsolidateArgs;
use crate::summary::apply_table_style;

pub fn run_columns() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Kind"]);
    apply_table_style(&mut table);
    for column in required_columns() {
        table.add_row(vec![column, column_kind(column).as_str()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_consolidate(args: &ConsolidateArgs) -> Result<RunResult> {
    let span = info_span!("consolidate_run", input = %args.input.display());
    let _guard = span.enter();

    let options = ConsolidateOptions::new()
        .with_chunk_size(args.chunk_size)
        .with_file_prefix(args.prefix.clone())
        .with_file_extension(args.extension.clone())
        .with_manifest_name(args.manifest_name.clone())
        .with_delimiter(args.delimiter);
    let config = PipelineConfig::new(&args.input, &args.output_dir)
        .with_options(options)
        .with_dry_run(args.dry_run);

    let outcome = run_pipeline(&config, &TracingObserver)?;
    let report = build_report(&config, &outcome);

    if let Some(path) = &args.report_json {
        write_report(path, &report)?;
        info!(path = %path.display(), "wrote run report");
    }

    let preview = match args.preview {
        Some(limit) => outcome
            .consolidation
            .records
            .iter()
            .take(limit)
            .map(record_cells)
            .collect(),
        None => Vec::new(),
    };

    Ok(RunResult { report, preview })
}

fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize run report")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}
