//! CLI argument definitions for the lab results consolidator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use lrc_model::{
    DEFAULT_CHUNK_SIZE, DEFAULT_FILE_EXTENSION, DEFAULT_FILE_PREFIX, DEFAULT_MANIFEST_NAME,
};

#[derive(Parser)]
#[command(
    name = "lab-consolidate",
    version,
    about = "Consolidate lab results into one row per patient and collection date",
    long_about = "Consolidate a lab results extract into one row per patient and collection date.\n\n\
                  Duplicate rows are merged by keeping the first non-missing value of each column.\n\
                  The result is sorted and split into numbered CSV files plus a manifest."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include patient identifiers in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Consolidate an extract and write the partitioned output.
    Consolidate(ConsolidateArgs),

    /// List the columns the input must provide.
    Columns,
}

#[derive(Parser)]
pub struct ConsolidateArgs {
    /// Lab results extract to read.
    #[arg(value_name = "INPUT", default_value = "input.csv")]
    pub input: PathBuf,

    /// Directory receiving the partition files and manifest.
    #[arg(long = "output-dir", value_name = "DIR", default_value = DEFAULT_FILE_PREFIX)]
    pub output_dir: PathBuf,

    /// Maximum number of rows per partition file.
    #[arg(long = "chunk-size", value_name = "ROWS", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Partition file name prefix.
    #[arg(long = "prefix", default_value = DEFAULT_FILE_PREFIX)]
    pub prefix: String,

    /// Partition file extension.
    #[arg(long = "extension", default_value = DEFAULT_FILE_EXTENSION)]
    pub extension: String,

    /// Manifest file name.
    #[arg(long = "manifest-name", default_value = DEFAULT_MANIFEST_NAME)]
    pub manifest_name: String,

    /// Field delimiter of the input and output files (single byte, `\t` for tab).
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Consolidate and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the first N consolidated rows.
    #[arg(long = "preview", value_name = "N")]
    pub preview: Option<usize>,

    /// Write a JSON run report to this path.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(format!("delimiter must be a single ASCII character, got {value:?}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn consolidate_defaults() {
        let cli = Cli::try_parse_from(["lab-consolidate", "consolidate"]).unwrap();
        let Command::Consolidate(args) = cli.command else {
            panic!("expected consolidate");
        };
        assert_eq!(args.input, PathBuf::from("input.csv"));
        assert_eq!(args.output_dir, PathBuf::from("Consolidated_Results"));
        assert_eq!(args.chunk_size, 50_000);
        assert_eq!(args.delimiter, b',');
        assert!(!args.dry_run);
    }

    #[test]
    fn delimiter_parsing() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("").is_err());
    }
}
