//! Reads the input extract into a [`RawTable`], every field as text.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use lrc_model::{RawRecord, RawTable};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::options::IngestOptions;

use super::header::{missing_columns, normalize_header};

fn open_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Fails with [`IngestError::FileNotFound`] unless `path` is an existing file.
pub fn check_input_exists(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;
    if metadata.is_file() {
        Ok(())
    } else {
        Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Reads a delimited text file with a header row.
///
/// Cells equal to one of `options.na_values` become missing; all other cells
/// are kept verbatim. Rows shorter than the header are padded with missing
/// values.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed, has no header,
/// has a row longer than the header, or lacks a required column.
pub fn read_raw_table(path: &Path, options: &IngestOptions) -> Result<RawTable> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    read_raw_table_from_reader(file, path, options)
}

/// Same as [`read_raw_table`] over any byte source. `source` is only used in
/// error messages.
pub fn read_raw_table_from_reader<R: Read>(
    input: R,
    source: &Path,
    options: &IngestOptions,
) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(input);
    let csv_error = |error: csv::Error| IngestError::CsvParse {
        path: source.to_path_buf(),
        source: error,
    };

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: source.to_path_buf(),
        });
    }
    if let Some(column) = missing_columns(&headers, &options.required_columns).first() {
        return Err(IngestError::MissingColumn {
            column: (*column).to_string(),
            path: source.to_path_buf(),
        });
    }

    let mut table = RawTable::new(headers);
    let width = table.headers.len();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        if record.len() > width {
            return Err(IngestError::RaggedRow {
                path: source.to_path_buf(),
                line: record.position().map_or(row as u64 + 2, csv::Position::line),
                expected: width,
                found: record.len(),
            });
        }
        let mut values: Vec<Option<String>> =
            record.iter().map(|cell| options.cell_value(cell)).collect();
        values.resize(width, None);
        table.rows.push(RawRecord::new(row, values));
    }

    debug!(
        path = %source.display(),
        rows = table.rows.len(),
        columns = width,
        "read input table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn loose_options() -> IngestOptions {
        IngestOptions::default().with_required_columns(Vec::<String>::new())
    }

    #[test]
    fn test_reads_all_fields_as_text() {
        let file = create_temp_csv("A,B,C\n1,x,\n002,NA,7,5\n");
        let err = read_raw_table(file.path(), &loose_options()).unwrap_err();
        assert!(matches!(err, IngestError::RaggedRow { found: 4, .. }));

        let file = create_temp_csv("A,B,C\n1,x,\n002,NA,\"7,5\"\n");
        let table = read_raw_table(file.path(), &loose_options()).unwrap();
        assert_eq!(table.headers, vec!["A", "B", "C"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].values, vec![Some("1".into()), Some("x".into()), None]);
        assert_eq!(
            table.rows[1].values,
            vec![Some("002".into()), None, Some("7,5".into())]
        );
        assert_eq!(table.rows[1].source_row, 1);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let file = create_temp_csv("A,B,C\n1\n");
        let table = read_raw_table(file.path(), &loose_options()).unwrap();
        assert_eq!(table.rows[0].values, vec![Some("1".into()), None, None]);
    }

    #[test]
    fn test_header_with_bom_and_spaces() {
        let file = create_temp_csv("\u{feff}A , B\nx,y\n");
        let table = read_raw_table(file.path(), &loose_options()).unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let file = create_temp_csv("A;B\n7,5;x\n");
        let options = loose_options().with_delimiter(b';');
        let table = read_raw_table(file.path(), &options).unwrap();
        assert_eq!(table.rows[0].value(0), Some("7,5"));
    }

    #[test]
    fn test_empty_file() {
        let file = create_temp_csv("");
        let result = read_raw_table(file.path(), &loose_options());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_missing_required_column() {
        let file = create_temp_csv("Patient,LDL\nP1,100\n");
        let result = read_raw_table(file.path(), &IngestOptions::default());
        match result {
            Err(IngestError::MissingColumn { column, .. }) => assert_eq!(column, "CollectDate"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        assert!(matches!(
            read_raw_table(&path, &loose_options()),
            Err(IngestError::FileNotFound { .. })
        ));
        assert!(matches!(
            check_input_exists(&path),
            Err(IngestError::FileNotFound { .. })
        ));
        assert!(matches!(
            check_input_exists(dir.path()),
            Err(IngestError::FileNotFound { .. })
        ));
    }
}
