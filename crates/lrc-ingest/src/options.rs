//! Input reading options.

use std::collections::BTreeSet;

use lrc_model::required_columns;

/// Cell values read as missing rather than text.
pub const DEFAULT_NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// How the input extract is read.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Exact cell values treated as missing.
    pub na_values: BTreeSet<String>,
    /// Columns that must appear in the header row.
    pub required_columns: Vec<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            na_values: DEFAULT_NA_VALUES.iter().map(|v| (*v).to_string()).collect(),
            required_columns: required_columns()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_na_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.na_values = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_required_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Converts a cell to its raw value, `None` for missing-value tokens.
    pub fn cell_value(&self, cell: &str) -> Option<String> {
        if self.na_values.contains(cell) {
            None
        } else {
            Some(cell.to_string())
        }
    }
}
