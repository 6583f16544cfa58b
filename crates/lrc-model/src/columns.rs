//! Column names of the lab-results extract and their value kinds.

use serde::{Deserialize, Serialize};

/// Patient identifier column.
pub const PATIENT: &str = "Patient";

/// Sample collection date column (`DD/MM/YYYY`).
pub const COLLECT_DATE: &str = "CollectDate";

/// Columns holding lab measurements, coerced to floating point.
pub const NUMERIC_COLUMNS: [&str; 5] = ["HbA1c", "uAlb", "Creatinina", "LDL", "Creatinuria"];

/// Columns merged across duplicate (patient, date) rows, in output order.
pub const RECONCILED_COLUMNS: [&str; 10] = [
    "Contrato",
    "Sucursal",
    "IPS_Primaria",
    "HbA1c",
    "uAlb",
    "Creatinina",
    "LDL",
    "Creatinuria",
    "Electrocardiograma",
    "FechaResultado",
];

/// How a column's raw text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Kept verbatim.
    Text,
    /// Parsed to `f64`, comma accepted as decimal separator.
    Numeric,
    /// Parsed as a `DD/MM/YYYY` calendar date.
    Date,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Numeric => "numeric",
            ColumnKind::Date => "date",
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the kind a column is normalized to.
pub fn column_kind(name: &str) -> ColumnKind {
    if name == COLLECT_DATE {
        ColumnKind::Date
    } else if NUMERIC_COLUMNS.contains(&name) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    }
}

/// Header of every output file: the reconciled columns, then the key.
pub fn output_columns() -> Vec<&'static str> {
    let mut columns = Vec::with_capacity(RECONCILED_COLUMNS.len() + 2);
    columns.extend(RECONCILED_COLUMNS);
    columns.push(PATIENT);
    columns.push(COLLECT_DATE);
    columns
}

/// Columns the input must carry.
pub fn required_columns() -> Vec<&'static str> {
    let mut columns = Vec::with_capacity(RECONCILED_COLUMNS.len() + 2);
    columns.push(PATIENT);
    columns.push(COLLECT_DATE);
    columns.extend(RECONCILED_COLUMNS);
    columns
}
