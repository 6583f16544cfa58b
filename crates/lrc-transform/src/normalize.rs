//! Applies the field normalizers to whole records.

use lrc_model::{
    ColumnKind, FieldValue, NormalizedRecord, NormalizedTable, RawRecord, RawTable, column_kind,
};
use tracing::debug;

use crate::normalization::{normalize_date, normalize_numeric};

/// Convert one raw field according to its column kind.
pub fn normalize_field(kind: ColumnKind, raw: Option<&str>) -> Option<FieldValue> {
    match kind {
        ColumnKind::Text => raw.map(|value| FieldValue::Text(value.to_string())),
        ColumnKind::Numeric => normalize_numeric(raw).map(FieldValue::Number),
        ColumnKind::Date => normalize_date(raw).map(FieldValue::Date),
    }
}

/// Convert a raw record; `kinds` is aligned with the table headers.
pub fn normalize_record(record: &RawRecord, kinds: &[ColumnKind]) -> NormalizedRecord {
    let values = kinds
        .iter()
        .enumerate()
        .map(|(index, kind)| normalize_field(*kind, record.value(index)))
        .collect();
    NormalizedRecord {
        source_row: record.source_row,
        values,
    }
}

/// Convert every record of a raw table. The input is left untouched.
pub fn normalize_table(table: &RawTable) -> NormalizedTable {
    let kinds: Vec<ColumnKind> = table.headers.iter().map(|h| column_kind(h)).collect();
    let rows: Vec<NormalizedRecord> = table
        .rows
        .iter()
        .map(|record| normalize_record(record, &kinds))
        .collect();
    debug!(rows = rows.len(), columns = kinds.len(), "normalized table");
    NormalizedTable {
        headers: table.headers.clone(),
        rows,
    }
}
