//! Per-column value counts, reported before and after consolidation.

use lrc_model::{
    COLLECT_DATE, ColumnKind, ConsolidatedRecord, NormalizedTable, PATIENT, RECONCILED_COLUMNS,
    column_kind,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub present: usize,
    pub missing: usize,
}

/// Profiles every column of a normalized table, in header order.
pub fn profile_normalized(table: &NormalizedTable) -> Vec<ColumnProfile> {
    table
        .headers
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let present = table
                .rows
                .iter()
                .filter(|row| row.value(index).is_some())
                .count();
            ColumnProfile {
                name: name.clone(),
                kind: column_kind(name),
                present,
                missing: table.rows.len() - present,
            }
        })
        .collect()
}

/// Profiles the output columns of consolidated records.
pub fn profile_consolidated(records: &[ConsolidatedRecord]) -> Vec<ColumnProfile> {
    let total = records.len();
    let mut profiles = vec![
        ColumnProfile {
            name: PATIENT.to_string(),
            kind: ColumnKind::Text,
            present: total,
            missing: 0,
        },
        ColumnProfile {
            name: COLLECT_DATE.to_string(),
            kind: ColumnKind::Date,
            present: total,
            missing: 0,
        },
    ];
    for (index, name) in RECONCILED_COLUMNS.iter().enumerate() {
        let present = records
            .iter()
            .filter(|record| record.values.get(index).is_some_and(Option::is_some))
            .count();
        profiles.push(ColumnProfile {
            name: (*name).to_string(),
            kind: column_kind(name),
            present,
            missing: total - present,
        });
    }
    profiles
}
