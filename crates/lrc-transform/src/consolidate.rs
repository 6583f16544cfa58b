//! Collapses duplicate (patient, collection date) rows into one row each.
//!
//! The stages run strictly in order: filter, group, reconcile, sort.
//!
//! Reconciliation keeps the first non-missing value of each column, where
//! "first" is defined by the members' source row order. Group members are
//! always sorted by source row before selection, so the outcome never depends
//! on map iteration order.

use std::collections::BTreeMap;

use lrc_model::{
    COLLECT_DATE, ConsolidatedRecord, FieldValue, GroupKey, NormalizedRecord, NormalizedTable,
    PATIENT, RECONCILED_COLUMNS,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::observer::{ConsolidationObserver, DropReason, ProfileStage};
use crate::profile::{profile_consolidated, profile_normalized};

/// Rows excluded before grouping, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DropCounts {
    pub invalid_collect_date: usize,
    pub missing_patient: usize,
}

impl DropCounts {
    pub fn total(&self) -> usize {
        self.invalid_collect_date + self.missing_patient
    }
}

/// Groups whose members disagreed on a reconciled column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictCounts {
    /// Groups with at least one conflicting column.
    pub groups: usize,
    /// Conflicting groups per column name.
    pub by_column: BTreeMap<String, usize>,
}

impl ConflictCounts {
    pub fn is_empty(&self) -> bool {
        self.groups == 0
    }
}

/// Result of [`consolidate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Consolidation {
    /// One record per key, sorted by (patient, collection date).
    pub records: Vec<ConsolidatedRecord>,
    pub input_rows: usize,
    pub dropped: DropCounts,
    pub conflicts: ConflictCounts,
}

/// Consolidated row plus the reconciled column positions whose group members
/// held more than one distinct value.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledGroup {
    pub record: ConsolidatedRecord,
    pub conflicting_columns: Vec<usize>,
}

/// Column positions resolved once per table. Absent columns read as missing.
#[derive(Debug, Clone)]
struct ColumnPositions {
    patient: Option<usize>,
    collect_date: Option<usize>,
    reconciled: Vec<Option<usize>>,
}

impl ColumnPositions {
    fn resolve(table: &NormalizedTable) -> Self {
        Self {
            patient: table.column_index(PATIENT),
            collect_date: table.column_index(COLLECT_DATE),
            reconciled: RECONCILED_COLUMNS
                .iter()
                .map(|name| table.column_index(name))
                .collect(),
        }
    }
}

fn key_of(record: &NormalizedRecord, positions: &ColumnPositions) -> Result<GroupKey, DropReason> {
    let collect_date = positions
        .collect_date
        .and_then(|index| record.value(index))
        .and_then(FieldValue::as_date)
        .ok_or(DropReason::InvalidCollectDate)?;
    let patient = positions
        .patient
        .and_then(|index| record.value(index))
        .map(ToString::to_string)
        .ok_or(DropReason::MissingPatient)?;
    Ok(GroupKey::new(patient, collect_date))
}

/// Pairs each usable record with its key; records without a valid collection
/// date or without a patient identifier are counted and left out.
pub fn filter_records(table: &NormalizedTable) -> (Vec<(GroupKey, &NormalizedRecord)>, DropCounts) {
    let positions = ColumnPositions::resolve(table);
    let mut keyed = Vec::with_capacity(table.rows.len());
    let mut dropped = DropCounts::default();
    for record in &table.rows {
        match key_of(record, &positions) {
            Ok(key) => keyed.push((key, record)),
            Err(DropReason::InvalidCollectDate) => dropped.invalid_collect_date += 1,
            Err(DropReason::MissingPatient) => dropped.missing_patient += 1,
        }
    }
    (keyed, dropped)
}

/// Groups keyed records; members of each group end up in source row order.
pub fn group_records<'a>(
    keyed: Vec<(GroupKey, &'a NormalizedRecord)>,
) -> BTreeMap<GroupKey, Vec<&'a NormalizedRecord>> {
    let mut groups: BTreeMap<GroupKey, Vec<&NormalizedRecord>> = BTreeMap::new();
    for (key, record) in keyed {
        groups.entry(key).or_default().push(record);
    }
    for members in groups.values_mut() {
        members.sort_by_key(|record| record.source_row);
    }
    groups
}

/// Builds the consolidated row of one group.
///
/// `columns` holds, for each entry of [`RECONCILED_COLUMNS`], the position of
/// that column in the members' values (or `None` when the input lacks it).
/// Members are expected in source row order.
pub fn reconcile_group(
    key: GroupKey,
    members: &[&NormalizedRecord],
    columns: &[Option<usize>],
) -> ReconciledGroup {
    let mut values = Vec::with_capacity(columns.len());
    let mut conflicting_columns = Vec::new();
    for (position, column) in columns.iter().enumerate() {
        let mut distinct: Vec<&FieldValue> = Vec::new();
        if let Some(index) = column {
            for member in members {
                if let Some(value) = member.value(*index)
                    && !distinct.contains(&value)
                {
                    distinct.push(value);
                }
            }
        }
        if distinct.len() > 1 {
            conflicting_columns.push(position);
        }
        values.push(distinct.first().map(|value| (*value).clone()));
    }
    ReconciledGroup {
        record: ConsolidatedRecord { key, values },
        conflicting_columns,
    }
}

/// Orders records by (patient identifier, collection date) ascending.
pub fn sort_records(records: &mut [ConsolidatedRecord]) {
    records.sort_by(|a, b| a.key.cmp(&b.key));
}

/// Runs filter, group, reconcile, and sort over a normalized table.
pub fn consolidate(table: &NormalizedTable, observer: &dyn ConsolidationObserver) -> Consolidation {
    observer.columns_observed(ProfileStage::Normalized, &profile_normalized(table));

    let positions = ColumnPositions::resolve(table);
    let (keyed, dropped) = filter_records(table);
    for (reason, count) in [
        (DropReason::InvalidCollectDate, dropped.invalid_collect_date),
        (DropReason::MissingPatient, dropped.missing_patient),
    ] {
        if count > 0 {
            warn!(count, reason = reason.as_str(), "dropped rows before grouping");
            observer.rows_dropped(reason, count);
        }
    }

    let groups = group_records(keyed);
    debug!(groups = groups.len(), "grouped records");

    let mut conflicts = ConflictCounts::default();
    let mut records = Vec::with_capacity(groups.len());
    for (key, members) in groups {
        let reconciled = reconcile_group(key, &members, &positions.reconciled);
        if !reconciled.conflicting_columns.is_empty() {
            conflicts.groups += 1;
            for position in &reconciled.conflicting_columns {
                *conflicts
                    .by_column
                    .entry(RECONCILED_COLUMNS[*position].to_string())
                    .or_insert(0) += 1;
            }
        }
        records.push(reconciled.record);
    }
    if !conflicts.is_empty() {
        warn!(
            groups = conflicts.groups,
            "groups had conflicting values; kept the first value by source row"
        );
        observer.conflicts_found(&conflicts);
    }

    sort_records(&mut records);
    observer.columns_observed(ProfileStage::Consolidated, &profile_consolidated(&records));

    Consolidation {
        records,
        input_rows: table.rows.len(),
        dropped,
        conflicts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn text(value: &str) -> Option<FieldValue> {
        Some(FieldValue::Text(value.to_string()))
    }

    fn row(source_row: usize, values: Vec<Option<FieldValue>>) -> NormalizedRecord {
        NormalizedRecord { source_row, values }
    }

    fn small_table(rows: Vec<NormalizedRecord>) -> NormalizedTable {
        NormalizedTable {
            headers: vec![
                "Patient".to_string(),
                "CollectDate".to_string(),
                "Sucursal".to_string(),
                "LDL".to_string(),
            ],
            rows,
        }
    }

    #[test]
    fn first_value_by_source_row_wins() {
        let d = Some(FieldValue::Date(date(2024, 1, 15)));
        let table = small_table(vec![
            row(0, vec![text("P1"), d.clone(), None, Some(FieldValue::Number(110.0))]),
            row(1, vec![text("P1"), d.clone(), text("Norte"), Some(FieldValue::Number(95.0))]),
            row(2, vec![text("P1"), d, text("Sur"), None]),
        ]);
        let result = consolidate(&table, &NoopObserver);
        assert_eq!(result.records.len(), 1);
        let record = &result.records[0];
        assert_eq!(record.value("Sucursal"), Some(&FieldValue::Text("Norte".into())));
        assert_eq!(record.value("LDL"), Some(&FieldValue::Number(110.0)));
        assert_eq!(record.value("Contrato"), None);
        assert_eq!(result.conflicts.groups, 1);
        assert_eq!(result.conflicts.by_column.get("Sucursal"), Some(&1));
        assert_eq!(result.conflicts.by_column.get("LDL"), Some(&1));
    }

    #[test]
    fn selection_ignores_table_order() {
        let d = Some(FieldValue::Date(date(2024, 1, 15)));
        let late = row(7, vec![text("P1"), d.clone(), text("Sur"), None]);
        let early = row(3, vec![text("P1"), d, text("Norte"), None]);
        let table = small_table(vec![late, early]);
        let result = consolidate(&table, &NoopObserver);
        assert_eq!(
            result.records[0].value("Sucursal"),
            Some(&FieldValue::Text("Norte".into()))
        );
    }

    #[test]
    fn identical_values_are_not_conflicts() {
        let d = Some(FieldValue::Date(date(2024, 1, 15)));
        let table = small_table(vec![
            row(0, vec![text("P1"), d.clone(), text("Norte"), None]),
            row(1, vec![text("P1"), d, text("Norte"), None]),
        ]);
        let result = consolidate(&table, &NoopObserver);
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn rows_without_date_or_patient_are_dropped() {
        let d = Some(FieldValue::Date(date(2024, 1, 15)));
        let table = small_table(vec![
            row(0, vec![text("P1"), None, text("Norte"), None]),
            row(1, vec![None, d.clone(), text("Norte"), None]),
            row(2, vec![None, None, None, None]),
            row(3, vec![text("P2"), d, None, None]),
        ]);
        let result = consolidate(&table, &NoopObserver);
        assert_eq!(result.input_rows, 4);
        assert_eq!(result.dropped.invalid_collect_date, 2);
        assert_eq!(result.dropped.missing_patient, 1);
        assert_eq!(result.dropped.total(), 3);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].key.patient, "P2");
    }

    #[test]
    fn output_is_sorted_by_patient_then_date() {
        let table = small_table(vec![
            row(0, vec![text("P2"), Some(FieldValue::Date(date(2024, 1, 1))), None, None]),
            row(1, vec![text("P1"), Some(FieldValue::Date(date(2024, 5, 1))), None, None]),
            row(2, vec![text("P1"), Some(FieldValue::Date(date(2023, 5, 1))), None, None]),
            row(3, vec![text("P10"), Some(FieldValue::Date(date(2020, 1, 1))), None, None]),
        ]);
        let result = consolidate(&table, &NoopObserver);
        let keys: Vec<(&str, NaiveDate)> = result
            .records
            .iter()
            .map(|r| (r.key.patient.as_str(), r.key.collect_date))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("P1", date(2023, 5, 1)),
                ("P1", date(2024, 5, 1)),
                ("P10", date(2020, 1, 1)),
                ("P2", date(2024, 1, 1)),
            ]
        );
    }

    #[test]
    fn missing_reconciled_columns_read_as_missing() {
        let key = GroupKey::new("P1", date(2024, 1, 1));
        let member = row(0, vec![text("x")]);
        let columns = vec![Some(0), None, Some(5)];
        let reconciled = reconcile_group(key, &[&member], &columns);
        assert_eq!(reconciled.record.values, vec![text("x"), None, None]);
        assert!(reconciled.conflicting_columns.is_empty());
    }

    #[test]
    fn table_without_key_columns_yields_nothing() {
        let table = NormalizedTable {
            headers: vec!["LDL".to_string()],
            rows: vec![row(0, vec![Some(FieldValue::Number(1.0))])],
        };
        let result = consolidate(&table, &NoopObserver);
        assert!(result.records.is_empty());
        assert_eq!(result.dropped.invalid_collect_date, 1);
    }
}
