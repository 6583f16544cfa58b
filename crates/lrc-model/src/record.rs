//! Raw, normalized, and consolidated record types.

use chrono::NaiveDate;

use crate::columns::RECONCILED_COLUMNS;
use crate::value::FieldValue;

/// Untyped input table: the header row and one [`RawRecord`] per data row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRecord>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Position of a column in the header row.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One input row. `values` is aligned with [`RawTable::headers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 0-based position among the data rows of the input.
    pub source_row: usize,
    pub values: Vec<Option<String>>,
}

impl RawRecord {
    pub fn new(source_row: usize, values: Vec<Option<String>>) -> Self {
        Self { source_row, values }
    }

    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|value| value.as_deref())
    }
}

/// A [`RawTable`] after field normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    pub headers: Vec<String>,
    pub rows: Vec<NormalizedRecord>,
}

impl NormalizedTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub source_row: usize,
    pub values: Vec<Option<FieldValue>>,
}

impl NormalizedRecord {
    pub fn value(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index).and_then(Option::as_ref)
    }
}

/// Identifies the rows that describe one patient on one collection day.
///
/// The derived ordering compares the patient identifier first, then the date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub patient: String,
    pub collect_date: NaiveDate,
}

impl GroupKey {
    pub fn new(patient: impl Into<String>, collect_date: NaiveDate) -> Self {
        Self {
            patient: patient.into(),
            collect_date,
        }
    }
}

/// One output row per [`GroupKey`].
///
/// `values` is aligned with [`RECONCILED_COLUMNS`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidatedRecord {
    pub key: GroupKey,
    pub values: Vec<Option<FieldValue>>,
}

impl ConsolidatedRecord {
    /// Value of a reconciled column by name; `None` when missing or when the
    /// name is not a reconciled column.
    pub fn value(&self, column: &str) -> Option<&FieldValue> {
        let index = RECONCILED_COLUMNS.iter().position(|name| *name == column)?;
        self.values.get(index).and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_keys_order_by_patient_then_date() {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let mut keys = vec![
            GroupKey::new("P2", d2),
            GroupKey::new("P1", d1),
            GroupKey::new("P1", d2),
        ];
        keys.sort();
        assert_eq!(keys[0], GroupKey::new("P1", d2));
        assert_eq!(keys[1], GroupKey::new("P1", d1));
        assert_eq!(keys[2], GroupKey::new("P2", d2));
    }

    #[test]
    fn consolidated_value_lookup() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let mut values = vec![None; RECONCILED_COLUMNS.len()];
        values[4] = Some(FieldValue::Number(12.5));
        let record = ConsolidatedRecord {
            key: GroupKey::new("P1", date),
            values,
        };
        assert_eq!(record.value("uAlb"), Some(&FieldValue::Number(12.5)));
        assert_eq!(record.value("LDL"), None);
        assert_eq!(record.value("Unknown"), None);
    }

    #[test]
    fn raw_value_treats_absent_cells_as_missing() {
        let record = RawRecord::new(0, vec![Some("a".into()), None]);
        assert_eq!(record.value(0), Some("a"));
        assert_eq!(record.value(1), None);
        assert_eq!(record.value(7), None);
    }
}
