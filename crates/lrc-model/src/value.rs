//! Typed field values and their textual output form.

use std::fmt;

use chrono::NaiveDate;

/// Output pattern for dates: two-digit day, two-digit month, four-digit year.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// A present field value. Missing values are `None` wherever a
/// `FieldValue` is optional.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Number(value) => f.write_str(&format_numeric(*value)),
            FieldValue::Date(value) => f.write_str(&format_date(*value)),
        }
    }
}

/// Renders a date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Renders a float the way the source extracts were written: shortest
/// round-trip digits, integral values keep a `.0`, and magnitudes outside
/// `[1e-4, 1e16)` switch to exponent form with a signed two-digit exponent.
pub fn format_numeric(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return format_exponent(value);
    }
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

fn format_exponent(value: f64) -> String {
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
            }
            Err(_) => text,
        },
        None => text,
    }
}
