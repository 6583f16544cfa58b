//! Collection date parsing.
//!
//! Only `DD/MM/YYYY` is accepted. There is deliberately no fallback to other
//! layouts: an ISO date or a single-digit day is treated as unparseable.

use chrono::NaiveDate;

fn ascii_number(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Parse an exact `DD/MM/YYYY` string into a calendar date.
///
/// Returns `None` when the layout differs in any way (including surrounding
/// whitespace), when the year is `0000`, or when the date does not exist.
pub fn parse_collect_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 || !value.is_ascii() {
        return None;
    }
    let bytes = value.as_bytes();
    if bytes[2] != b'/' || bytes[5] != b'/' {
        return None;
    }
    let day = ascii_number(&value[0..2])?;
    let month = ascii_number(&value[3..5])?;
    let year = ascii_number(&value[6..10])?;
    if year == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Normalize an optional raw field; missing stays missing.
pub fn normalize_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(parse_collect_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lrc_model::format_date;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_month_year() {
        assert_eq!(parse_collect_date("15/01/2024"), Some(date(2024, 1, 15)));
        assert_eq!(parse_collect_date("29/02/2024"), Some(date(2024, 2, 29)));
        assert_eq!(parse_collect_date("01/12/1999"), Some(date(1999, 12, 1)));
    }

    #[test]
    fn test_invalid_calendar_dates() {
        assert_eq!(parse_collect_date("31/02/2024"), None);
        assert_eq!(parse_collect_date("29/02/2023"), None);
        assert_eq!(parse_collect_date("00/01/2024"), None);
        assert_eq!(parse_collect_date("12/13/2024"), None);
        assert_eq!(parse_collect_date("01/01/0000"), None);
    }

    #[test]
    fn test_other_layouts_rejected() {
        assert_eq!(parse_collect_date("2024-01-15"), None);
        assert_eq!(parse_collect_date("15-01-2024"), None);
        assert_eq!(parse_collect_date("5/1/2024"), None);
        assert_eq!(parse_collect_date("15/01/24"), None);
        assert_eq!(parse_collect_date(" 15/01/2024"), None);
        assert_eq!(parse_collect_date("15/01/2024 10:30"), None);
        assert_eq!(parse_collect_date("+5/01/2024"), None);
        assert_eq!(parse_collect_date("15/01/２０24"), None);
        assert_eq!(parse_collect_date(""), None);
    }

    #[test]
    fn test_missing_input() {
        assert_eq!(normalize_date(None), None);
    }

    proptest! {
        #[test]
        fn formatted_dates_parse_back(days in 0i64..200_000) {
            let value = date(1900, 1, 1) + chrono::Duration::days(days);
            prop_assert_eq!(parse_collect_date(&format_date(value)), Some(value));
        }

        #[test]
        fn iso_dates_never_parse(days in 0i64..200_000) {
            let value = date(1900, 1, 1) + chrono::Duration::days(days);
            let iso = value.format("%Y-%m-%d").to_string();
            prop_assert_eq!(parse_collect_date(&iso), None);
        }
    }
}
