//! Numeric conversion for lab measurement columns.
//!
//! Measurements arrive with either a period or a comma as decimal separator
//! and occasionally with stray spaces. Anything that still fails to parse is
//! treated as missing.

/// Parse a measurement string to `f64`.
///
/// Every comma is read as a decimal point and all whitespace is removed
/// before parsing. Commas are never treated as thousands separators, so
/// `"1,234"` parses as `1.234` and `"1,234,567"` does not parse.
///
/// Underscores grouping digits (`"1_000"`) are accepted when each one sits
/// between two digits.
///
/// Returns `None` for empty input, unparseable input, and `NaN`.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let cleaned: String = value
        .replace(',', ".")
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let cleaned = strip_digit_separators(&cleaned)?;
    match cleaned.parse::<f64>() {
        Ok(number) if !number.is_nan() => Some(number),
        _ => None,
    }
}

/// Remove `_` digit separators; `None` if one is not between two digits.
fn strip_digit_separators(value: &str) -> Option<String> {
    if !value.contains('_') {
        return Some(value.to_string());
    }
    let bytes = value.as_bytes();
    let mut stripped = String::with_capacity(value.len());
    for (index, ch) in value.char_indices() {
        if ch == '_' {
            let before = index.checked_sub(1).and_then(|i| bytes.get(i));
            let after = bytes.get(index + 1);
            match (before, after) {
                (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
                _ => return None,
            }
        } else {
            stripped.push(ch);
        }
    }
    Some(stripped)
}

/// Normalize an optional raw field; missing stays missing.
pub fn normalize_numeric(raw: Option<&str>) -> Option<f64> {
    raw.and_then(parse_numeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_period_decimal() {
        assert_eq!(parse_numeric("7.5"), Some(7.5));
        assert_eq!(parse_numeric("-0.25"), Some(-0.25));
        assert_eq!(parse_numeric("120"), Some(120.0));
    }

    #[test]
    fn test_comma_decimal() {
        assert_eq!(parse_numeric("7,5"), Some(7.5));
        assert_eq!(parse_numeric("0,9"), Some(0.9));
    }

    #[test]
    fn test_whitespace_removed() {
        assert_eq!(parse_numeric("  6.1 "), Some(6.1));
        assert_eq!(parse_numeric("1 200"), Some(1200.0));
        assert_eq!(parse_numeric("7, 5"), Some(7.5));
    }

    #[test]
    fn test_comma_is_never_a_thousands_separator() {
        assert_eq!(parse_numeric("1,234"), Some(1.234));
        assert_eq!(parse_numeric("1,234,567"), None);
        assert_eq!(parse_numeric("1.234,5"), None);
    }

    #[test]
    fn test_digit_group_underscores() {
        assert_eq!(parse_numeric("1_000"), Some(1000.0));
        assert_eq!(parse_numeric("1_000,5"), Some(1000.5));
        assert_eq!(parse_numeric("2.5e1_0"), Some(2.5e10));
        assert_eq!(parse_numeric("_1000"), None);
        assert_eq!(parse_numeric("1000_"), None);
        assert_eq!(parse_numeric("1__000"), None);
        assert_eq!(parse_numeric("1_.5"), None);
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(parse_numeric("1.5e3"), Some(1500.0));
        assert_eq!(parse_numeric("2,5E-2"), Some(0.025));
    }

    #[test]
    fn test_invalid_is_missing() {
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("   "), None);
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("<5"), None);
        assert_eq!(parse_numeric("12.34.56"), None);
        assert_eq!(parse_numeric("nan"), None);
    }

    #[test]
    fn test_infinity_parses() {
        assert_eq!(parse_numeric("inf"), Some(f64::INFINITY));
        assert_eq!(parse_numeric("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_missing_input() {
        assert_eq!(normalize_numeric(None), None);
        assert_eq!(normalize_numeric(Some("4,0")), Some(4.0));
    }

    proptest! {
        #[test]
        fn comma_and_period_decimals_agree(whole in 0u32..100_000, frac in 0u32..10_000) {
            let with_period = format!("{whole}.{frac}");
            let with_comma = format!("{whole},{frac}");
            prop_assert_eq!(parse_numeric(&with_comma), parse_numeric(&with_period));
            prop_assert!(parse_numeric(&with_comma).is_some());
        }

        #[test]
        fn never_panics(input in ".*") {
            let _ = parse_numeric(&input);
        }
    }
}
