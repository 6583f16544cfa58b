//! Header row normalization and required-column checks.

/// Strips a byte order mark and surrounding whitespace from a header cell.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Required columns absent from `headers`, in the order they were required.
pub fn missing_columns<'a>(headers: &[String], required: &'a [String]) -> Vec<&'a str> {
    required
        .iter()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("\u{feff}Patient"), "Patient");
        assert_eq!(normalize_header("  LDL "), "LDL");
    }

    #[test]
    fn test_missing_columns_keeps_required_order() {
        let headers = vec!["Patient".to_string(), "LDL".to_string()];
        let required = vec![
            "Patient".to_string(),
            "CollectDate".to_string(),
            "HbA1c".to_string(),
        ];
        assert_eq!(missing_columns(&headers, &required), vec!["CollectDate", "HbA1c"]);
    }
}
