use lrc_model::{ColumnKind, ConsolidateOptions, Manifest};

#[test]
fn manifest_serializes() {
    let manifest = Manifest::new(3, vec!["A_part_1.csv".to_string()]);
    let json = serde_json::to_string(&manifest).expect("serialize manifest");
    let round: Manifest = serde_json::from_str(&json).expect("deserialize manifest");
    assert_eq!(round, manifest);
    assert_eq!(round.partition_count, 1);
}

#[test]
fn options_fill_missing_fields_with_defaults() {
    let options: ConsolidateOptions =
        serde_json::from_str(r#"{"chunk_size": 10}"#).expect("deserialize options");
    assert_eq!(options.chunk_size, 10);
    assert_eq!(options.file_prefix, "Consolidated_Results");
    assert_eq!(options.delimiter, b',');
}

#[test]
fn column_kind_serializes_lowercase() {
    let json = serde_json::to_string(&ColumnKind::Numeric).expect("serialize kind");
    assert_eq!(json, "\"numeric\"");
}
