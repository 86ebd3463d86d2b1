//! Integration tests for dataset loading.

use std::fs::File;
use std::path::{Path, PathBuf};

use anon_ingest::{IngestError, read_dataset, read_dataset_with_limit, read_schema};
use polars::prelude::{Column, DataFrame, DataType, ParquetWriter};
use tempfile::TempDir;

fn write_text(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn write_parquet(path: &Path, mut df: DataFrame) {
    let mut file = File::create(path).unwrap();
    ParquetWriter::new(&mut file).finish(&mut df).unwrap();
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

#[test]
fn reads_csv_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_text(
        &dir,
        "cur.csv",
        "line_item_usage_account_id,line_item_resource_id\n111122223333,arn:aws:s3:us-east-1:111122223333:bucket/a\n",
    );

    let df = read_dataset(&path).unwrap();
    assert_eq!(df.height(), 1);
    assert_eq!(
        column_names(&df),
        vec!["line_item_usage_account_id", "line_item_resource_id"]
    );
}

#[test]
fn csv_cells_are_read_as_written() {
    let dir = TempDir::new().unwrap();
    let path = write_text(
        &dir,
        "cur.csv",
        "bill_payer_account_id,zip,cost\n012345678901,00123,2.0\n",
    );

    let df = read_dataset(&path).unwrap();
    let row: Vec<Option<String>> = df
        .get_columns()
        .iter()
        .map(|column| {
            assert_eq!(column.dtype(), &DataType::String);
            column.str().unwrap().get(0).map(String::from)
        })
        .collect();
    assert_eq!(
        row,
        vec![
            Some("012345678901".to_string()),
            Some("00123".to_string()),
            Some("2.0".to_string()),
        ]
    );
}

#[test]
fn reads_parquet_for_other_extensions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cur.parquet");
    let df = DataFrame::new(vec![
        Column::new("BillingAccountId".into(), &["123456789012", "210987654321"]),
        Column::new("BilledCost".into(), &[1.25f64, 3.0]),
    ])
    .unwrap();
    write_parquet(&path, df);

    let loaded = read_dataset(&path).unwrap();
    assert_eq!(loaded.height(), 2);
    assert_eq!(loaded.column("BilledCost").unwrap().dtype(), &DataType::Float64);
    assert_eq!(
        read_schema(&path).unwrap(),
        vec!["BillingAccountId", "BilledCost"]
    );
}

#[test]
fn header_only_csv_has_zero_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_text(&dir, "empty_rows.csv", "col1,col2\n");

    let df = read_dataset(&path).unwrap();
    assert_eq!(df.height(), 0);
    assert_eq!(column_names(&df), vec!["col1", "col2"]);
}

#[test]
fn empty_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_text(&dir, "empty.csv", "");

    assert!(matches!(
        read_dataset(&path),
        Err(IngestError::EmptyFile { .. })
    ));
    assert!(matches!(
        read_schema(&path),
        Err(IngestError::EmptyFile { .. })
    ));
}

#[test]
fn missing_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.csv");
    assert!(matches!(
        read_dataset(&path),
        Err(IngestError::FileNotFound { .. })
    ));
}

#[test]
fn invalid_parquet_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_text(&dir, "not_parquet.file", "this is not parquet");
    assert!(matches!(
        read_dataset(&path),
        Err(IngestError::ParquetParse { .. })
    ));
}

#[test]
fn size_limit_is_enforced() {
    let dir = TempDir::new().unwrap();
    let path = write_text(&dir, "big.csv", "a,b\n1,2\n3,4\n");
    assert!(matches!(
        read_dataset_with_limit(&path, 4),
        Err(IngestError::FileTooLarge { .. })
    ));
}

#[test]
fn schema_of_csv_with_bom() {
    let dir = TempDir::new().unwrap();
    let path = write_text(&dir, "bom.csv", "\u{feff}InvoiceId,Tags\nINV-1,{}\n");
    assert_eq!(read_schema(&path).unwrap(), vec!["InvoiceId", "Tags"]);
}
