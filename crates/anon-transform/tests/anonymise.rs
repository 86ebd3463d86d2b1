//! End-to-end tests for resolving and executing configurations.

use std::fs::File;

use anon_common::canonical_values;
use anon_ingest::read_dataset;
use anon_model::{AnonymiserConfig, ColumnAction, ConfigError};
use anon_transform::{
    MappingSet, ResolvedPlan, TransformError, execute, fake_account_id, fake_uuid, hash_value,
    project, resolve,
};
use polars::prelude::*;
use tempfile::TempDir;

fn schema_of(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn plan_for(df: &DataFrame, config: &AnonymiserConfig) -> ResolvedPlan {
    resolve(&schema_of(df), config).unwrap()
}

fn strings(df: &DataFrame, column: &str) -> Vec<Option<String>> {
    canonical_values(df.column(column).unwrap()).unwrap()
}

fn cur_frame() -> DataFrame {
    DataFrame::new(vec![
        Column::new(
            "bill_payer_account_id".into(),
            &["123456789012", "123456789012", "123456789012"],
        ),
        Column::new(
            "reservation_reservation_a_r_n".into(),
            &[
                "arn:aws:ce::123456789012:reservation/r-1",
                "arn:aws:ce::123456789012:reservation/r-1",
                "arn:aws:ce::123456789012:reservation/r-1",
            ],
        ),
        Column::new(
            "product_region_code".into(),
            &["us-east-1", "eu-west-1", "us-east-1"],
        ),
    ])
    .unwrap()
}

#[test]
fn account_id_is_consistent_and_embedded_in_arn() {
    let df = cur_frame();
    let config = AnonymiserConfig::from_json_str(
        r#"{"columns": {"bill_payer_account_id": "awsid_anonymise", "reservation_reservation_a_r_n": "awsarn_anonymise"}}"#,
    )
    .unwrap();
    let plan = plan_for(&df, &config);
    let output = execute(&df, &plan).unwrap().data;

    assert_eq!(output.height(), 3);
    assert_eq!(
        schema_of(&output),
        vec!["bill_payer_account_id", "reservation_reservation_a_r_n"]
    );

    let ids = strings(&output, "bill_payer_account_id");
    let fake = ids[0].clone().unwrap();
    assert_eq!(fake.len(), 12);
    assert!(fake.chars().all(|c| c.is_ascii_digit()));
    assert_ne!(fake, "123456789012");
    assert!(ids.iter().all(|id| id.as_deref() == Some(fake.as_str())));

    let expected_arn = format!("arn:aws:ce::{fake}:reservation/r-1");
    for arn in strings(&output, "reservation_reservation_a_r_n") {
        assert_eq!(arn.as_deref(), Some(expected_arn.as_str()));
    }
}

#[test]
fn kept_columns_keep_native_type() {
    let df = DataFrame::new(vec![
        Column::new("cost".into(), &[1.5f64, 2.0, 0.25]),
        Column::new("usage".into(), &[1i64, 2, 3]),
    ])
    .unwrap();
    let config = AnonymiserConfig::new()
        .with_column("cost", ColumnAction::Keep)
        .with_column("usage", ColumnAction::Hash);
    let output = execute(&df, &plan_for(&df, &config)).unwrap().data;

    assert_eq!(output.column("cost").unwrap().dtype(), &DataType::Float64);
    assert_eq!(output.column("usage").unwrap().dtype(), &DataType::String);
    assert_eq!(
        strings(&output, "usage"),
        vec![
            Some(hash_value("1")),
            Some(hash_value("2")),
            Some(hash_value("3"))
        ]
    );
}

#[test]
fn nulls_pass_through_every_action() {
    let df = DataFrame::new(vec![
        Column::new("account_id".into(), &[Some("111111111111"), None]),
        Column::new(
            "resource_arn".into(),
            &[None, Some("arn:aws:iam::111111111111:role/x")],
        ),
        Column::new("tags".into(), &[None, Some("team=a")]),
        Column::new("invoice".into(), &[Some("INV-1"), None]),
    ])
    .unwrap();
    let config = AnonymiserConfig::new()
        .with_column("account_id", ColumnAction::AwsIdAnonymise)
        .with_column("resource_arn", ColumnAction::AwsArnAnonymise)
        .with_column("tags", ColumnAction::Hash)
        .with_column("invoice", ColumnAction::Uuid);
    let output = execute(&df, &plan_for(&df, &config)).unwrap().data;

    assert_eq!(strings(&output, "account_id")[1], None);
    assert_eq!(strings(&output, "resource_arn")[0], None);
    assert_eq!(strings(&output, "tags")[0], None);
    assert_eq!(strings(&output, "invoice")[1], None);
    assert_eq!(
        strings(&output, "invoice")[0].as_deref(),
        Some(fake_uuid("INV-1").as_str())
    );

    // The ARN's companion account value is null, so its own segment seeds the fake id.
    let fake = fake_account_id("111111111111");
    assert_eq!(
        strings(&output, "resource_arn")[1],
        Some(format!("arn:aws:iam::{fake}:role/x"))
    );
}

#[test]
fn arn_edge_cases_fail_open() {
    let df = DataFrame::new(vec![
        Column::new(
            "payer_account_id".into(),
            &["123456789012", "123456789012", "123456789012"],
        ),
        Column::new(
            "resource_arn".into(),
            &["arn:aws:s3:::mybucket", "not-an-arn", "arn:aws:iam::123456789012:user/Bob"],
        ),
    ])
    .unwrap();
    let config = AnonymiserConfig::new()
        .with_column("payer_account_id", ColumnAction::AwsIdAnonymise)
        .with_column("resource_arn", ColumnAction::AwsArnAnonymise);
    let output = execute(&df, &plan_for(&df, &config)).unwrap().data;

    let fake = fake_account_id("123456789012");
    assert_eq!(
        strings(&output, "resource_arn"),
        vec![
            Some("arn:aws:s3:::mybucket".to_string()),
            Some("not-an-arn".to_string()),
            Some(format!("arn:aws:iam::{fake}:user/Bob")),
        ]
    );
}

#[test]
fn arn_uses_first_seen_account_pairing() {
    let df = DataFrame::new(vec![
        Column::new(
            "line_item_usage_account_id".into(),
            &["111111111111", "222222222222"],
        ),
        Column::new(
            "line_item_resource_id".into(),
            &[
                "arn:aws:ec2:us-east-1:999999999999:instance/i-1",
                "arn:aws:ec2:us-east-1:999999999999:instance/i-1",
            ],
        ),
    ])
    .unwrap();
    let config = AnonymiserConfig::new()
        .with_column("line_item_usage_account_id", ColumnAction::AwsIdAnonymise)
        .with_column("line_item_resource_id", ColumnAction::AwsArnAnonymise);
    let output = execute(&df, &plan_for(&df, &config)).unwrap().data;

    let expected = format!(
        "arn:aws:ec2:us-east-1:{}:instance/i-1",
        fake_account_id("111111111111")
    );
    let arns = strings(&output, "line_item_resource_id");
    assert_eq!(arns, vec![Some(expected.clone()), Some(expected)]);
}

#[test]
fn removed_and_unconfigured_columns_are_dropped() {
    let df = cur_frame();
    let config = AnonymiserConfig::new()
        .with_column("product_region_code", ColumnAction::Keep)
        .with_column("bill_payer_account_id", ColumnAction::Remove);
    let execution = execute(&df, &plan_for(&df, &config)).unwrap();

    assert_eq!(schema_of(&execution.data), vec!["product_region_code"]);
    assert_eq!(
        strings(&execution.data, "product_region_code"),
        strings(&df, "product_region_code")
    );
    assert_eq!(execution.summaries.len(), 1);
    assert_eq!(execution.summaries[0].action, ColumnAction::Keep);
    assert_eq!(execution.summaries[0].distinct_values, None);
}

#[test]
fn summaries_report_mapping_sizes() {
    let df = cur_frame();
    let config = AnonymiserConfig::new()
        .with_column("bill_payer_account_id", ColumnAction::AwsIdAnonymise)
        .with_column("reservation_reservation_a_r_n", ColumnAction::AwsArnAnonymise)
        .with_column("product_region_code", ColumnAction::Uuid);
    let execution = execute(&df, &plan_for(&df, &config)).unwrap();

    let by_column = |name: &str| {
        execution
            .summaries
            .iter()
            .find(|summary| summary.column == name)
            .unwrap()
            .clone()
    };
    assert_eq!(by_column("bill_payer_account_id").distinct_values, Some(1));
    assert_eq!(by_column("product_region_code").distinct_values, Some(2));
    assert_eq!(
        by_column("reservation_reservation_a_r_n").account_column.as_deref(),
        Some("bill_payer_account_id")
    );
}

#[test]
fn header_only_dataset_produces_header_only_output() {
    let df = DataFrame::new(vec![
        Column::new("col1".into(), Vec::<Option<String>>::new()),
        Column::new("col2".into(), Vec::<Option<String>>::new()),
    ])
    .unwrap();
    let config = AnonymiserConfig::new()
        .with_column("col1", ColumnAction::Hash)
        .with_column("col2", ColumnAction::Uuid);
    let output = execute(&df, &plan_for(&df, &config)).unwrap().data;
    assert_eq!(output.height(), 0);
    assert_eq!(schema_of(&output), vec!["col1", "col2"]);
}

#[test]
fn missing_mapping_table_is_a_runtime_error() {
    let df = cur_frame();
    let config = AnonymiserConfig::new().with_column("product_region_code", ColumnAction::Uuid);
    let plan = plan_for(&df, &config);
    let err = project(&df, &plan, &MappingSet::new()).unwrap_err();
    assert!(matches!(
        err,
        TransformError::MissingMapping { ref column } if column == "product_region_code"
    ));
}

#[test]
fn unknown_column_is_a_config_error() {
    let df = cur_frame();
    let config = AnonymiserConfig::from_json_str(r#"{"_comment": "test", "columns": {"NotAColumn": "hash"}}"#)
        .unwrap();
    assert!(matches!(
        resolve(&schema_of(&df), &config),
        Err(ConfigError::UnknownColumn { .. })
    ));
}

#[test]
fn csv_and_parquet_inputs_give_identical_output() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("cur.csv");
    std::fs::write(
        &csv_path,
        "line_item_usage_account_id,line_item_resource_id,cost,rate,zip,resource_tags\n\
         012345678901,arn:aws:ec2:us-east-1:012345678901:instance/i-1,1.5,2.0,00123,team=a\n\
         210987654321,arn:aws:ec2:eu-west-1:210987654321:volume/v-2,2.0,10,98052,\n",
    )
    .unwrap();

    // Same cells stored as Parquet strings.
    let parquet_path = dir.path().join("cur.parquet");
    let mut typed = DataFrame::new(vec![
        Column::new(
            "line_item_usage_account_id".into(),
            &["012345678901", "210987654321"],
        ),
        Column::new(
            "line_item_resource_id".into(),
            &[
                "arn:aws:ec2:us-east-1:012345678901:instance/i-1",
                "arn:aws:ec2:eu-west-1:210987654321:volume/v-2",
            ],
        ),
        Column::new("cost".into(), &["1.5", "2.0"]),
        Column::new("rate".into(), &["2.0", "10"]),
        Column::new("zip".into(), &["00123", "98052"]),
        Column::new("resource_tags".into(), &[Some("team=a"), None]),
    ])
    .unwrap();
    let mut file = File::create(&parquet_path).unwrap();
    ParquetWriter::new(&mut file).finish(&mut typed).unwrap();

    let config = AnonymiserConfig::new()
        .with_column("line_item_usage_account_id", ColumnAction::AwsIdAnonymise)
        .with_column("line_item_resource_id", ColumnAction::AwsArnAnonymise)
        .with_column("cost", ColumnAction::Uuid)
        .with_column("rate", ColumnAction::Hash)
        .with_column("zip", ColumnAction::Keep)
        .with_column("resource_tags", ColumnAction::Hash);

    let from_csv = read_dataset(&csv_path).unwrap();
    let from_parquet = read_dataset(&parquet_path).unwrap();
    let out_csv = execute(&from_csv, &plan_for(&from_csv, &config)).unwrap().data;
    let out_parquet = execute(&from_parquet, &plan_for(&from_parquet, &config))
        .unwrap()
        .data;

    for column in schema_of(&out_csv) {
        assert_eq!(
            strings(&out_csv, &column),
            strings(&out_parquet, &column),
            "column {column} differs between formats"
        );
    }

    // Substitutes derive from the cell text as written.
    assert_eq!(
        strings(&out_csv, "line_item_usage_account_id")[0],
        Some(fake_account_id("012345678901"))
    );
    assert_ne!(
        fake_account_id("012345678901"),
        fake_account_id("12345678901")
    );
    assert_eq!(
        strings(&out_csv, "line_item_resource_id")[0],
        Some(format!(
            "arn:aws:ec2:us-east-1:{}:instance/i-1",
            fake_account_id("012345678901")
        ))
    );
    assert_eq!(strings(&out_csv, "cost")[1], Some(fake_uuid("2.0")));
    assert_eq!(strings(&out_csv, "rate")[0], Some(hash_value("2.0")));
    assert_eq!(
        strings(&out_csv, "zip"),
        vec![Some("00123".to_string()), Some("98052".to_string())]
    );
}
