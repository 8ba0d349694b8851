//! Integration tests for the validation pipeline
//!
//! These tests drive the public API end to end: a batch file on disk is
//! parsed, validated, de-duplicated, summarized and written out as a report.

use chrono::NaiveDate;
use pricing_validator::app::services::record_validator::{
    DuplicateLookup, revalidate_edit_checked,
};
use pricing_validator::{
    Config, Error, PriceRecord, RecordPatch, ValidationPipeline, ValidationReport, ValidationRules,
};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const BATCH: &str = "\
instrumentGuid,tradeDate,price,exchange,productType
1001,2025-01-10,120.50,CME,FUT
1002,2025-01-11,99.10,nymex,OPT
,,,,

abc,2025-13-99,10.123,LME,SWAP
1001,2025-01-10,120.50,CME,FUT
1003,2030-01-01,-5.00,CBOT,FUT
";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn batch_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

/// Test a mixed batch from file through to the downloadable report
///
/// Purpose: Validate row numbering, per-field messages, duplicate demotion and
/// report rendering together on one realistic batch
#[tokio::test]
async fn test_mixed_batch_end_to_end() {
    let file = batch_file(BATCH);
    let pipeline = ValidationPipeline::new(&Config::default()).unwrap();

    let outcome = pipeline
        .validate_path(file.path(), today(), false)
        .await
        .unwrap();

    let summary = &outcome.summary;
    assert_eq!(summary.total, 6);
    assert_eq!(summary.valid, 2);
    assert_eq!(summary.invalid, 4);
    assert_eq!(summary.invalid_rows(), &[3, 4, 5, 6]);

    // Row 3 is the all-blank line of commas
    assert_eq!(outcome.results[2].errors.len(), 5);

    assert_eq!(
        outcome.results[3].errors,
        vec![
            "Invalid instrument_guid format at row 4 (must be numeric): 'abc'",
            "Invalid trade_date format at row 4 (expected yyyy-MM-dd): '2025-13-99'",
            "Invalid exchange at row 4: 'LME'. Must be one of: [CME, NYMEX, CBOT, COMEX]",
            "Invalid product_type at row 4: 'SWAP'. Must be one of: [FUT, OPT]",
            "Price must be rounded to 2 decimal places at row 4: 10.123",
        ]
    );
    assert_eq!(
        outcome.results[4].errors,
        vec!["Duplicate Record of Row 1 at 5"]
    );
    assert_eq!(
        outcome.results[5].errors,
        vec![
            "Trade date cannot be in future at row 6: 2030-01-01",
            "Price must be positive at row 6: -5.00",
        ]
    );

    let flattened: usize = outcome.results.iter().map(|r| r.errors.len()).sum();
    assert_eq!(summary.errors.len(), flattened);

    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("report.csv");
    let report = ValidationReport::from_results(&outcome.results);
    report.write_to(&report_path).await.unwrap();

    let written = std::fs::read_to_string(&report_path).unwrap();
    assert!(written.starts_with(
        "Summary\nTotal Records,6\nValid Records,2\nInvalid Records,4\nValid Percentage, 33.33\nInvalid Row Numbers,3 4 5 6\n\nInvalid Records Detail\n"
    ));
    assert!(written.contains("5,1001,2025-01-10,120.50,CME,FUT,\"Duplicate Record of Row 1 at 5\"\n"));
    assert!(written.contains(
        "6,1003,2030-01-01,-5.00,CBOT,FUT,\"Trade date cannot be in future at row 6: 2030-01-01,Price must be positive at row 6: -5.00\"\n"
    ));
}

/// Test that structural failures reject the whole batch
#[tokio::test]
async fn test_structural_failures_reject_batch() {
    let pipeline = ValidationPipeline::new(&Config::default()).unwrap();

    let missing = batch_file("instrumentGuid,tradeDate,price\n1001,2025-01-10,1\n");
    let error = pipeline
        .validate_path(missing.path(), today(), false)
        .await
        .unwrap_err();
    assert!(matches!(error, Error::MissingColumns { .. }));
    assert!(error.to_string().contains("exchange, productType"));

    let empty = batch_file("");
    let error = pipeline
        .validate_path(empty.path(), today(), false)
        .await
        .unwrap_err();
    assert!(matches!(error, Error::EmptyInput));
}

/// Test the snake_case header aliases and structured input produce the same outcome
#[test]
fn test_csv_and_json_inputs_agree() {
    let pipeline = ValidationPipeline::new(&Config::default()).unwrap();

    let csv = "instrument_guid,trade_date,price,exchange,product_type\n1001,2025-01-10,120.50,CME,FUT\n1001,2025-01-10,120.50,CME,FUT\n";
    let json = r#"[
        {"instrumentGuid":"1001","tradeDate":"2025-01-10","price":"120.50","exchange":"CME","productType":"FUT"},
        {"instrumentGuid":"1001","tradeDate":"2025-01-10","price":"120.50","exchange":"CME","productType":"FUT"}
    ]"#;

    let from_csv = pipeline.validate_csv(csv, today(), false).unwrap();
    let from_json = pipeline.validate_json(json, today(), false).unwrap();

    assert_eq!(from_csv, from_json);
    assert_eq!(from_csv.summary.valid, 1);
}

/// Test that injected rules replace the defaults
#[test]
fn test_custom_rules() {
    let config = Config {
        rules: ValidationRules::default()
            .with_exchanges(["LME", "ICE"])
            .with_max_price_scale(4),
        ..Config::default()
    };
    let pipeline = ValidationPipeline::new(&config).unwrap();

    let result = pipeline.validate_single(
        PriceRecord::new("42", "2025-01-10", "2345.1234", "ice", "FUT"),
        today(),
    );
    assert!(result.valid, "unexpected errors: {:?}", result.errors);

    let result = pipeline.validate_single(
        PriceRecord::new("42", "2025-01-10", "1.5", "CME", "FUT"),
        today(),
    );
    assert_eq!(
        result.errors,
        vec!["Invalid exchange at row 1: 'CME'. Must be one of: [LME, ICE]"]
    );
}

struct StoredBatch(Vec<PriceRecord>);

impl DuplicateLookup for StoredBatch {
    fn has_equal_record(&self, record: &PriceRecord, exclude_row: usize) -> bool {
        self.0
            .iter()
            .enumerate()
            .any(|(index, stored)| index + 1 != exclude_row && stored == record)
    }
}

/// Test editing a stored invalid record
#[tokio::test]
async fn test_edit_after_batch() {
    let file = batch_file(BATCH);
    let pipeline = ValidationPipeline::new(&Config::default()).unwrap();
    let outcome = pipeline
        .validate_path(file.path(), today(), false)
        .await
        .unwrap();
    let store = StoredBatch(outcome.results.iter().map(|r| r.record.clone()).collect());

    // Fixing row 6 is accepted
    let fixed = revalidate_edit_checked(
        pipeline.validator(),
        &outcome.results[5].record,
        6,
        &RecordPatch {
            trade_date: Some("2025-01-12".to_string()),
            price: Some("5.00".to_string()),
            ..RecordPatch::default()
        },
        today(),
        &store,
    )
    .unwrap();
    assert!(fixed.valid);

    // Turning row 2 into a copy of row 1 is refused
    let error = revalidate_edit_checked(
        pipeline.validator(),
        &outcome.results[1].record,
        2,
        &RecordPatch {
            instrument_guid: Some("1001".to_string()),
            trade_date: Some("2025-01-10".to_string()),
            price: Some("120.50".to_string()),
            exchange: Some("CME".to_string()),
            product_type: Some("FUT".to_string()),
        },
        today(),
        &store,
    )
    .unwrap_err();
    assert!(matches!(error, Error::DuplicateEdit { row_number: 2 }));
}
