//! Tests for header resolution

use crate::Error;
use crate::app::services::record_parser::ColumnMapping;
use csv::StringRecord;

fn headers(cells: &[&str]) -> StringRecord {
    StringRecord::from(cells.to_vec())
}

#[test]
fn test_analyze_camel_case_headers() {
    let mapping = ColumnMapping::analyze(&headers(&[
        "instrumentGuid",
        "tradeDate",
        "price",
        "exchange",
        "productType",
    ]))
    .unwrap();

    assert_eq!(mapping.instrument_guid, 0);
    assert_eq!(mapping.trade_date, 1);
    assert_eq!(mapping.price, 2);
    assert_eq!(mapping.exchange, 3);
    assert_eq!(mapping.product_type, 4);
    assert_eq!(mapping.required_width(), 5);
}

#[test]
fn test_analyze_snake_case_mixed_case_and_padding() {
    let mapping = ColumnMapping::analyze(&headers(&[
        " PRODUCT_TYPE ",
        "Exchange",
        "notes",
        "Trade_Date",
        "PRICE",
        "instrument_guid",
    ]))
    .unwrap();

    assert_eq!(mapping.product_type, 0);
    assert_eq!(mapping.exchange, 1);
    assert_eq!(mapping.trade_date, 3);
    assert_eq!(mapping.price, 4);
    assert_eq!(mapping.instrument_guid, 5);
    assert_eq!(mapping.required_width(), 6);
}

#[test]
fn test_analyze_strips_byte_order_mark() {
    let mapping = ColumnMapping::analyze(&headers(&[
        "\u{feff}instrumentGuid",
        "tradeDate",
        "price",
        "exchange",
        "productType",
    ]))
    .unwrap();

    assert_eq!(mapping.instrument_guid, 0);
}

#[test]
fn test_analyze_first_matching_column_wins() {
    let mapping = ColumnMapping::analyze(&headers(&[
        "price",
        "instrumentGuid",
        "tradeDate",
        "price",
        "exchange",
        "productType",
    ]))
    .unwrap();

    assert_eq!(mapping.price, 0);
}

#[test]
fn test_analyze_reports_every_missing_column() {
    let error = ColumnMapping::analyze(&headers(&["instrumentGuid", "tradeDate", "productType"]))
        .unwrap_err();

    match error {
        Error::MissingColumns { missing } => {
            assert_eq!(missing, vec!["price", "exchange"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_analyze_unrelated_headers() {
    let error = ColumnMapping::analyze(&headers(&["a", "b"])).unwrap_err();

    match error {
        Error::MissingColumns { missing } => assert_eq!(missing.len(), 5),
        other => panic!("unexpected error: {other:?}"),
    }
}
