//! Tests for the record validator module


use crate::app::models::PriceRecord;
use chrono::NaiveDate;

/// Fixed reference date so the future-date rule never depends on the clock
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

/// A record that passes every field check against [`today`]
pub fn well_formed() -> PriceRecord {
    PriceRecord::new("1001", "2025-01-10", "120.50", "CME", "FUT")
}

pub fn blank() -> PriceRecord {
    PriceRecord::new("", "", "", "", "")
}
