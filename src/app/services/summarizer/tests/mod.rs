//! Tests for the summarizer module


use crate::app::models::{PriceRecord, ValidationResult};

/// Finalized result with the given messages
pub fn result(row: usize, record: PriceRecord, errors: &[&str]) -> ValidationResult {
    ValidationResult::from_errors(row, record, errors.iter().map(|e| e.to_string()).collect())
}

pub fn record(guid: &str) -> PriceRecord {
    PriceRecord::new(guid, "2025-01-10", "120.50", "CME", "FUT")
}
