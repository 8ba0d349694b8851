//! Per-record field validation
//!
//! This module judges one record in isolation. Every field is checked
//! independently and all violations are collected; a record is valid exactly
//! when no message is produced.
//!
//! Checks run in a fixed order, which is also the order of the messages:
//! 1. `instrument_guid` - required, integer literal
//! 2. `trade_date` - required, canonical date, not after the reference date
//! 3. `exchange` - required, in the exchange allow-list
//! 4. `product_type` - required, in the product type allow-list
//! 5. `price` - required, exact decimal, positive, limited scale

use crate::app::models::{PriceRecord, ValidationResult};
use crate::config::ValidationRules;
use crate::constants::field_names;
use chrono::NaiveDate;
use indicatif::ProgressBar;
use std::sync::Arc;
use tracing::debug;

use super::field_rules::{
    format_allow_list, in_allow_list, is_blank, is_integer_literal, parse_canonical_date,
    parse_price,
};

/// Validator for individual price records
///
/// Holds the rule set behind an `Arc`, so clones are cheap and concurrent
/// callers share one immutable configuration.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    rules: Arc<ValidationRules>,
}

impl FieldValidator {
    /// Create a validator around a rule set
    pub fn new(rules: ValidationRules) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Get the rule set used by this validator
    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Validate one record
    ///
    /// # Arguments
    ///
    /// * `record` - Record to judge
    /// * `row_number` - 1-based row number embedded in every message
    /// * `today` - Reference date for the future trade date check
    ///
    /// # Returns
    ///
    /// Messages in evaluation order; empty when the record is valid
    pub fn validate(&self, record: &PriceRecord, row_number: usize, today: NaiveDate) -> Vec<String> {
        let mut errors = Vec::new();

        self.check_instrument_guid(&record.instrument_guid, row_number, &mut errors);
        self.check_trade_date(&record.trade_date, row_number, today, &mut errors);
        self.check_allow_listed(
            field_names::EXCHANGE,
            &record.exchange,
            &self.rules.exchanges,
            row_number,
            &mut errors,
        );
        self.check_allow_listed(
            field_names::PRODUCT_TYPE,
            &record.product_type,
            &self.rules.product_types,
            row_number,
            &mut errors,
        );
        self.check_price(&record.price, row_number, &mut errors);

        if !errors.is_empty() {
            debug!("Row {} is invalid with errors: {:?}", row_number, errors);
        }

        errors
    }

    /// Validate one record and wrap the outcome
    pub fn validate_record(
        &self,
        record: PriceRecord,
        row_number: usize,
        today: NaiveDate,
    ) -> ValidationResult {
        let errors = self.validate(&record, row_number, today);
        ValidationResult::from_errors(row_number, record, errors)
    }

    /// Per-record pass over a whole batch
    ///
    /// Row numbers are assigned from input order starting at 1. Each result is
    /// independent of every other record; duplicates are not looked at here.
    ///
    /// # Arguments
    ///
    /// * `records` - Records in input order
    /// * `today` - Reference date for the future trade date check
    /// * `progress_bar` - Optional progress bar advanced once per record
    pub fn validate_batch(
        &self,
        records: Vec<PriceRecord>,
        today: NaiveDate,
        progress_bar: Option<&ProgressBar>,
    ) -> Vec<ValidationResult> {
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let result = self.validate_record(record, index + 1, today);
                if let Some(pb) = progress_bar {
                    pb.inc(1);
                }
                result
            })
            .collect()
    }

    fn check_instrument_guid(&self, value: &str, row: usize, errors: &mut Vec<String>) {
        if is_blank(value) {
            errors.push(missing(field_names::INSTRUMENT_GUID, row));
        } else if !is_integer_literal(value) {
            errors.push(format!(
                "Invalid instrument_guid format at row {} (must be numeric): '{}'",
                row, value
            ));
        }
    }

    fn check_trade_date(&self, value: &str, row: usize, today: NaiveDate, errors: &mut Vec<String>) {
        if is_blank(value) {
            errors.push(missing(field_names::TRADE_DATE, row));
            return;
        }

        match parse_canonical_date(value, &self.rules.date_format) {
            None => errors.push(format!(
                "Invalid trade_date format at row {} (expected {}): '{}'",
                row, self.rules.date_format_label, value
            )),
            Some(date) if date > today => errors.push(format!(
                "Trade date cannot be in future at row {}: {}",
                row, value
            )),
            Some(_) => {}
        }
    }

    fn check_allow_listed(
        &self,
        field: &str,
        value: &str,
        allowed: &[String],
        row: usize,
        errors: &mut Vec<String>,
    ) {
        if is_blank(value) {
            errors.push(missing(field, row));
        } else if !in_allow_list(value, allowed) {
            errors.push(format!(
                "Invalid {} at row {}: '{}'. Must be one of: {}",
                field,
                row,
                value,
                format_allow_list(allowed)
            ));
        }
    }

    fn check_price(&self, value: &str, row: usize, errors: &mut Vec<String>) {
        if is_blank(value) {
            errors.push(missing(field_names::PRICE, row));
            return;
        }

        // Non-numeric text suppresses the positivity and scale checks
        let Some(price) = parse_price(value) else {
            errors.push(format!("Invalid price format at row {}: '{}'", row, value));
            return;
        };

        if !price.is_positive() {
            errors.push(format!("Price must be positive at row {}: {}", row, value));
        }
        if price.scale > i64::from(self.rules.max_price_scale) {
            errors.push(format!(
                "Price must be rounded to {} decimal places at row {}: {}",
                self.rules.max_price_scale, row, value
            ));
        }
    }
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new(ValidationRules::default())
    }
}

fn missing(field: &str, row: usize) -> String {
    format!("Missing {} at row {}", field, row)
}
