//! Batch summary computed from finalized validation results

use crate::app::models::ValidationResult;
use rust_decimal::prelude::*;
use serde::Serialize;

/// Aggregate view of one finalized batch
///
/// Serializes as `{total, valid, invalid, errors}`. Output only: the invalid
/// row numbers are not part of the JSON form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of results
    pub total: usize,
    /// Results still valid after the duplicate pass
    pub valid: usize,
    /// `total - valid`
    pub invalid: usize,
    /// Every message of every result, record order then message order
    pub errors: Vec<String>,
    #[serde(skip)]
    invalid_rows: Vec<usize>,
}

impl Summary {
    /// Row numbers of the invalid results, in batch order
    pub fn invalid_rows(&self) -> &[usize] {
        &self.invalid_rows
    }

    /// Share of valid results as a percentage rounded half-up to 2 places
    ///
    /// An empty batch reports 0.
    pub fn valid_percentage(&self) -> Decimal {
        if self.total == 0 {
            return Decimal::ZERO;
        }

        let percentage = Decimal::from(self.valid as u64) * Decimal::ONE_HUNDRED
            / Decimal::from(self.total as u64);
        percentage.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Valid percentage with exactly two decimal places (`66.67`, `0.00`)
    pub fn valid_percentage_text(&self) -> String {
        let mut percentage = self.valid_percentage();
        percentage.rescale(2);
        percentage.to_string()
    }

    /// Get summary of the batch outcome
    pub fn overview(&self) -> String {
        format!(
            "Validated {} records: {} valid, {} invalid ({}% valid)",
            self.total,
            self.valid,
            self.invalid,
            self.valid_percentage_text()
        )
    }
}

/// Summarize a finalized batch
pub fn summarize(results: &[ValidationResult]) -> Summary {
    let total = results.len();
    let invalid_rows: Vec<usize> = results
        .iter()
        .filter(|result| !result.valid)
        .map(|result| result.row_number)
        .collect();
    let errors = results
        .iter()
        .flat_map(|result| result.errors.iter().cloned())
        .collect();

    Summary {
        total,
        valid: total - invalid_rows.len(),
        invalid: invalid_rows.len(),
        errors,
        invalid_rows,
    }
}
