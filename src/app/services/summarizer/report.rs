//! Downloadable text report for a finalized batch
//!
//! Layout:
//!
//! ```text
//! Summary
//! Total Records,<n>
//! Valid Records,<n>
//! Invalid Records,<n>
//! Valid Percentage, <xx.xx>
//! Invalid Row Numbers,<space-separated rows, or None>
//!
//! Invalid Records Detail
//! rowNumber,instrumentGuid,tradeDate,price,exchange,productType,errors
//! <row>,<guid>,<date>,<price>,<exchange>,<productType>,"<errors>"
//! ```
//!
//! Detail values other than `errors` are written raw. The messages of a record
//! are joined with `,` and always quoted, with inner quotes doubled.

use crate::app::models::ValidationResult;
use crate::constants::{REPORT_DETAIL_HEADER, REPORT_ERROR_SEPARATOR};
use crate::{Error, Result};
use std::path::Path;
use tracing::info;

use super::summary::{Summary, summarize};

/// Report over one finalized batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    summary: Summary,
    invalid: Vec<ValidationResult>,
}

impl ValidationReport {
    /// Build a report from finalized results
    pub fn from_results(results: &[ValidationResult]) -> Self {
        Self {
            summary: summarize(results),
            invalid: results.iter().filter(|r| !r.valid).cloned().collect(),
        }
    }

    /// Get the batch summary behind this report
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Render the report text
    pub fn render(&self) -> String {
        let summary = &self.summary;
        let mut out = String::new();

        out.push_str("Summary\n");
        out.push_str(&format!("Total Records,{}\n", summary.total));
        out.push_str(&format!("Valid Records,{}\n", summary.valid));
        out.push_str(&format!("Invalid Records,{}\n", summary.invalid));
        out.push_str(&format!(
            "Valid Percentage, {}\n",
            summary.valid_percentage_text()
        ));
        out.push_str(&format!("Invalid Row Numbers,{}\n", invalid_row_list(summary)));

        out.push('\n');
        out.push_str("Invalid Records Detail\n");
        out.push_str(REPORT_DETAIL_HEADER);
        out.push('\n');

        for result in &self.invalid {
            let record = &result.record;
            out.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                result.row_number,
                record.instrument_guid,
                record.trade_date,
                record.price,
                record.exchange,
                record.product_type,
                quote_field(&result.errors.join(REPORT_ERROR_SEPARATOR))
            ));
        }

        out
    }

    /// Write the rendered report to a file
    pub async fn write_to(&self, path: &Path) -> Result<()> {
        tokio::fs::write(path, self.render()).await.map_err(|e| {
            Error::io(format!("Failed to write report {}", path.display()), e)
        })?;

        info!(
            "Wrote validation report for {} records to {}",
            self.summary.total,
            path.display()
        );
        Ok(())
    }
}

fn invalid_row_list(summary: &Summary) -> String {
    if summary.invalid_rows().is_empty() {
        return "None".to_string();
    }

    summary
        .invalid_rows()
        .iter()
        .map(|row| row.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wrap a value in double quotes, doubling any quote inside it
pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
