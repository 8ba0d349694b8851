//! Validation pipeline orchestration
//!
//! This module wires the stages together for one batch: parse (when the input
//! is text), per-record field validation, duplicate detection, and summary.
//! Every call works only on its own input; the pipeline keeps no state between
//! batches.

use crate::Result;
use crate::app::models::{PriceRecord, ValidationResult};
use crate::app::services::record_parser::{RecordParser, parse_json_records};
use crate::app::services::summarizer::{Summary, summarize};
use crate::config::Config;
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use super::duplicate_detector::detect_duplicates;
use super::field_validator::FieldValidator;

/// Finalized results of one batch plus their summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    /// Aggregate counts and flattened messages
    pub summary: Summary,
    /// One result per record, in input order
    pub results: Vec<ValidationResult>,
}

impl BatchOutcome {
    /// Build an outcome from finalized results
    pub fn new(results: Vec<ValidationResult>) -> Self {
        Self {
            summary: summarize(&results),
            results,
        }
    }

    /// Results that ended up invalid
    pub fn invalid_results(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|result| !result.valid)
    }
}

/// Validation pipeline for price submission batches
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use pricing_validator::{Config, PriceRecord, ValidationPipeline};
///
/// # fn example() -> pricing_validator::Result<()> {
/// let pipeline = ValidationPipeline::new(&Config::default())?;
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
///
/// let records = vec![
///     PriceRecord::new("1001", "2025-01-10", "120.50", "CME", "FUT"),
///     PriceRecord::new("1001", "2025-01-10", "120.50", "CME", "FUT"),
/// ];
/// let outcome = pipeline.validate_records(records, today, false);
///
/// assert_eq!(outcome.summary.valid, 1);
/// assert_eq!(outcome.summary.invalid, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ValidationPipeline {
    parser: RecordParser,
    validator: FieldValidator,
}

impl ValidationPipeline {
    /// Create a pipeline from configuration
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            parser: RecordParser::new(config.parser.clone())?,
            validator: FieldValidator::new(config.rules.clone()),
        })
    }

    /// Create a pipeline from already-built stages
    pub fn from_parts(parser: RecordParser, validator: FieldValidator) -> Self {
        Self { parser, validator }
    }

    /// Get the field validator used by this pipeline
    pub fn validator(&self) -> &FieldValidator {
        &self.validator
    }

    /// Get the record parser used by this pipeline
    pub fn parser(&self) -> &RecordParser {
        &self.parser
    }

    /// Validate an already-structured batch
    ///
    /// # Arguments
    ///
    /// * `records` - Records in input order; row numbers are assigned from 1
    /// * `today` - Reference date for the future trade date check
    /// * `show_progress` - Whether to show a progress bar for the per-record pass
    ///
    /// # Returns
    ///
    /// The finalized results and their summary
    pub fn validate_records(
        &self,
        records: Vec<PriceRecord>,
        today: NaiveDate,
        show_progress: bool,
    ) -> BatchOutcome {
        info!(
            "Starting validation of {} records (reference date {})",
            records.len(),
            today
        );

        let progress_bar = show_progress.then(|| Self::create_progress_bar(records.len() as u64));

        // Stage one: independent per-record outcomes
        let per_record = self
            .validator
            .validate_batch(records, today, progress_bar.as_ref());

        if let Some(pb) = progress_bar {
            pb.finish_with_message(format!("Field validation complete: {} records", per_record.len()));
        }

        // Stage two: demote duplicates over the complete batch
        let finalized = detect_duplicates(per_record);
        let outcome = BatchOutcome::new(finalized);

        info!(
            "Validation complete: {} total, {} valid, {} invalid",
            outcome.summary.total, outcome.summary.valid, outcome.summary.invalid
        );

        outcome
    }

    /// Parse delimited text and validate it
    ///
    /// Parse failures reject the batch with no partial results.
    pub fn validate_csv(
        &self,
        content: &str,
        today: NaiveDate,
        show_progress: bool,
    ) -> Result<BatchOutcome> {
        let parsed = self.parser.parse_str(content)?;
        debug!("{}", parsed.stats.summary());
        Ok(self.validate_records(parsed.records, today, show_progress))
    }

    /// Read a delimited file and validate it
    pub async fn validate_path(
        &self,
        path: &Path,
        today: NaiveDate,
        show_progress: bool,
    ) -> Result<BatchOutcome> {
        let parsed = self.parser.parse_path(path).await?;
        Ok(self.validate_records(parsed.records, today, show_progress))
    }

    /// Decode a JSON array of records and validate it
    pub fn validate_json(
        &self,
        content: &str,
        today: NaiveDate,
        show_progress: bool,
    ) -> Result<BatchOutcome> {
        let records = parse_json_records(content)?;
        Ok(self.validate_records(records, today, show_progress))
    }

    /// Validate one record as a batch of one
    pub fn validate_single(&self, record: PriceRecord, today: NaiveDate) -> ValidationResult {
        let mut outcome = self.validate_records(vec![record], today, false);
        // A batch of one always yields exactly one result
        outcome.results.remove(0)
    }

    /// Create a progress bar for the per-record pass
    fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("Field validation");
        pb
    }
}
