//! Pricing Validator Library
//!
//! A Rust library for validating batches of exchange-traded price submissions
//! (one record per instrument/exchange/trade date) and reporting the outcome.
//!
//! This library provides tools for:
//! - Parsing delimited price files with alias-tolerant header mapping
//! - Judging each record against fixed, injectable business rules
//! - Flagging exact duplicate rows after the per-record pass
//! - Summarizing a validated batch and rendering the downloadable report
//! - Re-validating individually edited records

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod record_parser;
        pub mod record_validator;
        pub mod summarizer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{PriceRecord, RecordPatch, ValidationResult};
pub use app::services::record_validator::{BatchOutcome, FieldValidator, ValidationPipeline};
pub use app::services::summarizer::{Summary, ValidationReport};
pub use config::{Config, ParserConfig, ValidationRules};

/// Result type alias for the pricing validator
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for pricing validation operations
///
/// Only fatal conditions are represented here. Per-record rule violations and
/// duplicate findings are accumulated as messages on each
/// [`ValidationResult`] and never abort a batch.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input contained no header row
    #[error("CSV file is empty")]
    EmptyInput,

    /// One or more required columns could not be located in the header
    #[error(
        "CSV must contain headers: instrumentGuid, tradeDate, price, exchange, productType (missing: {})",
        .missing.join(", ")
    )]
    MissingColumns { missing: Vec<String> },

    /// Delimited text could not be read
    #[error("CSV parsing error: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Structured (JSON) batch could not be decoded
    #[error("Structured input error: {message}")]
    StructuredInput {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// An edited record would duplicate another stored record
    #[error("This action will create a duplicate record (row {row_number})")]
    DuplicateEdit { row_number: usize },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a missing-columns error from the unresolved column names
    pub fn missing_columns<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingColumns {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a CSV parsing error
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a structured input error
    pub fn structured_input(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::StructuredInput {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a duplicate edit error
    pub fn duplicate_edit(row_number: usize) -> Self {
        Self::DuplicateEdit { row_number }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// True for errors that reject a whole batch before any record is judged
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::MissingColumns { .. }
                | Self::CsvParsing { .. }
                | Self::StructuredInput { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_names_columns() {
        let error = Error::missing_columns(["price", "exchange"]);
        let message = error.to_string();

        assert!(message.starts_with("CSV must contain headers"));
        assert!(message.ends_with("(missing: price, exchange)"));
        assert!(error.is_parse_error());
    }

    #[test]
    fn test_non_parse_errors() {
        assert!(!Error::configuration("bad").is_parse_error());
        assert!(!Error::duplicate_edit(3).is_parse_error());
        assert!(Error::EmptyInput.is_parse_error());
    }
}
