//! Record parser for price submission batches
//!
//! Turns raw tabular text into an ordered sequence of [`PriceRecord`]s, one per
//! non-blank data row, preserving input order. Structured (JSON) batches bypass
//! the tabular reader but yield the same record type.
//!
//! ## Architecture
//!
//! - [`parser`] - Reader orchestration, blank-line and ragged-row handling
//! - [`column_mapping`] - Alias-tolerant header resolution
//! - [`structured`] - Already-structured JSON input
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use pricing_validator::app::services::record_parser::RecordParser;
//! use pricing_validator::config::ParserConfig;
//!
//! # fn example() -> pricing_validator::Result<()> {
//! let parser = RecordParser::new(ParserConfig::default())?;
//! let result = parser.parse_str("instrumentGuid,tradeDate,price,exchange,productType\n1001,2025-01-10,120.50,CME,FUT\n")?;
//!
//! assert_eq!(result.records.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! [`PriceRecord`]: crate::app::models::PriceRecord

pub mod column_mapping;
pub mod parser;
pub mod stats;
pub mod structured;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::ColumnMapping;
pub use parser::RecordParser;
pub use stats::{ParseResult, ParseStats};
pub use structured::parse_json_records;
