//! Parsing statistics and result structures

use crate::app::models::PriceRecord;

/// Statistics collected while reading delimited input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Data rows turned into records (header excluded)
    pub data_rows: usize,
    /// Whitespace-only lines skipped without consuming a row number
    /// (fully empty lines never reach the parser and are not counted)
    pub blank_lines_skipped: usize,
    /// Rows too short to reach every required column
    pub ragged_rows: usize,
}

impl ParseStats {
    /// Create new empty parse statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Get summary of parsing statistics
    pub fn summary(&self) -> String {
        format!(
            "Parsed {} data rows ({} blank lines skipped, {} ragged rows padded)",
            self.data_rows, self.blank_lines_skipped, self.ragged_rows
        )
    }
}

/// Result of parsing a batch
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Records in input order; row number = index + 1
    pub records: Vec<PriceRecord>,
    /// Parsing statistics
    pub stats: ParseStats,
}

impl ParseResult {
    /// Create a new parse result
    pub fn new(records: Vec<PriceRecord>, stats: ParseStats) -> Self {
        Self { records, stats }
    }

    /// Get the number of parsed records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}
