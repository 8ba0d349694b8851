//! Core record parser implementation
//!
//! This module reads delimited text into [`PriceRecord`]s. Lines are split flat
//! on the delimiter: quote characters carry no meaning and are kept verbatim in
//! the cell. Blank lines are skipped without consuming a row number and rows
//! shorter than the header are padded with empty values.

use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use super::column_mapping::ColumnMapping;
use super::stats::{ParseResult, ParseStats};
use crate::app::models::PriceRecord;
use crate::config::ParserConfig;
use crate::{Error, Result};

/// Parser for delimited price submission files
///
/// A parser holds only its delimiter, so one instance can serve any number of
/// independent batches.
#[derive(Debug, Clone)]
pub struct RecordParser {
    delimiter: u8,
}

impl RecordParser {
    /// Create a new parser from parser settings
    pub fn new(config: ParserConfig) -> Result<Self> {
        Ok(Self {
            delimiter: config.delimiter_byte()?,
        })
    }

    /// Read a file and parse it
    pub async fn parse_path(&self, path: &Path) -> Result<ParseResult> {
        info!("Reading price file: {}", path.display());

        let content = tokio::fs::read(path).await.map_err(|e| {
            Error::io(format!("Failed to read file {}", path.display()), e)
        })?;

        self.parse_reader(content.as_slice())
    }

    /// Parse in-memory delimited text
    pub fn parse_str(&self, content: &str) -> Result<ParseResult> {
        self.parse_reader(content.as_bytes())
    }

    /// Parse delimited text from any reader
    ///
    /// Fails without partial output when the input has no header row or the
    /// header lacks a required column. Bytes that are not valid UTF-8 become
    /// replacement characters in their cell; the row itself is kept.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<ParseResult> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let mut rows = csv_reader
            .byte_records()
            .map(|row| row.map(csv::StringRecord::from_byte_record_lossy));
        let mut stats = ParseStats::new();

        // Blank lines ahead of the header are skipped like any other blank line
        let headers = loop {
            match rows.next() {
                Some(row) => {
                    let row = row
                        .map_err(|e| Error::csv_parsing("Failed to read CSV header", Some(e)))?;
                    if is_blank(&row) {
                        stats.blank_lines_skipped += 1;
                        continue;
                    }
                    break row;
                }
                None => {
                    warn!("Input contains no header row");
                    return Err(Error::EmptyInput);
                }
            }
        };

        let mapping = ColumnMapping::analyze(&headers).inspect_err(|_| {
            warn!(
                "CSV headers missing required columns. Found headers: {}",
                headers.iter().collect::<Vec<_>>().join(",")
            );
        })?;
        let required_width = mapping.required_width();
        debug!("Resolved column mapping: {:?}", mapping);

        let mut records = Vec::new();

        for row in rows {
            let row = row.map_err(|e| {
                Error::csv_parsing(
                    format!("Failed to read data row {}", stats.data_rows + 1),
                    Some(e),
                )
            })?;

            if is_blank(&row) {
                stats.blank_lines_skipped += 1;
                continue;
            }

            stats.data_rows += 1;
            if row.len() < required_width {
                stats.ragged_rows += 1;
                warn!(
                    "Row {} has {} of {} columns, padding with empty values",
                    stats.data_rows,
                    row.len(),
                    required_width
                );
            }

            records.push(build_record(&row, &mapping));
        }

        info!("{}", stats.summary());
        Ok(ParseResult::new(records, stats))
    }
}

/// A line holding nothing but whitespace
fn is_blank(row: &csv::StringRecord) -> bool {
    row.len() <= 1 && row.get(0).is_none_or(|cell| cell.trim().is_empty())
}

fn build_record(row: &csv::StringRecord, mapping: &ColumnMapping) -> PriceRecord {
    let cell = |index: usize| row.get(index).map(str::trim).unwrap_or_default();

    PriceRecord::new(
        cell(mapping.instrument_guid),
        cell(mapping.trade_date),
        cell(mapping.price),
        cell(mapping.exchange),
        cell(mapping.product_type),
    )
}
