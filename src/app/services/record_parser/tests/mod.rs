//! Tests for the record parser module

pub mod column_mapping_tests;

use crate::app::services::record_parser::RecordParser;
use crate::config::ParserConfig;

/// Standard header using the camelCase aliases
pub const CAMEL_HEADER: &str = "instrumentGuid,tradeDate,price,exchange,productType";

/// Create a parser with default settings
pub fn default_parser() -> RecordParser {
    RecordParser::new(ParserConfig::default()).unwrap()
}

/// Build CSV text from a header and data lines
pub fn csv_text(header: &str, lines: &[&str]) -> String {
    let mut text = String::from(header);
    text.push('\n');
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}
