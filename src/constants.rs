//! Application constants for the pricing validator
//!
//! This module contains the default rule values, recognized column aliases,
//! message fragments and report layout strings used throughout the crate.

// =============================================================================
// Default Business Rules
// =============================================================================

/// Exchanges accepted by default (compared case-insensitively)
pub const DEFAULT_EXCHANGES: &[&str] = &["CME", "NYMEX", "CBOT", "COMEX"];

/// Product types accepted by default (compared case-insensitively)
pub const DEFAULT_PRODUCT_TYPES: &[&str] = &["FUT", "OPT"];

/// Canonical trade date pattern (chrono format syntax)
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Trade date pattern as shown to end users in error messages
pub const DEFAULT_DATE_FORMAT_LABEL: &str = "yyyy-MM-dd";

/// Maximum number of digits allowed after the decimal point of a price
pub const DEFAULT_MAX_PRICE_SCALE: u32 = 2;

/// Default field delimiter for delimited input
pub const DEFAULT_DELIMITER: char = ',';

// =============================================================================
// Column Aliases
// =============================================================================

/// Header aliases per field, matched case-insensitively after trimming
pub mod columns {
    pub const INSTRUMENT_GUID: &[&str] = &["instrumentGuid", "instrument_guid"];
    pub const TRADE_DATE: &[&str] = &["tradeDate", "trade_date"];
    pub const PRICE: &[&str] = &["price"];
    pub const EXCHANGE: &[&str] = &["exchange"];
    pub const PRODUCT_TYPE: &[&str] = &["productType", "product_type"];
}

// =============================================================================
// Message Fragments
// =============================================================================

/// Field names as they appear in per-record error messages
pub mod field_names {
    pub const INSTRUMENT_GUID: &str = "instrument_guid";
    pub const TRADE_DATE: &str = "trade_date";
    pub const PRICE: &str = "price";
    pub const EXCHANGE: &str = "exchange";
    pub const PRODUCT_TYPE: &str = "product_type";
}

/// Prefix of every message appended by duplicate detection
pub const DUPLICATE_MESSAGE_PREFIX: &str = "Duplicate Record of Row";

/// Separator used when building the composite duplicate key
pub const DUPLICATE_KEY_SEPARATOR: char = '|';

// =============================================================================
// Report Layout
// =============================================================================

/// Column header line of the invalid-record detail section
pub const REPORT_DETAIL_HEADER: &str =
    "rowNumber,instrumentGuid,tradeDate,price,exchange,productType,errors";

/// Separator used to join a record's messages in the report detail
pub const REPORT_ERROR_SEPARATOR: &str = ",";

/// Suggested file name for the downloadable report
pub const REPORT_FILE_NAME: &str = "pricing-validation-report.csv";

// =============================================================================
// Configuration Locations
// =============================================================================

/// Directory under the user configuration directory holding the config file
pub const CONFIG_DIR_NAME: &str = "pricing-validator";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the exchange allow-list (comma-separated)
pub const ENV_EXCHANGES: &str = "PRICING_VALIDATOR_EXCHANGES";

/// Environment variable overriding the product type allow-list (comma-separated)
pub const ENV_PRODUCT_TYPES: &str = "PRICING_VALIDATOR_PRODUCT_TYPES";
