//! Already-structured batch input
//!
//! Callers that hold records as JSON (an array of objects keyed by the five
//! field names, camelCase or snake_case) skip the tabular reader entirely.
//! Array order becomes row order.

use crate::app::models::PriceRecord;
use crate::{Error, Result};
use tracing::info;

/// Decode a JSON array of price records
pub fn parse_json_records(content: &str) -> Result<Vec<PriceRecord>> {
    let records: Vec<PriceRecord> = serde_json::from_str(content)
        .map_err(|e| Error::structured_input("Expected a JSON array of price records", e))?;

    info!("Decoded {} structured records", records.len());
    Ok(records)
}
