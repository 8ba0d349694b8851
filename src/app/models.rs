//! Data models for price validation
//!
//! This module contains the raw price submission record, the per-record
//! validation outcome, and the partial update used by edit workflows.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Price Record
// =============================================================================

/// One submitted price observation, exactly as received
///
/// All five fields are raw text. Nothing is coerced or normalized here; the
/// validator decides what each value means and the duplicate detector compares
/// the values byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    /// Instrument identifier, expected to be an integer literal
    #[serde(default, alias = "instrument_guid", deserialize_with = "null_as_empty")]
    pub instrument_guid: String,

    /// Trade date, expected in the canonical date pattern
    #[serde(default, alias = "trade_date", deserialize_with = "null_as_empty")]
    pub trade_date: String,

    /// Price, expected to be an exact positive decimal
    #[serde(default, deserialize_with = "null_as_empty")]
    pub price: String,

    /// Exchange code (e.g. "CME")
    #[serde(default, deserialize_with = "null_as_empty")]
    pub exchange: String,

    /// Product type code (e.g. "FUT")
    #[serde(default, alias = "product_type", deserialize_with = "null_as_empty")]
    pub product_type: String,
}

impl PriceRecord {
    /// Create a record from its five raw field values
    pub fn new(
        instrument_guid: impl Into<String>,
        trade_date: impl Into<String>,
        price: impl Into<String>,
        exchange: impl Into<String>,
        product_type: impl Into<String>,
    ) -> Self {
        Self {
            instrument_guid: instrument_guid.into(),
            trade_date: trade_date.into(),
            price: price.into(),
            exchange: exchange.into(),
            product_type: product_type.into(),
        }
    }

    /// Copy of this record with every field present in `patch` overwritten
    pub fn with_patch(&self, patch: &RecordPatch) -> Self {
        let pick = |update: &Option<String>, current: &String| {
            update.clone().unwrap_or_else(|| current.clone())
        };

        Self {
            instrument_guid: pick(&patch.instrument_guid, &self.instrument_guid),
            trade_date: pick(&patch.trade_date, &self.trade_date),
            price: pick(&patch.price, &self.price),
            exchange: pick(&patch.exchange, &self.exchange),
            product_type: pick(&patch.product_type, &self.product_type),
        }
    }

    /// Field values in fixed order: guid, trade date, price, exchange, product type
    pub fn fields(&self) -> [&str; 5] {
        [
            self.instrument_guid.as_str(),
            self.trade_date.as_str(),
            self.price.as_str(),
            self.exchange.as_str(),
            self.product_type.as_str(),
        ]
    }
}

/// Treat an explicit JSON `null` like an absent value
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Record Patch
// =============================================================================

/// Partial update applied to a stored record before re-validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    #[serde(default, alias = "instrument_guid")]
    pub instrument_guid: Option<String>,
    #[serde(default, alias = "trade_date")]
    pub trade_date: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default, alias = "product_type")]
    pub product_type: Option<String>,
}

impl RecordPatch {
    /// True when the patch overrides nothing
    pub fn is_empty(&self) -> bool {
        self.instrument_guid.is_none()
            && self.trade_date.is_none()
            && self.price.is_none()
            && self.exchange.is_none()
            && self.product_type.is_none()
    }
}

// =============================================================================
// Validation Result
// =============================================================================

/// Outcome of validating one record of a batch
///
/// Straight out of the per-record pass, `valid == errors.is_empty()`. The
/// duplicate pass may later force `valid` to false and append one message, so
/// that equivalence is not guaranteed on a finalized batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// 1-based position of the record within its batch
    #[serde(rename = "rowNumber")]
    pub row_number: usize,

    /// The record as received
    pub record: PriceRecord,

    /// Whether the record passed every check
    pub valid: bool,

    /// Messages in rule evaluation order, duplicate findings last
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Build a per-record outcome; validity follows from the messages
    pub fn from_errors(row_number: usize, record: PriceRecord, errors: Vec<String>) -> Self {
        Self {
            row_number,
            record,
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Whether duplicate detection demoted this result
    pub fn is_duplicate(&self) -> bool {
        self.errors
            .iter()
            .any(|message| message.starts_with(crate::constants::DUPLICATE_MESSAGE_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_record_json_aliases_and_nulls() {
        let json = r#"{"instrument_guid": "1001", "tradeDate": "2025-01-10", "price": null, "exchange": "CME"}"#;
        let record: PriceRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.instrument_guid, "1001");
        assert_eq!(record.trade_date, "2025-01-10");
        assert_eq!(record.price, "");
        assert_eq!(record.exchange, "CME");
        assert_eq!(record.product_type, "");
    }

    #[test]
    fn test_price_record_serializes_camel_case() {
        let record = PriceRecord::new("1001", "2025-01-10", "120.50", "CME", "FUT");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["instrumentGuid"], "1001");
        assert_eq!(value["productType"], "FUT");
    }

    #[test]
    fn test_with_patch_overwrites_only_present_fields() {
        let stored = PriceRecord::new("1001", "2025-01-10", "120.50", "CME", "FUT");
        let patch = RecordPatch {
            price: Some("99.99".to_string()),
            exchange: Some("NYMEX".to_string()),
            ..RecordPatch::default()
        };

        let edited = stored.with_patch(&patch);

        assert_eq!(edited.price, "99.99");
        assert_eq!(edited.exchange, "NYMEX");
        assert_eq!(edited.instrument_guid, "1001");
        assert_eq!(stored.price, "120.50");
        assert!(!patch.is_empty());
        assert!(RecordPatch::default().is_empty());
    }

    #[test]
    fn test_validation_result_from_errors() {
        let record = PriceRecord::default();
        let ok = ValidationResult::from_errors(1, record.clone(), Vec::new());
        assert!(ok.valid);

        let bad = ValidationResult::from_errors(2, record, vec!["Missing price at row 2".into()]);
        assert!(!bad.valid);
        assert!(!bad.is_duplicate());
    }
}
