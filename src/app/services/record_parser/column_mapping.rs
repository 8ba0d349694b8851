//! Column mapping for price submission headers
//!
//! Locates the five required columns in a header row. Header cells are trimmed
//! and compared case-insensitively against the known aliases of each field, so
//! `tradeDate`, `TRADE_DATE` and ` trade_date ` all resolve to the same column.

use crate::constants::columns;
use crate::{Error, Result};
use csv::StringRecord;

/// Positions of the required columns within a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub instrument_guid: usize,
    pub trade_date: usize,
    pub price: usize,
    pub exchange: usize,
    pub product_type: usize,
}

impl ColumnMapping {
    /// Resolve every required column, failing with the full list of missing ones
    pub fn analyze(headers: &StringRecord) -> Result<Self> {
        let instrument_guid = find_column(headers, columns::INSTRUMENT_GUID);
        let trade_date = find_column(headers, columns::TRADE_DATE);
        let price = find_column(headers, columns::PRICE);
        let exchange = find_column(headers, columns::EXCHANGE);
        let product_type = find_column(headers, columns::PRODUCT_TYPE);

        match (instrument_guid, trade_date, price, exchange, product_type) {
            (Some(instrument_guid), Some(trade_date), Some(price), Some(exchange), Some(product_type)) => {
                Ok(Self {
                    instrument_guid,
                    trade_date,
                    price,
                    exchange,
                    product_type,
                })
            }
            _ => {
                let missing = [
                    (instrument_guid, columns::INSTRUMENT_GUID[0]),
                    (trade_date, columns::TRADE_DATE[0]),
                    (price, columns::PRICE[0]),
                    (exchange, columns::EXCHANGE[0]),
                    (product_type, columns::PRODUCT_TYPE[0]),
                ]
                .into_iter()
                .filter(|(index, _)| index.is_none())
                .map(|(_, name)| name);

                Err(Error::missing_columns(missing))
            }
        }
    }

    /// Number of cells a row needs so that no required column is defaulted
    pub fn required_width(&self) -> usize {
        [
            self.instrument_guid,
            self.trade_date,
            self.price,
            self.exchange,
            self.product_type,
        ]
        .into_iter()
        .max()
        .map_or(0, |index| index + 1)
    }
}

/// First header position matching any alias, ignoring case, surrounding whitespace
/// and a leading byte-order mark
fn find_column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.trim_start_matches('\u{feff}').trim();
        aliases.iter().any(|alias| header.eq_ignore_ascii_case(alias))
    })
}
