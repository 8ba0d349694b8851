//! Field-level parsing helpers used by the validator
//!
//! Each helper answers one narrow question about a raw value. None of them
//! produce messages; [`FieldValidator`](super::FieldValidator) owns the wording.

use chrono::NaiveDate;

/// True when the value is absent or whitespace only
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// True when the value is a 32-bit signed integer literal (optional sign, digits only)
pub fn is_integer_literal(value: &str) -> bool {
    value.parse::<i32>().is_ok()
}

/// Parse a trade date that is written exactly in `format`
///
/// chrono accepts non-padded fields (`2025-1-5`); formatting the parsed date
/// back and comparing with the input rejects those.
pub fn parse_canonical_date(value: &str, format: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, format).ok()?;
    (date.format(format).to_string() == value).then_some(date)
}

/// Shape of an exact decimal literal, read from its text
///
/// Only sign, zero-ness and scale matter to the price rules, so the literal
/// is never converted to a fixed-width number and cannot overflow or round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLiteral {
    pub negative: bool,
    pub zero: bool,
    /// Fractional digits less the exponent; negative for values like `1.5E3`
    pub scale: i64,
}

impl PriceLiteral {
    /// Strictly greater than zero
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.zero
    }
}

/// Parse an exact decimal price literal of any length
///
/// Plain (`120.50`, `-5`, `.5`, `5.`) and scientific (`1.5E2`, `1e-5`)
/// notation are accepted. Digit-group underscores and whitespace are not.
pub fn parse_price(value: &str) -> Option<PriceLiteral> {
    let (negative, unsigned) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(index) => (&unsigned[..index], parse_exponent(&unsigned[index + 1..])?),
        None => (unsigned, 0),
    };

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mut digits = whole.bytes().chain(fraction.bytes());
    if (whole.is_empty() && fraction.is_empty()) || !digits.all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(PriceLiteral {
        negative,
        zero: whole.bytes().chain(fraction.bytes()).all(|b| b == b'0'),
        scale: fraction.len() as i64 - i64::from(exponent),
    })
}

fn parse_exponent(text: &str) -> Option<i32> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Case-insensitive membership test on the trimmed value
pub fn in_allow_list(value: &str, allowed: &[String]) -> bool {
    let value = value.trim();
    allowed
        .iter()
        .any(|entry| entry.trim().eq_ignore_ascii_case(value))
}

/// Render an allow-list the way messages show it: `[A, B, C]`
pub fn format_allow_list(allowed: &[String]) -> String {
    format!("[{}]", allowed.join(", "))
}
