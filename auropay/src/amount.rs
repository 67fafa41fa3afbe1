//! Monetary amount checks.
//!
//! Amounts travel to the gateway exactly as the caller wrote them; this
//! module only decides whether a string is an acceptable amount.
//!
//! Acceptance is decided on the text, so amounts beyond `Decimal`'s
//! 28-digit precision are still checked correctly.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::catalog::CatalogCode;
use crate::error::ValidationError;
use crate::validation::{NUMERIC, fail, require_non_empty};

/// Parses a numeric string in plain (`"100.50"`) or scientific (`"1e3"`)
/// notation. Surrounding whitespace is ignored.
///
/// Returns `None` for text outside the [`NUMERIC`] shape and for values
/// that `Decimal` cannot represent.
#[must_use]
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if !NUMERIC.is_match(trimmed) {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Validates a transaction or refund amount.
///
/// The value must be present (`SE0018`), then numeric and strictly
/// positive (`SE0002`). On success, returns the exact value when it fits
/// in a [`Decimal`].
///
/// # Errors
///
/// Returns the first failing check as a [`ValidationError`].
pub fn parse_positive_amount(value: &str) -> Result<Option<Decimal>, ValidationError> {
    require_non_empty(Some(value), CatalogCode::AmountRequired)?;
    let trimmed = value.trim();
    if !NUMERIC.is_match(trimmed) || !is_positive(trimmed) {
        return Err(fail(CatalogCode::AmountNotPositive));
    }
    Ok(parse_decimal(trimmed))
}

/// Sign and mantissa test on text already known to be [`NUMERIC`].
fn is_positive(numeric: &str) -> bool {
    if numeric.starts_with('-') {
        return false;
    }
    numeric
        .split(['e', 'E'])
        .next()
        .is_some_and(|mantissa| mantissa.bytes().any(|b| matches!(b, b'1'..=b'9')))
}
