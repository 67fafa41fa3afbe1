//! Stateless field validation primitives.
//!
//! The primitives know nothing about which field they check: the caller
//! picks the [`CatalogCode`] to raise. Request builders compose them in a
//! fixed order and surface the first failure.
//!
//! The shared patterns are compiled once on first use.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::CatalogCode;
use crate::error::ValidationError;

/// Any character outside ASCII letters, digits and the space.
pub static SPECIAL_CHARS: LazyLock<Regex> = LazyLock::new(|| compile(r"[^a-zA-Z0-9 ]"));

/// A personal name: ASCII letters and ASCII whitespace, 1 to 70 characters.
pub static NAME: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[a-zA-Z \t\n\x0B\x0C\r]{1,70}$"));

/// A phone number: 10 to 15 ASCII digits.
pub static PHONE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{10,15}$"));

/// A simple `local@domain.tld` email address.
pub static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"));

/// An `http`/`https` callback URL.
pub static CALLBACK_URL: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(https?://)(www\.)?[a-zA-Z0-9@:%._+~#?&/=]{2,256}\.[a-z]{2,6}(?-u:\b)([-a-zA-Z0-9@:%._+~#?&/=]*)$",
    )
});

/// A plain or scientific-notation number, e.g. `"100.50"`, `".5"`, `"1e3"`.
pub static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$")
});

/// `DD-MM-YYYY hh:mm:ss`.
pub static EXPIRE_ON: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^([0-9]{2})-([0-9]{2})-([0-9]{4}) ([0-9]{2}):([0-9]{2}):([0-9]{2})$")
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static validation pattern must compile")
}

/// Builds the error for `code`, logging it when telemetry is enabled.
pub(crate) fn fail(code: CatalogCode) -> ValidationError {
    #[cfg(feature = "telemetry")]
    tracing::debug!(code = code.as_str(), "field validation failed");
    ValidationError::new(code)
}

/// Fails if `value` is absent or blank after trimming.
///
/// # Errors
///
/// Returns `code` as a [`ValidationError`] on failure.
pub fn require_non_empty(value: Option<&str>, code: CatalogCode) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(fail(code)),
    }
}

/// Fails if `value` contains a match of the forbidden `pattern`.
///
/// # Errors
///
/// Returns `code` as a [`ValidationError`] on failure.
pub fn reject_pattern(
    value: &str,
    pattern: &Regex,
    code: CatalogCode,
) -> Result<(), ValidationError> {
    if pattern.is_match(value) {
        Err(fail(code))
    } else {
        Ok(())
    }
}

/// Fails if the trimmed character count of `value` exceeds `max`.
///
/// Absent or blank values always pass; presence is checked by
/// [`require_non_empty`].
///
/// # Errors
///
/// Returns `code` as a [`ValidationError`] on failure.
pub fn bound_length(
    value: Option<&str>,
    max: usize,
    code: CatalogCode,
) -> Result<(), ValidationError> {
    let Some(trimmed) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(());
    };
    if trimmed.chars().count() > max {
        Err(fail(code))
    } else {
        Ok(())
    }
}

/// Fails if `value` does not match the required `pattern`.
///
/// # Errors
///
/// Returns `code` as a [`ValidationError`] on failure.
pub fn match_pattern(
    value: &str,
    pattern: &Regex,
    code: CatalogCode,
) -> Result<(), ValidationError> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(fail(code))
    }
}
