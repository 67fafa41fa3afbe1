//! String rendering of call outcomes.
//!
//! Some integrations expect every call to produce a single string: the raw
//! response body on success, or the pretty-printed
//! `{"error_code": .., "message": ..}` object on failure.

use auropay::error::StructuredError;

use crate::response::RawBody;

/// Flattens a call outcome into one string.
#[must_use]
pub fn render(result: Result<RawBody, StructuredError>) -> String {
    match result {
        Ok(body) => body.into_text(),
        Err(err) => err.to_pretty_json(),
    }
}
