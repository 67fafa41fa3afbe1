//! Transport fault normalization.
//!
//! Every way a call can go wrong after validation is reduced to a
//! [`StructuredError`]: error statuses carry their numeric status, faults
//! that never produced a response carry `0`.

use auropay::error::{ErrorCode, StructuredError};
use http::StatusCode;
use http::header::InvalidHeaderValue;
use serde_json::Value;

use crate::constants::DEFAULT_STATUS_MESSAGE;

/// A failure to complete an HTTP exchange.
#[derive(Debug, thiserror::Error)]
pub enum TransportFault {
    /// The request URL could not be built.
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
    /// The base URL cannot carry path segments.
    #[error("Base URL cannot be a base: {0}")]
    CannotBeABase(String),
    /// A configured key is not a valid header value.
    #[error("Invalid value for header {name}")]
    InvalidHeader {
        /// The header name.
        name: &'static str,
        /// The underlying header error.
        #[source]
        source: InvalidHeaderValue,
    },
    /// The payload could not be encoded.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    /// The request failed in the HTTP client or a middleware.
    #[error(transparent)]
    Request(#[from] reqwest_middleware::Error),
    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),
}

impl TransportFault {
    /// Returns the response status attached to the fault, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Request(reqwest_middleware::Error::Reqwest(e)) => e.status(),
            _ => None,
        }
    }
}

impl From<TransportFault> for StructuredError {
    fn from(fault: TransportFault) -> Self {
        let code = fault
            .status()
            .map_or(ErrorCode::NO_RESPONSE, |status| {
                ErrorCode::Status(status.as_u16())
            });
        Self::new(code, fault.to_string())
    }
}

/// Builds the error for a response with a non-success status.
///
/// The message is the body's top-level `message` when it is a non-empty
/// string, otherwise [`DEFAULT_STATUS_MESSAGE`].
#[must_use]
pub fn status_error(status: StatusCode, body: &str) -> StructuredError {
    StructuredError::new(ErrorCode::Status(status.as_u16()), status_message(body))
}

fn status_message(body: &str) -> String {
    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) else {
        return DEFAULT_STATUS_MESSAGE.to_owned();
    };
    match fields.get("message") {
        Some(Value::String(message)) if !message.is_empty() => message.clone(),
        _ => DEFAULT_STATUS_MESSAGE.to_owned(),
    }
}
