//! Raw gateway responses.

use std::fmt;

use http::StatusCode;
use serde::de::DeserializeOwned;

/// Statuses treated as success under every policy.
pub const SUCCESS_STATUSES: [StatusCode; 3] =
    [StatusCode::OK, StatusCode::CREATED, StatusCode::NO_CONTENT];

/// An unparsed response body and the status it arrived with.
///
/// The body is returned exactly as the gateway sent it; the client does not
/// interpret success payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBody {
    status: StatusCode,
    body: String,
}

impl RawBody {
    /// Wraps a response body.
    #[must_use]
    pub const fn new(status: StatusCode, body: String) -> Self {
        Self { status, body }
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the body text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Consumes the response, returning the body text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.body
    }

    /// Returns `true` for `200`, `201` and `204`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        is_success_status(self.status)
    }

    /// Deserializes the body.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

impl fmt::Display for RawBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

/// Returns `true` if `status` is one of [`SUCCESS_STATUSES`].
#[must_use]
pub fn is_success_status(status: StatusCode) -> bool {
    SUCCESS_STATUSES.contains(&status)
}
