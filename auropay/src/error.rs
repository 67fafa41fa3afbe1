//! Error types shared by request construction and transport.
//!
//! Two families exist:
//!
//! - [`ValidationError`] is raised while a request is being built, before
//!   any network I/O happens. It always carries a [`CatalogCode`].
//! - [`StructuredError`] is the uniform `{error_code, message}` value every
//!   failure path is normalized into. Validation errors convert into it
//!   losslessly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogCode;

/// A pre-flight validation failure for a single request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{}", .code.message())]
pub struct ValidationError {
    code: CatalogCode,
}

impl ValidationError {
    /// Creates a validation error for the given catalog code.
    #[must_use]
    pub const fn new(code: CatalogCode) -> Self {
        Self { code }
    }

    /// Returns the catalog code.
    #[must_use]
    pub const fn code(&self) -> CatalogCode {
        self.code
    }

    /// Returns the catalog message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.code.message()
    }
}

impl From<CatalogCode> for ValidationError {
    fn from(code: CatalogCode) -> Self {
        Self::new(code)
    }
}

/// The `error_code` half of a [`StructuredError`].
///
/// Catalog and configuration errors use symbolic string codes (`"SE0003"`,
/// `"400"`); transport faults use the numeric HTTP status, or `0` when no
/// response was received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    /// Numeric fault code.
    Status(u16),
    /// Symbolic code.
    Code(String),
}

impl ErrorCode {
    /// Code used for faults that never produced an HTTP response.
    pub const NO_RESPONSE: Self = Self::Status(0);

    /// Returns the numeric code, if this is one.
    #[must_use]
    pub const fn as_status(&self) -> Option<u16> {
        match self {
            Self::Status(status) => Some(*status),
            Self::Code(_) => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "{status}"),
            Self::Code(code) => f.write_str(code),
        }
    }
}

impl From<CatalogCode> for ErrorCode {
    fn from(code: CatalogCode) -> Self {
        Self::Code(code.as_str().to_owned())
    }
}

/// The uniform `{error_code, message}` failure value.
///
/// Serializes to exactly those two keys, so callers can branch on
/// `error_code` without matching on message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message} (error code {error_code})")]
pub struct StructuredError {
    /// Machine-readable code.
    pub error_code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

impl StructuredError {
    /// Creates a structured error from its parts.
    #[must_use]
    pub fn new(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_code,
            message: message.into(),
        }
    }

    /// Returns `true` if this error came from the client-side catalog.
    #[must_use]
    pub fn is_catalog_error(&self) -> bool {
        match &self.error_code {
            ErrorCode::Code(code) => code.parse::<CatalogCode>().is_ok(),
            ErrorCode::Status(_) => false,
        }
    }

    /// Renders the error as pretty-printed JSON.
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        // Two plain fields; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_string())
    }
}

impl From<ValidationError> for StructuredError {
    fn from(err: ValidationError) -> Self {
        Self::new(err.code.into(), err.message())
    }
}

impl From<CatalogCode> for StructuredError {
    fn from(code: CatalogCode) -> Self {
        ValidationError::new(code).into()
    }
}

/// The configured environment token is not one of `DEV`, `UAT`, `PROD`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Invalid or missing value for the client environment. It should be 'DEV', 'UAT', or 'PROD'."
)]
pub struct InvalidEnvironment {
    /// The rejected token.
    pub token: String,
}

impl InvalidEnvironment {
    /// Error code reported for a rejected environment.
    pub const ERROR_CODE: &'static str = "400";
}

impl From<InvalidEnvironment> for StructuredError {
    fn from(err: InvalidEnvironment) -> Self {
        Self::new(
            ErrorCode::Code(InvalidEnvironment::ERROR_CODE.to_owned()),
            err.to_string(),
        )
    }
}
