//! Environment and endpoint resolution.
//!
//! Maps a deployment [`Environment`] to the gateway base URL and a logical
//! operation name to the API version sent in the `x-version` header.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidEnvironment;

/// Sandbox base URL, used for [`Environment::Dev`].
pub const SANDBOX_URL: &str = "https://cdgw048sli.execute-api.ap-south-1.amazonaws.com/dev/";

/// UAT base URL.
pub const UAT_URL: &str = "https://api.uat.auropay.net/";

/// Production base URL.
pub const PRODUCTION_URL: &str = "https://secure-api.auropay.net/";

/// API version used for every operation without an explicit mapping.
pub const DEFAULT_API_VERSION: &str = "1.0";

/// Operation name to API version.
static API_VERSIONS: &[(&str, &str)] = &[
    ("paymentlink", "1.0"),
    ("paymentqrcodes", "1.0"),
    ("refunds", "1.0"),
    ("statusbyrefid", "1.0"),
    ("statusbytransid", "1.0"),
];

/// Deployment tier of the gateway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    /// Sandbox.
    #[default]
    Dev,
    /// User acceptance testing.
    Uat,
    /// Production.
    Prod,
}

impl Environment {
    /// Returns the environment token (`"DEV"`, `"UAT"` or `"PROD"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "DEV",
            Self::Uat => "UAT",
            Self::Prod => "PROD",
        }
    }

    /// Returns the base URL for this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        resolve_base_url(self)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses an environment token. Matching is exact and case-sensitive.
impl FromStr for Environment {
    type Err = InvalidEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEV" => Ok(Self::Dev),
            "UAT" => Ok(Self::Uat),
            "PROD" => Ok(Self::Prod),
            other => Err(InvalidEnvironment {
                token: other.to_owned(),
            }),
        }
    }
}

/// Returns the base URL for `environment`.
#[must_use]
pub const fn resolve_base_url(environment: Environment) -> &'static str {
    match environment {
        Environment::Prod => PRODUCTION_URL,
        Environment::Uat => UAT_URL,
        Environment::Dev => SANDBOX_URL,
    }
}

/// Returns the API version for an operation name.
///
/// Unknown names fall back to [`DEFAULT_API_VERSION`].
#[must_use]
pub fn resolve_api_version(operation: &str) -> &'static str {
    API_VERSIONS
        .iter()
        .find(|(name, _)| *name == operation)
        .map_or(DEFAULT_API_VERSION, |&(_, version)| version)
}

/// HTTP method used by an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`, payload as query parameters.
    Get,
    /// `POST`, payload as a JSON body.
    Post,
}

impl Method {
    /// Returns the method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five logical gateway operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `POST api/paymentlinks`
    CreatePaymentLink,
    /// `POST api/paymentqrcodes`
    CreatePaymentQrCode,
    /// `POST api/refunds`
    CreateRefund,
    /// `GET api/payments/refno/{referenceId}`
    StatusByReferenceId,
    /// `GET api/payments/{transactionId}`
    StatusByTransactionId,
}

impl Operation {
    /// Every operation.
    pub const ALL: [Self; 5] = [
        Self::CreatePaymentLink,
        Self::CreatePaymentQrCode,
        Self::CreateRefund,
        Self::StatusByReferenceId,
        Self::StatusByTransactionId,
    ];

    /// Returns the name used for API version lookup.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreatePaymentLink => "paymentlink",
            Self::CreatePaymentQrCode => "paymentqrcodes",
            Self::CreateRefund => "refunds",
            Self::StatusByReferenceId => "statusbyrefid",
            Self::StatusByTransactionId => "statusbytransid",
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::CreatePaymentLink | Self::CreatePaymentQrCode | Self::CreateRefund => {
                Method::Post
            }
            Self::StatusByReferenceId | Self::StatusByTransactionId => Method::Get,
        }
    }

    /// Returns the path relative to the base URL.
    ///
    /// Status lookups return the collection prefix; the identifier is
    /// appended as one percent-encoded path segment by the transport.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::CreatePaymentLink => "api/paymentlinks",
            Self::CreatePaymentQrCode => "api/paymentqrcodes",
            Self::CreateRefund => "api/refunds",
            Self::StatusByReferenceId => "api/payments/refno/",
            Self::StatusByTransactionId => "api/payments/",
        }
    }

    /// Returns the API version for this operation.
    #[must_use]
    pub fn api_version(self) -> &'static str {
        resolve_api_version(self.name())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_tokens() {
        assert_eq!("DEV".parse::<Environment>(), Ok(Environment::Dev));
        assert_eq!("UAT".parse::<Environment>(), Ok(Environment::Uat));
        assert_eq!("PROD".parse::<Environment>(), Ok(Environment::Prod));
    }

    #[test]
    fn test_environment_rejects_other_tokens() {
        for token in ["", "dev", "Prod", "STAGING", " DEV"] {
            let err = token.parse::<Environment>().unwrap_err();
            assert_eq!(err.token, token);
        }
    }

    #[test]
    fn test_resolve_base_url() {
        assert_eq!(resolve_base_url(Environment::Prod), PRODUCTION_URL);
        assert_eq!(resolve_base_url(Environment::Uat), UAT_URL);
        assert_eq!(resolve_base_url(Environment::Dev), SANDBOX_URL);
        assert_eq!(Environment::default().base_url(), SANDBOX_URL);
    }

    #[test]
    fn test_base_urls_parse() {
        for env in [Environment::Dev, Environment::Uat, Environment::Prod] {
            let url = url::Url::parse(env.base_url()).unwrap();
            assert_eq!(url.scheme(), "https");
            assert!(url.path().ends_with('/'));
        }
    }

    #[test]
    fn test_known_operations_are_version_one() {
        for op in Operation::ALL {
            assert_eq!(op.api_version(), "1.0");
        }
        for name in [
            "paymentlink",
            "paymentqrcodes",
            "refunds",
            "statusbyrefid",
            "statusbytransid",
        ] {
            assert_eq!(resolve_api_version(name), "1.0");
        }
    }

    #[test]
    fn test_unknown_operation_falls_back() {
        assert_eq!(resolve_api_version("subscriptions"), DEFAULT_API_VERSION);
        assert_eq!(resolve_api_version(""), DEFAULT_API_VERSION);
    }

    #[test]
    fn test_operation_routes() {
        assert_eq!(
            Operation::CreatePaymentLink.to_string(),
            "POST api/paymentlinks"
        );
        assert_eq!(
            Operation::StatusByReferenceId.to_string(),
            "GET api/payments/refno/"
        );
        assert_eq!(Operation::CreateRefund.method(), Method::Post);
        assert_eq!(Operation::StatusByTransactionId.method(), Method::Get);
    }

    #[test]
    fn test_environment_serde() {
        assert_eq!(serde_json::to_string(&Environment::Uat).unwrap(), "\"UAT\"");
        let env: Environment = serde_json::from_str("\"PROD\"").unwrap();
        assert_eq!(env, Environment::Prod);
    }
}
