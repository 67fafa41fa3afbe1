//! Client configuration.
//!
//! A [`ClientConfig`] is assembled once, handed to the client at
//! construction and never mutated afterwards.
//!
//! # Environment Variables
//!
//! [`ClientConfig::from_env`] reads:
//!
//! - `AUROPAY_ENVIRONMENT` - `DEV`, `UAT` or `PROD` (default: `DEV`)
//! - `AUROPAY_ACCESS_KEY` - sent as `x-access-key`
//! - `AUROPAY_SECRET_KEY` - sent as `x-secret-key`

use std::env::VarError;
use std::fmt;

use url::Url;

use crate::endpoint::Environment;
use crate::error::{ErrorCode, InvalidEnvironment, StructuredError};

/// Environment variable holding the environment token.
pub const ENV_ENVIRONMENT: &str = "AUROPAY_ENVIRONMENT";

/// Environment variable holding the access key.
pub const ENV_ACCESS_KEY: &str = "AUROPAY_ACCESS_KEY";

/// Environment variable holding the secret key.
pub const ENV_SECRET_KEY: &str = "AUROPAY_SECRET_KEY";

/// How HTTP statuses outside `200`, `201` and `204` are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusPolicy {
    /// `4xx` and `5xx` responses become structured errors; any other
    /// status hands its raw body back unclassified.
    #[default]
    Legacy,
    /// Every status outside `200`, `201` and `204` becomes a structured
    /// error.
    Strict,
}

/// Immutable connection settings for one client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    environment: Environment,
    access_key: Option<String>,
    secret_key: Option<String>,
    base_url: Option<Url>,
    status_policy: StatusPolicy,
}

impl ClientConfig {
    /// Creates a configuration from an environment token.
    ///
    /// # Errors
    ///
    /// Returns a structured `400` error unless `environment` is exactly
    /// `DEV`, `UAT` or `PROD`.
    pub fn new(environment: &str) -> Result<Self, StructuredError> {
        let environment = environment.parse::<Environment>()?;
        Ok(Self::with_environment(environment))
    }

    /// Creates a configuration for a known environment.
    #[must_use]
    pub const fn with_environment(environment: Environment) -> Self {
        Self {
            environment,
            access_key: None,
            secret_key: None,
            base_url: None,
            status_policy: StatusPolicy::Legacy,
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a structured `400` error if `AUROPAY_ENVIRONMENT` is set to
    /// anything other than `DEV`, `UAT` or `PROD`, or if any of the three
    /// variables is not valid UTF-8.
    pub fn from_env() -> Result<Self, StructuredError> {
        Self::from_lookup(|name| std::env::var(name))
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Result<String, VarError>,
    ) -> Result<Self, StructuredError> {
        let environment = match lookup(ENV_ENVIRONMENT) {
            Ok(token) => token.parse::<Environment>()?,
            Err(VarError::NotPresent) => Environment::default(),
            Err(VarError::NotUnicode(_)) => {
                return Err(InvalidEnvironment {
                    token: String::new(),
                }
                .into());
            }
        };
        let mut config = Self::with_environment(environment);
        config.access_key = optional_var(ENV_ACCESS_KEY, lookup(ENV_ACCESS_KEY))?;
        config.secret_key = optional_var(ENV_SECRET_KEY, lookup(ENV_SECRET_KEY))?;
        Ok(config)
    }

    /// Sets the access key sent as `x-access-key`.
    #[must_use]
    pub fn with_access_key(mut self, key: impl Into<String>) -> Self {
        self.access_key = Some(key.into());
        self
    }

    /// Sets the secret key sent as `x-secret-key`.
    #[must_use]
    pub fn with_secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = Some(key.into());
        self
    }

    /// Overrides the environment's base URL, e.g. for a local mock gateway.
    ///
    /// # Errors
    ///
    /// Returns a structured `400` error if `url` does not parse.
    pub fn with_base_url(mut self, url: &str) -> Result<Self, StructuredError> {
        let mut normalized = url.trim_end_matches('/').to_owned();
        normalized.push('/');
        let parsed = Url::parse(&normalized).map_err(|e| {
            StructuredError::new(
                ErrorCode::Code(InvalidEnvironment::ERROR_CODE.to_owned()),
                format!("Invalid base URL: {e}"),
            )
        })?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    /// Sets the non-success status policy.
    #[must_use]
    pub const fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    /// Returns the environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the access key, if configured.
    #[must_use]
    pub fn access_key(&self) -> Option<&str> {
        self.access_key.as_deref()
    }

    /// Returns the secret key, if configured.
    #[must_use]
    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref()
    }

    /// Returns the status policy.
    #[must_use]
    pub const fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    /// Returns the effective base URL: the override if set, otherwise the
    /// environment's URL.
    #[must_use]
    pub fn base_url(&self) -> Url {
        self.base_url.clone().unwrap_or_else(|| {
            Url::parse(self.environment.base_url()).expect("environment base URLs are valid")
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_environment(Environment::default())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("environment", &self.environment)
            .field("has_access_key", &self.access_key.is_some())
            .field("has_secret_key", &self.secret_key.is_some())
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("status_policy", &self.status_policy)
            .finish()
    }
}

fn optional_var(
    name: &str,
    value: Result<String, VarError>,
) -> Result<Option<String>, StructuredError> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(StructuredError::new(
            ErrorCode::Code(InvalidEnvironment::ERROR_CODE.to_owned()),
            format!("{name} is not valid UTF-8."),
        )),
    }
}
