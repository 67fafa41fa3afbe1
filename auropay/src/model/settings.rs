use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Payload;
use crate::catalog::CatalogCode;
use crate::error::ValidationError;
use crate::validation::fail;

/// Display options for the hosted payment page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Show the order summary.
    pub display_summary: bool,
}

impl Settings {
    /// Creates settings.
    #[must_use]
    pub const fn new(display_summary: bool) -> Self {
        Self { display_summary }
    }

    /// Returns the wire fields.
    #[must_use]
    pub fn to_fields(&self) -> Payload {
        let mut fields = Payload::new();
        fields.insert("displaySummary".into(), self.display_summary.into());
        fields
    }
}

/// Settings, typed or as a raw JSON value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsInput {
    /// Typed settings.
    Typed(Settings),
    /// A raw JSON value; must be a non-empty object.
    Raw(Value),
}

impl SettingsInput {
    /// Normalizes the settings.
    ///
    /// # Errors
    ///
    /// Returns `SE0033` for a raw value that is not a non-empty object.
    pub fn into_validated(self) -> Result<Payload, ValidationError> {
        match self {
            Self::Typed(settings) => Ok(settings.to_fields()),
            Self::Raw(Value::Object(fields)) if !fields.is_empty() => Ok(fields),
            Self::Raw(_) => Err(fail(CatalogCode::SettingsInvalid)),
        }
    }
}

impl From<Settings> for SettingsInput {
    fn from(settings: Settings) -> Self {
        Self::Typed(settings)
    }
}

impl From<Value> for SettingsInput {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl From<Payload> for SettingsInput {
    fn from(fields: Payload) -> Self {
        Self::Raw(Value::Object(fields))
    }
}
