use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Payload, text_field};
use crate::catalog::CatalogCode;
use crate::error::ValidationError;
use crate::validation::{CALLBACK_URL, bound_length, fail, match_pattern, require_non_empty};

const CALLBACK_API_URL: &str = "callbackApiUrl";
const REFERENCE_NO: &str = "referenceNo";

/// Longest accepted callback URL, in characters.
pub const CALLBACK_URL_MAX_LENGTH: usize = 2048;

/// Longest accepted callback reference number, in characters.
pub const REFERENCE_NO_MAX_LENGTH: usize = 50;

/// Where the gateway reports payment outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackParameters {
    /// `http` or `https` URL the gateway calls back.
    pub callback_api_url: String,
    /// Merchant reference echoed in the callback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_no: Option<String>,
}

impl CallbackParameters {
    /// Creates callback parameters without a reference number.
    #[must_use]
    pub fn new(callback_api_url: impl Into<String>) -> Self {
        Self {
            callback_api_url: callback_api_url.into(),
            reference_no: None,
        }
    }

    /// Sets the reference number.
    #[must_use]
    pub fn with_reference_no(mut self, reference_no: impl Into<String>) -> Self {
        self.reference_no = Some(reference_no.into());
        self
    }

    /// Returns the wire fields with surrounding whitespace removed.
    #[must_use]
    pub fn to_fields(&self) -> Payload {
        let mut fields = Payload::new();
        fields.insert(CALLBACK_API_URL.into(), self.callback_api_url.trim().into());
        if let Some(reference_no) = &self.reference_no {
            fields.insert(REFERENCE_NO.into(), reference_no.trim().into());
        }
        fields
    }
}

/// Callback parameters, typed or as a raw JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackInput {
    /// Typed parameters; serialized trimmed.
    Typed(CallbackParameters),
    /// A raw JSON object; serialized verbatim.
    Raw(Value),
}

impl CallbackInput {
    /// Normalizes and validates the parameters.
    ///
    /// Checks run in order: non-empty object (`SE0005`), URL present
    /// (`SE0031`), URL shape (`SE0014`), URL length (`SE0030`), reference
    /// number length (`SE0029`).
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    pub fn into_validated(self) -> Result<Payload, ValidationError> {
        let fields = match self {
            Self::Typed(params) => params.to_fields(),
            Self::Raw(Value::Object(fields)) if !fields.is_empty() => fields,
            Self::Raw(_) => return Err(fail(CatalogCode::CallbackParametersMissing)),
        };

        let url = text_field(&fields, CALLBACK_API_URL);
        require_non_empty(url.as_deref(), CatalogCode::CallbackUrlRequired)?;
        match_pattern(
            url.as_deref().unwrap_or_default(),
            &CALLBACK_URL,
            CatalogCode::CallbackUrlInvalid,
        )?;
        bound_length(
            url.as_deref(),
            CALLBACK_URL_MAX_LENGTH,
            CatalogCode::CallbackUrlTooLong,
        )?;
        bound_length(
            text_field(&fields, REFERENCE_NO).as_deref(),
            REFERENCE_NO_MAX_LENGTH,
            CatalogCode::ReferenceNoTooLong,
        )?;

        Ok(fields)
    }
}

impl From<CallbackParameters> for CallbackInput {
    fn from(params: CallbackParameters) -> Self {
        Self::Typed(params)
    }
}

impl From<Value> for CallbackInput {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl From<Payload> for CallbackInput {
    fn from(fields: Payload) -> Self {
        Self::Raw(Value::Object(fields))
    }
}
