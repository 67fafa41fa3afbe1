use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Payload, text_field};
use crate::catalog::CatalogCode;
use crate::error::ValidationError;
use crate::validation::{EMAIL, NAME, PHONE, bound_length, fail, match_pattern, require_non_empty};

const FIRST_NAME: &str = "firstName";
const LAST_NAME: &str = "lastName";
const PHONE_KEY: &str = "phone";
const EMAIL_KEY: &str = "email";

/// Longest accepted email address, in characters.
pub const EMAIL_MAX_LENGTH: usize = 320;

/// A payer's contact details.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number, 10 to 15 digits.
    pub phone: String,
    /// Email address.
    pub email: String,
}

impl Customer {
    /// Creates a customer.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// Returns the four wire fields with surrounding whitespace removed.
    #[must_use]
    pub fn to_fields(&self) -> Payload {
        let mut fields = Payload::new();
        fields.insert(FIRST_NAME.into(), self.first_name.trim().into());
        fields.insert(LAST_NAME.into(), self.last_name.trim().into());
        fields.insert(PHONE_KEY.into(), self.phone.trim().into());
        fields.insert(EMAIL_KEY.into(), self.email.trim().into());
        fields
    }
}

/// One customer, typed or as a raw JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerInput {
    /// A typed customer; serialized trimmed.
    Typed(Customer),
    /// A raw JSON object; serialized verbatim.
    Raw(Value),
}

impl CustomerInput {
    /// Normalizes to the wire map without validating field contents.
    fn into_fields(self) -> Result<Payload, ValidationError> {
        match self {
            Self::Typed(customer) => Ok(customer.to_fields()),
            Self::Raw(Value::Object(fields)) => Ok(fields),
            Self::Raw(_) => Err(fail(CatalogCode::CustomersInvalid)),
        }
    }
}

impl From<Customer> for CustomerInput {
    fn from(customer: Customer) -> Self {
        Self::Typed(customer)
    }
}

impl From<Value> for CustomerInput {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl From<Payload> for CustomerInput {
    fn from(fields: Payload) -> Self {
        Self::Raw(Value::Object(fields))
    }
}

/// A single customer or a list of customers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Customers {
    /// Exactly one customer; normalized to a one-element list.
    One(CustomerInput),
    /// Any number of customers.
    Many(Vec<CustomerInput>),
}

impl Customers {
    /// Normalizes and validates every customer, in order.
    ///
    /// # Errors
    ///
    /// Returns `SE0032` for an empty list or a non-object entry, otherwise
    /// the first field check that fails (see [`validate_customer`]).
    pub fn into_validated(self) -> Result<Vec<Value>, ValidationError> {
        let inputs = match self {
            Self::One(input) => vec![input],
            Self::Many(inputs) => inputs,
        };
        if inputs.is_empty() {
            return Err(fail(CatalogCode::CustomersInvalid));
        }
        inputs
            .into_iter()
            .map(|input| {
                let fields = input.into_fields()?;
                validate_customer(&fields)?;
                Ok(Value::Object(fields))
            })
            .collect()
    }
}

impl From<Customer> for Customers {
    fn from(customer: Customer) -> Self {
        Self::One(customer.into())
    }
}

impl From<CustomerInput> for Customers {
    fn from(input: CustomerInput) -> Self {
        Self::One(input)
    }
}

impl From<Payload> for Customers {
    fn from(fields: Payload) -> Self {
        Self::One(fields.into())
    }
}

impl From<Vec<Customer>> for Customers {
    fn from(customers: Vec<Customer>) -> Self {
        Self::Many(customers.into_iter().map(CustomerInput::from).collect())
    }
}

impl From<Vec<CustomerInput>> for Customers {
    fn from(inputs: Vec<CustomerInput>) -> Self {
        Self::Many(inputs)
    }
}

/// A JSON array is a list of raw customers; anything else is one raw customer.
impl From<Value> for Customers {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Many(items.into_iter().map(CustomerInput::Raw).collect()),
            other => Self::One(CustomerInput::Raw(other)),
        }
    }
}

/// Validates one customer's wire fields.
///
/// Checks run in order: first name present, first name shape, last name
/// present, last name shape, phone present, phone shape, email present,
/// email length, email shape.
///
/// # Errors
///
/// Returns the first failing check.
pub fn validate_customer(fields: &Payload) -> Result<(), ValidationError> {
    let first_name = text_field(fields, FIRST_NAME);
    require_non_empty(first_name.as_deref(), CatalogCode::FirstNameRequired)?;
    match_pattern(
        first_name.as_deref().unwrap_or_default(),
        &NAME,
        CatalogCode::FirstNameInvalid,
    )?;

    let last_name = text_field(fields, LAST_NAME);
    require_non_empty(last_name.as_deref(), CatalogCode::LastNameRequired)?;
    match_pattern(
        last_name.as_deref().unwrap_or_default(),
        &NAME,
        CatalogCode::LastNameInvalid,
    )?;

    let phone = text_field(fields, PHONE_KEY);
    require_non_empty(phone.as_deref(), CatalogCode::PhoneRequired)?;
    match_pattern(
        phone.as_deref().unwrap_or_default(),
        &PHONE,
        CatalogCode::PhoneInvalid,
    )?;

    let email = text_field(fields, EMAIL_KEY);
    require_non_empty(email.as_deref(), CatalogCode::EmailRequired)?;
    bound_length(email.as_deref(), EMAIL_MAX_LENGTH, CatalogCode::EmailTooLong)?;
    match_pattern(
        email.as_deref().unwrap_or_default(),
        &EMAIL,
        CatalogCode::EmailInvalid,
    )?;

    Ok(())
}
