//! Validated request models.
//!
//! Requests are assembled with owned builders whose setters validate one
//! field each and fail fast with a [`ValidationError`](crate::ValidationError).
//! A finished request is immutable and serializes to a flat, ordered
//! [`Payload`] containing exactly the fields that were set.
//!
//! Nested values accept either a typed struct or a loosely shaped JSON
//! value through small input enums ([`CustomerInput`], [`CallbackInput`],
//! [`SettingsInput`]); both forms are validated identically.

mod callback;
mod customer;
mod payment;
mod refund;
mod settings;

use std::borrow::Cow;

use serde_json::Value;

pub use callback::{CallbackInput, CallbackParameters};
pub use customer::{Customer, CustomerInput, Customers};
pub use payment::{PaymentRequest, PaymentRequestBuilder};
pub use refund::{RefundRequest, RefundRequestBuilder};
pub use settings::{Settings, SettingsInput};

/// Field name to JSON value, in insertion order.
pub type Payload = serde_json::Map<String, Value>;

/// Reads a textual field from a raw map.
///
/// Numbers are rendered to text; any other JSON type reads as absent.
pub(crate) fn text_field<'a>(fields: &'a Payload, key: &str) -> Option<Cow<'a, str>> {
    match fields.get(key)? {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}
