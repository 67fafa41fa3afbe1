use serde::Serialize;
use serde_json::Value;

use super::Payload;
use crate::amount::parse_positive_amount;
use crate::catalog::CatalogCode;
use crate::error::ValidationError;
use crate::validation::{bound_length, require_non_empty};

const AMOUNT: &str = "Amount";
const REMARKS: &str = "Remarks";
const ORDER_ID: &str = "OrderId";

/// Longest accepted refund remark, in characters.
pub const REMARKS_MAX_LENGTH: usize = 200;

/// Builder for a [`RefundRequest`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct RefundRequestBuilder {
    fields: Payload,
}

impl RefundRequestBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the amount to refund. The text is sent exactly as given.
    ///
    /// # Errors
    ///
    /// `SE0018` if blank, `SE0002` if not a positive number.
    pub fn refund_amount(mut self, amount: &str) -> Result<Self, ValidationError> {
        parse_positive_amount(amount)?;
        self.fields.insert(AMOUNT.into(), amount.into());
        Ok(self)
    }

    /// Sets the remarks. `None` is sent as JSON `null`.
    ///
    /// # Errors
    ///
    /// `SE0007` if longer than 200 characters.
    pub fn refund_remarks(mut self, remarks: Option<&str>) -> Result<Self, ValidationError> {
        bound_length(remarks, REMARKS_MAX_LENGTH, CatalogCode::RemarksTooLong)?;
        self.fields
            .insert(REMARKS.into(), remarks.map_or(Value::Null, Value::from));
        Ok(self)
    }

    /// Sets the gateway order identifier.
    ///
    /// # Errors
    ///
    /// `SE0006` if blank.
    pub fn order_id(mut self, order_id: &str) -> Result<Self, ValidationError> {
        require_non_empty(Some(order_id), CatalogCode::OrderIdRequired)?;
        self.fields.insert(ORDER_ID.into(), order_id.into());
        Ok(self)
    }

    /// Finishes the request.
    pub fn build(self) -> RefundRequest {
        RefundRequest {
            fields: self.fields,
        }
    }
}

/// A validated refund request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RefundRequest {
    fields: Payload,
}

impl RefundRequest {
    /// Starts a new request.
    pub fn builder() -> RefundRequestBuilder {
        RefundRequestBuilder::new()
    }

    /// Returns the refund amount text.
    #[must_use]
    pub fn refund_amount(&self) -> Option<&str> {
        self.fields.get(AMOUNT).and_then(Value::as_str)
    }

    /// Returns the remarks; `None` when unset or explicitly null.
    #[must_use]
    pub fn refund_remarks(&self) -> Option<&str> {
        self.fields.get(REMARKS).and_then(Value::as_str)
    }

    /// Returns the order identifier.
    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        self.fields.get(ORDER_ID).and_then(Value::as_str)
    }

    /// Returns `true` if no field was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the accumulated fields.
    #[must_use]
    pub fn to_payload(&self) -> Payload {
        self.fields.clone()
    }

    /// Consumes the request, returning its fields.
    #[must_use]
    pub fn into_payload(self) -> Payload {
        self.fields
    }

    /// Renders the fields as pretty-printed JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.fields).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_full_refund() {
        let request = RefundRequest::builder()
            .refund_amount("75.25")
            .unwrap()
            .refund_remarks(Some("Damaged item"))
            .unwrap()
            .order_id("8a1f0c2e-55b1-4c55-9d1c-3e7f6a1b2c3d")
            .unwrap()
            .build();
        assert_eq!(request.refund_amount(), Some("75.25"));
        assert_eq!(request.refund_remarks(), Some("Damaged item"));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "Amount": "75.25",
                "Remarks": "Damaged item",
                "OrderId": "8a1f0c2e-55b1-4c55-9d1c-3e7f6a1b2c3d",
            })
        );
    }

    #[test]
    fn test_null_remarks_are_kept() {
        let request = RefundRequest::builder()
            .refund_remarks(None)
            .unwrap()
            .build();
        assert_eq!(request.refund_remarks(), None);
        assert_eq!(request.to_payload().get("Remarks"), Some(&Value::Null));
    }

    #[test]
    fn test_remarks_limit() {
        assert!(
            RefundRequest::builder()
                .refund_remarks(Some(&"r".repeat(200)))
                .is_ok()
        );
        let err = RefundRequest::builder()
            .refund_remarks(Some(&"r".repeat(201)))
            .unwrap_err();
        assert_eq!(err.code(), CatalogCode::RemarksTooLong);
    }

    #[test]
    fn test_amount_and_order_id_checks() {
        let err = RefundRequest::builder().refund_amount("0").unwrap_err();
        assert_eq!(err.code(), CatalogCode::AmountNotPositive);
        let err = RefundRequest::builder().refund_amount(" ").unwrap_err();
        assert_eq!(err.code(), CatalogCode::AmountRequired);
        let err = RefundRequest::builder().order_id("").unwrap_err();
        assert_eq!(err.code(), CatalogCode::OrderIdRequired);
    }

    #[test]
    fn test_to_json_is_pretty() {
        let request = RefundRequest::builder()
            .order_id("ORD-1")
            .unwrap()
            .build();
        assert_eq!(request.to_json(), "{\n  \"OrderId\": \"ORD-1\"\n}");
        assert_eq!(RefundRequest::default().to_json(), "{}");
    }
}
