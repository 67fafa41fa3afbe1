use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use super::{CallbackInput, Customers, Payload, SettingsInput};
use crate::amount::parse_positive_amount;
use crate::catalog::CatalogCode;
use crate::error::ValidationError;
use crate::timestamp::ExpireOn;
use crate::validation::{SPECIAL_CHARS, bound_length, reject_pattern, require_non_empty};

const TITLE: &str = "title";
const AMOUNT: &str = "amount";
const SHORT_DESCRIPTION: &str = "shortDescription";
const PAYMENT_DESCRIPTION: &str = "paymentDescription";
const ENABLE_PARTIAL_PAYMENT: &str = "enablePartialPayment";
const ENABLE_MULTIPLE_PAYMENT: &str = "enableMultiplePayment";
const DISPLAY_RECEIPT: &str = "displayReceipt";
const EXPIRE_ON: &str = "expireOn";
const CUSTOMERS: &str = "Customers";
const CALLBACK_PARAMETERS: &str = "CallbackParameters";
const SETTINGS: &str = "Settings";

/// Longest accepted title, in characters.
pub const TITLE_MAX_LENGTH: usize = 50;

/// Longest accepted short or long description, in characters.
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;

/// Builder for a [`PaymentRequest`].
///
/// Every fallible setter validates its field before storing it, consumes the
/// builder and hands it back on success.
///
/// ```
/// use auropay::model::{Customer, PaymentRequest};
///
/// let request = PaymentRequest::builder()
///     .title("Order 1042")?
///     .amount("249.00")?
///     .customers(Customer::new("Asha", "Rao", "9876543210", "asha@example.com"))?
///     .build();
/// assert_eq!(request.title(), Some("Order 1042"));
/// # Ok::<(), auropay::ValidationError>(())
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct PaymentRequestBuilder {
    fields: Payload,
}

impl PaymentRequestBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    ///
    /// # Errors
    ///
    /// `SE0003` if blank, `SE0020` if it contains special characters,
    /// `SE0019` if longer than 50 characters.
    pub fn title(mut self, title: &str) -> Result<Self, ValidationError> {
        require_non_empty(Some(title), CatalogCode::TitleRequired)?;
        reject_pattern(title, &SPECIAL_CHARS, CatalogCode::TitleSpecialCharacters)?;
        bound_length(Some(title), TITLE_MAX_LENGTH, CatalogCode::TitleTooLong)?;
        self.fields.insert(TITLE.into(), title.trim().into());
        Ok(self)
    }

    /// Sets the amount. The text is sent exactly as given.
    ///
    /// # Errors
    ///
    /// `SE0018` if blank, `SE0002` if not a positive number.
    pub fn amount(mut self, amount: &str) -> Result<Self, ValidationError> {
        parse_positive_amount(amount)?;
        self.fields.insert(AMOUNT.into(), amount.into());
        Ok(self)
    }

    /// Sets the short description.
    ///
    /// # Errors
    ///
    /// `SE0021` if longer than 1000 characters, `SE0022` if it contains
    /// special characters.
    pub fn short_description(mut self, description: &str) -> Result<Self, ValidationError> {
        bound_length(
            Some(description),
            DESCRIPTION_MAX_LENGTH,
            CatalogCode::ShortDescriptionTooLong,
        )?;
        reject_pattern(
            description,
            &SPECIAL_CHARS,
            CatalogCode::ShortDescriptionSpecialCharacters,
        )?;
        self.fields
            .insert(SHORT_DESCRIPTION.into(), description.trim().into());
        Ok(self)
    }

    /// Sets the payment description.
    ///
    /// # Errors
    ///
    /// `SE0004` if longer than 1000 characters, `SE0023` if it contains
    /// special characters.
    pub fn payment_description(mut self, description: &str) -> Result<Self, ValidationError> {
        bound_length(
            Some(description),
            DESCRIPTION_MAX_LENGTH,
            CatalogCode::PaymentDescriptionTooLong,
        )?;
        reject_pattern(
            description,
            &SPECIAL_CHARS,
            CatalogCode::PaymentDescriptionSpecialCharacters,
        )?;
        self.fields
            .insert(PAYMENT_DESCRIPTION.into(), description.trim().into());
        Ok(self)
    }

    /// Allows the payer to settle the amount in parts.
    pub fn enable_partial_payment(mut self, enabled: bool) -> Self {
        self.fields.insert(ENABLE_PARTIAL_PAYMENT.into(), enabled.into());
        self
    }

    /// Allows the link to be paid more than once.
    pub fn enable_multiple_payment(mut self, enabled: bool) -> Self {
        self.fields.insert(ENABLE_MULTIPLE_PAYMENT.into(), enabled.into());
        self
    }

    /// Shows a receipt after payment.
    pub fn display_receipt(mut self, enabled: bool) -> Self {
        self.fields.insert(DISPLAY_RECEIPT.into(), enabled.into());
        self
    }

    /// Sets the expiry as `DD-MM-YYYY hh:mm:ss` UTC text.
    ///
    /// # Errors
    ///
    /// `SE0001` if malformed, `SE0024` if earlier than now.
    pub fn expire_on(mut self, expire_on: &str) -> Result<Self, ValidationError> {
        ExpireOn::parse_future(expire_on)?;
        self.fields.insert(EXPIRE_ON.into(), expire_on.into());
        Ok(self)
    }

    /// Sets the expiry from a moment, formatted in UTC.
    ///
    /// # Errors
    ///
    /// `SE0024` if earlier than now.
    pub fn expire_at(self, moment: OffsetDateTime) -> Result<Self, ValidationError> {
        self.expire_on(&ExpireOn::format(moment))
    }

    /// Sets the customers. A single customer becomes a one-element list.
    ///
    /// # Errors
    ///
    /// See [`Customers::into_validated`].
    pub fn customers(mut self, customers: impl Into<Customers>) -> Result<Self, ValidationError> {
        let list = customers.into().into_validated()?;
        self.fields.insert(CUSTOMERS.into(), Value::Array(list));
        Ok(self)
    }

    /// Sets the callback parameters.
    ///
    /// # Errors
    ///
    /// See [`CallbackInput::into_validated`].
    pub fn callback_parameters(
        mut self,
        callback: impl Into<CallbackInput>,
    ) -> Result<Self, ValidationError> {
        let fields = callback.into().into_validated()?;
        self.fields
            .insert(CALLBACK_PARAMETERS.into(), Value::Object(fields));
        Ok(self)
    }

    /// Sets the display settings.
    ///
    /// # Errors
    ///
    /// `SE0033` for a raw value that is not a non-empty object.
    pub fn settings(mut self, settings: impl Into<SettingsInput>) -> Result<Self, ValidationError> {
        let fields = settings.into().into_validated()?;
        self.fields.insert(SETTINGS.into(), Value::Object(fields));
        Ok(self)
    }

    /// Finishes the request.
    pub fn build(self) -> PaymentRequest {
        PaymentRequest {
            fields: self.fields,
        }
    }
}

/// A validated payment-link or QR-code request.
///
/// Serializes to its payload: only the fields that were set, in the order
/// they were set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PaymentRequest {
    fields: Payload,
}

impl PaymentRequest {
    /// Starts a new request.
    pub fn builder() -> PaymentRequestBuilder {
        PaymentRequestBuilder::new()
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.text(TITLE)
    }

    /// Returns the amount text.
    #[must_use]
    pub fn amount(&self) -> Option<&str> {
        self.text(AMOUNT)
    }

    /// Returns the short description.
    #[must_use]
    pub fn short_description(&self) -> Option<&str> {
        self.text(SHORT_DESCRIPTION)
    }

    /// Returns the payment description.
    #[must_use]
    pub fn payment_description(&self) -> Option<&str> {
        self.text(PAYMENT_DESCRIPTION)
    }

    /// Returns the expiry text.
    #[must_use]
    pub fn expire_on(&self) -> Option<&str> {
        self.text(EXPIRE_ON)
    }

    /// Returns the partial-payment flag; `false` if unset.
    #[must_use]
    pub fn enable_partial_payment(&self) -> bool {
        self.flag(ENABLE_PARTIAL_PAYMENT)
    }

    /// Returns the multiple-payment flag; `false` if unset.
    #[must_use]
    pub fn enable_multiple_payment(&self) -> bool {
        self.flag(ENABLE_MULTIPLE_PAYMENT)
    }

    /// Returns the receipt flag; `false` if unset.
    #[must_use]
    pub fn display_receipt(&self) -> bool {
        self.flag(DISPLAY_RECEIPT)
    }

    /// Returns the customer list; empty if unset.
    #[must_use]
    pub fn customers(&self) -> &[Value] {
        self.fields
            .get(CUSTOMERS)
            .and_then(Value::as_array)
            .map_or(&[], Vec::as_slice)
    }

    /// Returns the callback parameters.
    #[must_use]
    pub fn callback_parameters(&self) -> Option<&Payload> {
        self.fields.get(CALLBACK_PARAMETERS).and_then(Value::as_object)
    }

    /// Returns the display settings.
    #[must_use]
    pub fn settings(&self) -> Option<&Payload> {
        self.fields.get(SETTINGS).and_then(Value::as_object)
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

    fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    fn flag(&self, key: &str) -> bool {
        self.fields
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::Duration;

    use super::*;
    use crate::model::{CallbackParameters, Customer, Settings};

    fn code_of(result: Result<PaymentRequestBuilder, ValidationError>) -> CatalogCode {
        result.unwrap_err().code()
    }

    #[test]
    fn test_title_limits() {
        let at_limit = "a".repeat(50);
        let request = PaymentRequest::builder().title(&at_limit).unwrap().build();
        assert_eq!(request.title(), Some(at_limit.as_str()));

        assert_eq!(
            code_of(PaymentRequest::builder().title(&"a".repeat(51))),
            CatalogCode::TitleTooLong
        );
        assert_eq!(
            code_of(PaymentRequest::builder().title("Order #1")),
            CatalogCode::TitleSpecialCharacters
        );
        assert_eq!(
            code_of(PaymentRequest::builder().title("   ")),
            CatalogCode::TitleRequired
        );
    }

    #[test]
    fn test_title_special_chars_checked_before_length() {
        let long_and_special = format!("{}#", "a".repeat(60));
        assert_eq!(
            code_of(PaymentRequest::builder().title(&long_and_special)),
            CatalogCode::TitleSpecialCharacters
        );
    }

    #[test]
    fn test_title_is_trimmed() {
        let request = PaymentRequest::builder().title("  Order 7 ").unwrap().build();
        assert_eq!(request.title(), Some("Order 7"));
    }

    #[test]
    fn test_amount() {
        let request = PaymentRequest::builder().amount("100.50").unwrap().build();
        assert_eq!(request.amount(), Some("100.50"));
        assert_eq!(request.to_payload()["amount"], json!("100.50"));

        for amount in ["0", "-5", "ten"] {
            assert_eq!(
                code_of(PaymentRequest::builder().amount(amount)),
                CatalogCode::AmountNotPositive,
                "{amount}"
            );
        }
        assert_eq!(
            code_of(PaymentRequest::builder().amount("")),
            CatalogCode::AmountRequired
        );
    }

    #[test]
    fn test_descriptions() {
        let request = PaymentRequest::builder()
            .short_description(" Two shirts ")
            .unwrap()
            .payment_description("")
            .unwrap()
            .build();
        assert_eq!(request.short_description(), Some("Two shirts"));
        assert_eq!(request.payment_description(), Some(""));

        assert_eq!(
            code_of(PaymentRequest::builder().short_description(&"a".repeat(1001))),
            CatalogCode::ShortDescriptionTooLong
        );
        assert_eq!(
            code_of(PaymentRequest::builder().short_description("50% off")),
            CatalogCode::ShortDescriptionSpecialCharacters
        );
        assert_eq!(
            code_of(PaymentRequest::builder().payment_description(&"a#".repeat(600))),
            CatalogCode::PaymentDescriptionTooLong
        );
        assert_eq!(
            code_of(PaymentRequest::builder().payment_description("a-b")),
            CatalogCode::PaymentDescriptionSpecialCharacters
        );
    }

    #[test]
    fn test_expire_on() {
        let now = OffsetDateTime::now_utc();
        let future = ExpireOn::format(now + Duration::days(2));
        let request = PaymentRequest::builder().expire_on(&future).unwrap().build();
        assert_eq!(request.expire_on(), Some(future.as_str()));

        let past = ExpireOn::format(now - Duration::days(2));
        assert_eq!(
            code_of(PaymentRequest::builder().expire_on(&past)),
            CatalogCode::ExpireOnInPast
        );
        assert_eq!(
            code_of(PaymentRequest::builder().expire_on("2030-01-01 00:00:00")),
            CatalogCode::ExpireOnFormat
        );
        assert_eq!(
            code_of(PaymentRequest::builder().expire_at(now - Duration::hours(1))),
            CatalogCode::ExpireOnInPast
        );
    }

    #[test]
    fn test_flags_default_false() {
        let request = PaymentRequest::builder().build();
        assert!(!request.enable_partial_payment());
        assert!(!request.enable_multiple_payment());
        assert!(!request.display_receipt());
        assert!(request.is_empty());

        let request = PaymentRequest::builder()
            .enable_partial_payment(true)
            .display_receipt(true)
            .build();
        assert!(request.enable_partial_payment());
        assert!(!request.enable_multiple_payment());
        assert!(request.display_receipt());
    }

    #[test]
    fn test_unset_getters() {
        let request = PaymentRequest::builder().build();
        assert_eq!(request.title(), None);
        assert!(request.customers().is_empty());
        assert_eq!(request.callback_parameters(), None);
        assert_eq!(request.settings(), None);
    }

    #[test]
    fn test_payload_keeps_insertion_order_and_keys() {
        let request = PaymentRequest::builder()
            .amount("249.00")
            .unwrap()
            .title("Order 1042")
            .unwrap()
            .customers(Customer::new("Asha", "Rao", "9876543210", "asha@example.com"))
            .unwrap()
            .callback_parameters(CallbackParameters::new("https://shop.example.com/cb"))
            .unwrap()
            .settings(Settings::new(true))
            .unwrap()
            .build();

        let payload = request.to_payload();
        let keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["amount", "title", "Customers", "CallbackParameters", "Settings"]
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "amount": "249.00",
                "title": "Order 1042",
                "Customers": [{
                    "firstName": "Asha",
                    "lastName": "Rao",
                    "phone": "9876543210",
                    "email": "asha@example.com",
                }],
                "CallbackParameters": { "callbackApiUrl": "https://shop.example.com/cb" },
                "Settings": { "displaySummary": true },
            })
        );
        assert_eq!(request.customers().len(), 1);
    }

    #[test]
    fn test_failed_setter_leaves_no_field() {
        let builder = PaymentRequest::builder().title("Order 1").unwrap();
        let kept = builder.clone();
        assert!(builder.amount("-1").is_err());
        let request = kept.build();
        assert_eq!(request.amount(), None);
        assert_eq!(request.to_payload().len(), 1);
    }
}
