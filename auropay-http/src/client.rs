//! The high-level Auropay client.
//!
//! [`AuropayClient`] exposes the five gateway operations. Each one runs its
//! pre-flight checks, serializes the request, injects the fixed defaults the
//! gateway expects and delegates to the [`Transport`].

use auropay::catalog::CatalogCode;
use auropay::config::ClientConfig;
use auropay::endpoint::Operation;
use auropay::error::StructuredError;
use auropay::model::{Payload, PaymentRequest, RefundRequest};
use auropay::validation::require_non_empty;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::constants::{ENABLE_PROTECTION_KEY, RESPONSE_TYPE_KEY, USER_TYPE_KEY};
use crate::response::RawBody;
use crate::transport::Transport;

/// Client for the Auropay payment gateway.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// ```no_run
/// use auropay::ClientConfig;
/// use auropay::model::PaymentRequest;
/// use auropay_http::AuropayClient;
///
/// # async fn run() -> Result<(), auropay::StructuredError> {
/// let config = ClientConfig::new("UAT")?
///     .with_access_key("ak_...")
///     .with_secret_key("sk_...");
/// let client = AuropayClient::new(config);
///
/// let request = PaymentRequest::builder()
///     .title("Order 1042")?
///     .amount("249.00")?
///     .build();
/// let response = client.create_payment_link(&request).await?;
/// println!("{response}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AuropayClient {
    transport: Transport,
}

impl AuropayClient {
    /// Creates a client with a default `reqwest` HTTP client.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            transport: Transport::new(config),
        }
    }

    /// Creates a client over a caller-supplied HTTP client, e.g. one with
    /// retry or timeout middleware.
    #[must_use]
    pub fn with_http_client(
        config: ClientConfig,
        http: impl Into<ClientWithMiddleware>,
    ) -> Self {
        Self {
            transport: Transport::with_http_client(config, http),
        }
    }

    /// Creates a client configured from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, StructuredError> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Creates a payment link.
    ///
    /// # Errors
    ///
    /// `SE0016` for a request with no fields, otherwise any transport
    /// error.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "auropay.client.create_payment_link", skip_all)
    )]
    pub async fn create_payment_link(
        &self,
        request: &PaymentRequest,
    ) -> Result<RawBody, StructuredError> {
        if request.is_empty() {
            return Err(CatalogCode::PaymentLinkRequestMissing.into());
        }
        let payload = with_payment_defaults(request.to_payload());
        self.transport
            .execute_operation(Operation::CreatePaymentLink, None, Some(&payload))
            .await
    }

    /// Creates a payment QR code.
    ///
    /// # Errors
    ///
    /// `SE0017` for a request with no fields, otherwise any transport
    /// error.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "auropay.client.create_payment_qr_code", skip_all)
    )]
    pub async fn create_payment_qr_code(
        &self,
        request: &PaymentRequest,
    ) -> Result<RawBody, StructuredError> {
        if request.is_empty() {
            return Err(CatalogCode::PaymentQrCodeRequestMissing.into());
        }
        let payload = with_payment_defaults(request.to_payload());
        self.transport
            .execute_operation(Operation::CreatePaymentQrCode, None, Some(&payload))
            .await
    }

    /// Requests a refund.
    ///
    /// # Errors
    ///
    /// Any transport error.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "auropay.client.create_refund", skip_all)
    )]
    pub async fn create_refund(&self, request: &RefundRequest) -> Result<RawBody, StructuredError> {
        let mut payload = request.to_payload();
        payload.insert(USER_TYPE_KEY.into(), Value::from(1));
        self.transport
            .execute_operation(Operation::CreateRefund, None, Some(&payload))
            .await
    }

    /// Looks up a payment by gateway transaction id.
    ///
    /// # Errors
    ///
    /// `SE0008` for a blank id, otherwise any transport error.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "auropay.client.status_by_transaction_id", skip_all)
    )]
    pub async fn get_payment_status_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<RawBody, StructuredError> {
        require_non_empty(Some(transaction_id), CatalogCode::TransactionIdRequired)?;
        self.transport
            .execute_operation(Operation::StatusByTransactionId, Some(transaction_id), None)
            .await
    }

    /// Looks up a payment by merchant reference id.
    ///
    /// # Errors
    ///
    /// `SE0015` for a blank id, otherwise any transport error.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "auropay.client.status_by_reference_id", skip_all)
    )]
    pub async fn get_payment_status_by_reference_id(
        &self,
        reference_id: &str,
    ) -> Result<RawBody, StructuredError> {
        require_non_empty(Some(reference_id), CatalogCode::ReferenceIdRequired)?;
        self.transport
            .execute_operation(Operation::StatusByReferenceId, Some(reference_id), None)
            .await
    }
}

fn with_payment_defaults(mut payload: Payload) -> Payload {
    payload.insert(RESPONSE_TYPE_KEY.into(), Value::from(1));
    payload.insert(ENABLE_PROTECTION_KEY.into(), Value::Bool(false));
    payload
}
