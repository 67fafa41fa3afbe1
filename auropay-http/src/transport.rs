//! Single-request HTTP transport.
//!
//! [`Transport`] turns `(method, path, operation, payload)` into one HTTP
//! exchange with the gateway and reduces the outcome to either a
//! [`RawBody`] or a [`StructuredError`].
//!
//! - `POST` sends a non-empty payload as a JSON body.
//! - `GET` sends a non-empty payload as query parameters.
//! - `200`, `201` and `204` always succeed with the body untouched.
//! - Other statuses are classified by the configured [`StatusPolicy`].
//!
//! Nothing is retried and no timeout is applied here; an injected
//! [`ClientWithMiddleware`] may carry its own.

use std::borrow::Cow;
#[cfg(feature = "telemetry")]
use std::fmt::Display;

use auropay::config::{ClientConfig, StatusPolicy};
use auropay::endpoint::{Method, Operation, resolve_api_version};
use auropay::error::StructuredError;
use auropay::model::Payload;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use http::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::constants::{ACCESS_KEY_HEADER, APPLICATION_JSON, SECRET_KEY_HEADER, VERSION_HEADER};
use crate::error::{TransportFault, status_error};
use crate::response::{RawBody, is_success_status};

/// Issues authenticated requests against one gateway environment.
#[derive(Clone, Debug)]
pub struct Transport {
    http: ClientWithMiddleware,
    config: ClientConfig,
    base_url: Url,
}

impl Transport {
    /// Creates a transport over a plain `reqwest` client.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Creates a transport over a caller-supplied HTTP client.
    #[must_use]
    pub fn with_http_client(
        config: ClientConfig,
        http: impl Into<ClientWithMiddleware>,
    ) -> Self {
        let base_url = config.base_url();
        Self {
            http: http.into(),
            config,
            base_url,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the resolved base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends one request to `path`, relative to the base URL.
    ///
    /// Leading slashes are ignored, so `/api/refunds` keeps the base URL's
    /// own path prefix. `operation` selects the `x-version` header.
    ///
    /// # Errors
    ///
    /// Returns a [`StructuredError`] for error statuses (per the status
    /// policy) and for faults that produced no response.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        operation: &str,
        payload: Option<&Payload>,
    ) -> Result<RawBody, StructuredError> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(TransportFault::from)?;
        self.send(method, url, operation, payload).await
    }

    /// Sends one request for a known [`Operation`].
    ///
    /// A `segment` is appended to the operation's path as a single
    /// percent-encoded path segment.
    ///
    /// # Errors
    ///
    /// See [`Transport::execute`].
    pub async fn execute_operation(
        &self,
        operation: Operation,
        segment: Option<&str>,
        payload: Option<&Payload>,
    ) -> Result<RawBody, StructuredError> {
        let url = self.operation_url(operation, segment)?;
        self.send(operation.method(), url, operation.name(), payload)
            .await
    }

    fn operation_url(
        &self,
        operation: Operation,
        segment: Option<&str>,
    ) -> Result<Url, TransportFault> {
        let mut url = self.base_url.join(operation.path())?;
        if let Some(segment) = segment {
            url.path_segments_mut()
                .map_err(|()| TransportFault::CannotBeABase(self.base_url.to_string()))?
                .pop_if_empty()
                .push(segment);
        }
        Ok(url)
    }

    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "auropay.transport.execute",
            skip_all,
            fields(
                operation = operation,
                method = method.as_str(),
                path = url.path(),
                http.status_code = tracing::field::Empty,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    async fn send(
        &self,
        method: Method,
        url: Url,
        operation: &str,
        payload: Option<&Payload>,
    ) -> Result<RawBody, StructuredError> {
        let result = self.exchange(method, url, operation, payload).await;
        record_result_on_span(&result);
        result
    }

    async fn exchange(
        &self,
        method: Method,
        mut url: Url,
        operation: &str,
        payload: Option<&Payload>,
    ) -> Result<RawBody, StructuredError> {
        let headers = self.request_headers(operation)?;
        let payload = payload.filter(|p| !p.is_empty());

        let request = match method {
            Method::Get => {
                if let Some(payload) = payload {
                    append_query(&mut url, payload);
                }
                self.http.get(url).headers(headers)
            }
            Method::Post => {
                let request = self.http.post(url).headers(headers);
                match payload {
                    Some(payload) => request
                        .body(serde_json::to_vec(payload).map_err(TransportFault::from)?),
                    None => request,
                }
            }
        };

        let response = request.send().await.map_err(TransportFault::from)?;
        let status = response.status();
        #[cfg(feature = "telemetry")]
        Span::current().record("http.status_code", status.as_u16());
        let body = response.text().await.map_err(TransportFault::BodyRead)?;

        classify(self.config.status_policy(), status, body)
    }

    fn request_headers(&self, operation: &str) -> Result<HeaderMap, TransportFault> {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        if let Some(key) = self.config.access_key() {
            headers.insert(
                HeaderName::from_static(ACCESS_KEY_HEADER),
                sensitive_value(ACCESS_KEY_HEADER, key)?,
            );
        }
        if let Some(key) = self.config.secret_key() {
            headers.insert(
                HeaderName::from_static(SECRET_KEY_HEADER),
                sensitive_value(SECRET_KEY_HEADER, key)?,
            );
        }
        headers.insert(
            HeaderName::from_static(VERSION_HEADER),
            HeaderValue::from_static(resolve_api_version(operation)),
        );
        Ok(headers)
    }
}

fn sensitive_value(name: &'static str, value: &str) -> Result<HeaderValue, TransportFault> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|source| TransportFault::InvalidHeader { name, source })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Appends payload fields as query pairs. `null` fields are skipped and
/// booleans are sent as `1`/`0`.
fn append_query(url: &mut Url, payload: &Payload) {
    let mut pairs = url.query_pairs_mut();
    for (key, value) in payload {
        if let Some(text) = query_text(value) {
            pairs.append_pair(key, &text);
        }
    }
}

fn query_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "1" } else { "0" })),
        other => Some(Cow::Owned(other.to_string())),
    }
}

/// Maps a completed exchange to its outcome under `policy`.
fn classify(
    policy: StatusPolicy,
    status: StatusCode,
    body: String,
) -> Result<RawBody, StructuredError> {
    if is_success_status(status) {
        return Ok(RawBody::new(status, body));
    }
    let is_fault = match policy {
        StatusPolicy::Legacy => status.is_client_error() || status.is_server_error(),
        StatusPolicy::Strict => true,
    };
    if is_fault {
        Err(status_error(status, &body))
    } else {
        Ok(RawBody::new(status, body))
    }
}

/// Records the outcome of a request on the current span.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::WARN, error = %err, "Gateway request failed");
        }
    }
}

/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
const fn record_result_on_span<R, E>(_result: &Result<R, E>) {}

#[cfg(test)]
mod tests {
    use auropay::error::ErrorCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;

    fn transport(server: &MockServer, config: ClientConfig) -> Transport {
        Transport::new(config.with_base_url(&server.uri()).unwrap())
    }

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(fields) => fields,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_post_sends_json_body_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/refunds"))
            .and(header("content-type", "application/json"))
            .and(header("x-access-key", "ak_test"))
            .and(header("x-secret-key", "sk_test"))
            .and(header("x-version", "1.0"))
            .and(body_json(json!({ "OrderId": "ORD-1", "UserType": 1 })))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"ok"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::default()
            .with_access_key("ak_test")
            .with_secret_key("sk_test");
        let body = transport(&server, config)
            .execute(
                Method::Post,
                "api/refunds",
                "refunds",
                Some(&payload(json!({ "OrderId": "ORD-1", "UserType": 1 }))),
            )
            .await
            .unwrap();
        assert_eq!(body.status(), StatusCode::OK);
        assert_eq!(body.text(), r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn test_keys_omitted_when_unset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(|req: &Request| {
                !req.headers.contains_key(ACCESS_KEY_HEADER)
                    && !req.headers.contains_key(SECRET_KEY_HEADER)
                    && req.headers.contains_key(VERSION_HEADER)
            })
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let result = transport(&server, ClientConfig::default())
            .execute(Method::Get, "api/payments/TX1", "statusbytransid", None)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_leading_slash_keeps_base_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/dev/api/paymentlinks"))
            .respond_with(ResponseTemplate::new(201).set_body_string("created"))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::default()
            .with_base_url(&format!("{}/dev", server.uri()))
            .unwrap();
        let body = Transport::new(config)
            .execute(Method::Post, "/api/paymentlinks", "paymentlink", None)
            .await
            .unwrap();
        assert_eq!(body.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_empty_post_has_no_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(|req: &Request| req.body.is_empty())
            .respond_with(ResponseTemplate::new(201).set_body_string("created"))
            .expect(1)
            .mount(&server)
            .await;

        let body = transport(&server, ClientConfig::default())
            .execute(Method::Post, "api/paymentlinks", "paymentlink", Some(&Payload::new()))
            .await
            .unwrap();
        assert_eq!(body.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_get_payload_becomes_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/payments"))
            .and(query_param("page", "2"))
            .and(query_param("status", "captured"))
            .and(query_param("refunded", "0"))
            .and(|req: &Request| req.body.is_empty())
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let query = payload(json!({
            "page": 2,
            "status": "captured",
            "refunded": false,
            "cursor": null,
        }));
        let body = transport(&server, ClientConfig::default())
            .execute(Method::Get, "api/payments", "payments", Some(&query))
            .await
            .unwrap();
        assert_eq!(body.text(), "[]");
    }

    #[tokio::test]
    async fn test_operation_segment_is_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/payments/refno/INV%202024"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let result = transport(&server, ClientConfig::default())
            .execute_operation(Operation::StatusByReferenceId, Some("INV 2024"), None)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_server_error_message_is_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "message": "Gateway timeout" })),
            )
            .mount(&server)
            .await;

        let err = transport(&server, ClientConfig::default())
            .execute_operation(Operation::CreatePaymentLink, None, None)
            .await
            .unwrap_err();
        assert_eq!(err.error_code, ErrorCode::Status(500));
        assert_eq!(err.message, "Gateway timeout");
    }

    #[tokio::test]
    async fn test_client_error_without_message_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = transport(&server, ClientConfig::default())
            .execute_operation(Operation::StatusByTransactionId, Some("missing"), None)
            .await
            .unwrap_err();
        assert_eq!(err.error_code, ErrorCode::Status(404));
        assert_eq!(err.message, "Not Found");
    }

    #[test]
    fn test_classify_policies() {
        let accepted = classify(StatusPolicy::Legacy, StatusCode::ACCEPTED, "queued".into());
        assert_eq!(accepted.unwrap().text(), "queued");

        let err = classify(StatusPolicy::Strict, StatusCode::ACCEPTED, "queued".into())
            .unwrap_err();
        assert_eq!(err.error_code, ErrorCode::Status(202));
        assert_eq!(err.message, "Not Found");

        for policy in [StatusPolicy::Legacy, StatusPolicy::Strict] {
            assert!(classify(policy, StatusCode::NO_CONTENT, String::new()).is_ok());
            assert!(classify(policy, StatusCode::BAD_REQUEST, String::new()).is_err());
        }
    }

    #[test]
    fn test_query_text() {
        assert_eq!(query_text(&json!("a b")).as_deref(), Some("a b"));
        assert_eq!(query_text(&json!(true)).as_deref(), Some("1"));
        assert_eq!(query_text(&json!(1.5)).as_deref(), Some("1.5"));
        assert_eq!(query_text(&Value::Null), None);
    }
}
