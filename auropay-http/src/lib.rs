#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP transport and client for the Auropay payment gateway.
//!
//! Builds on the request models and error types of the `auropay` crate and
//! sends them with `reqwest` through an optional `reqwest-middleware` stack.
//!
//! # Modules
//!
//! - [`client`] - [`AuropayClient`], the five gateway operations
//! - [`constants`] - HTTP header names and injected payload keys
//! - [`error`] - Transport fault normalization
//! - [`legacy`] - Single-string rendering of call outcomes
//! - [`response`] - Raw response bodies and success statuses
//! - [`transport`] - Single-request HTTP transport
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing spans around every gateway call

pub mod client;
pub mod constants;
pub mod error;
pub mod legacy;
pub mod response;
pub mod transport;

pub use client::AuropayClient;
pub use response::RawBody;
pub use transport::Transport;
