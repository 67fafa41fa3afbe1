#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the Auropay payment gateway.
//!
//! This crate builds and validates gateway requests and defines the error
//! shapes every failure is reported in. It performs no I/O; the HTTP
//! transport and the high-level client live in `auropay-http`.
//!
//! # Overview
//!
//! A request is assembled field by field through an owned builder. Each
//! setter checks its value against a fixed sequence of rules and fails fast
//! with a catalog-coded [`ValidationError`]. A finished request serializes
//! to an ordered [`Payload`](model::Payload) sent as a JSON body or as query
//! parameters.
//!
//! # Modules
//!
//! - [`amount`] - Monetary amount checks
//! - [`catalog`] - Client-side error codes `SE0001`..`SE0035` and their messages
//! - [`config`] - Immutable client configuration
//! - [`endpoint`] - Environment base URLs, API versions and operation routes
//! - [`error`] - Validation and structured error types
//! - [`model`] - Payment, QR-code and refund request builders
//! - [`timestamp`] - Payment-link expiry parsing
//! - [`validation`] - Stateless field validation primitives
//!
//! # Feature Flags
//!
//! - `telemetry` - Emits tracing events for validation failures

pub mod amount;
pub mod catalog;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod model;
pub mod timestamp;
pub mod validation;

pub use catalog::CatalogCode;
pub use config::{ClientConfig, StatusPolicy};
pub use endpoint::{Environment, Operation};
pub use error::{ErrorCode, StructuredError, ValidationError};
