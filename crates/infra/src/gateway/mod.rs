//! SAP gateway integration
//!
//! This module maintains the live session against the remote OData gateway
//! and exposes the operation facade the console's web layer calls.
//!
//! # Architecture
//!
//! - **Facade**: [`GatewayClient`] — implements the `ErpGateway` port; one
//!   method per logical console operation
//! - **Resolver**: [`EndpointResolver`] — `(environment, logical name)` →
//!   physical path + expected method, via the `EndpointCatalog` port
//! - **Credentials**: [`CredentialManager`] — long-lived Basic credential
//!   with a lazy 8-hour refresh horizon
//! - **CSRF**: [`csrf::fetch_csrf_session`] — fresh anti-forgery token +
//!   session cookie immediately before every mutating call
//! - **Filter**: [`filter::build_filter`] — structured criteria → OData
//!   `$filter` expression
//! - **Normalizer**: [`normalize`] — envelope stripping, date-serial and
//!   duration formatting, document flattening
//! - **Classifier**: [`errors`] — transport signals plus JSON/XML error
//!   payloads → one [`gatelink_domain::ErrorOutcome`]
//!
//! # Error Handling
//!
//! Nothing is retried automatically: a write is executed at most once per
//! caller invocation, and transient failures surface to the caller as
//! classified outcomes. `EndpointNotFound` and `MethodMismatch` are
//! configuration-integrity failures and log at `error!` severity.

pub mod auth;
pub mod catalog;
pub mod client;
pub mod csrf;
pub mod errors;
pub mod filter;
pub mod normalize;

pub use auth::CredentialManager;
pub use catalog::{EndpointResolver, StaticCatalog};
pub use client::GatewayClient;
pub use csrf::CsrfSession;
