//! # Gatelink Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The HTTP client wrapper used for all gateway traffic
//! - Configuration loading (environment variables, catalog seed files)
//! - The SAP gateway integration (operation facade, credential manager,
//!   CSRF handshake, filter builder, response normalizer, error classifier)
//!
//! ## Architecture
//! - Implements traits defined in `gatelink-core`
//! - Contains all "impure" code (network I/O, environment access)

pub mod config;
pub mod gateway;
pub mod http;

// Re-export commonly used items
pub use gateway::{CredentialManager, EndpointResolver, GatewayClient, StaticCatalog};
pub use http::HttpClient;
