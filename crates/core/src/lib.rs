//! # Gatelink Core
//!
//! Port interfaces between the gateway integration and its collaborators.
//!
//! This crate contains:
//! - The `ErpGateway` operation facade contract consumed by the API layer
//! - The `EndpointCatalog` lookup contract implemented by infra
//!
//! ## Architecture
//! - Depends only on `gatelink-domain`
//! - No I/O; infra provides the implementations

pub mod gateway_ports;

pub use gateway_ports::{EndpointCatalog, ErpGateway};
