//! # Gatelink API
//!
//! JSON surface for the operations console.
//!
//! This crate contains:
//! - The axum router with one handler per logical gateway operation
//! - Shared application state (gateway facade + active environment)
//! - The server binary entry point
//!
//! ## Architecture
//! - Depends on `gatelink-core` for the `ErpGateway` port and on
//!   `gatelink-infra` only in the binary, where the real facade is wired up
//! - Console user authentication happens upstream; every request arriving
//!   here is already authorized

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
