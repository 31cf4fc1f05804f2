//! Shared application state

use std::sync::Arc;

use gatelink_core::ErpGateway;

/// State handed to every route handler
///
/// The environment label is fixed at startup from configuration; it selects
/// the endpoint catalog key for every gateway call this process makes.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn ErpGateway>,
    pub environment: String,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ErpGateway>, environment: impl Into<String>) -> Self {
        Self { gateway, environment: environment.into() }
    }
}
