//! Server binary: wires configuration, catalog, and gateway facade together

use std::sync::Arc;

use anyhow::Context;
use gatelink_api::{build_router, AppState};
use gatelink_domain::{EndpointMethod, Environment};
use gatelink_infra::{GatewayClient, StaticCatalog};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = gatelink_infra::config::load().context("loading configuration")?;

    let catalog = match &config.catalog_path {
        Some(path) => StaticCatalog::from_file(path)
            .with_context(|| format!("loading endpoint catalog from {}", path))?,
        None => default_catalog(),
    };
    tracing::info!(endpoints = catalog.len(), "endpoint catalog ready");

    let gateway = GatewayClient::new(config.gateway.clone(), Arc::new(catalog))
        .context("building gateway client")?;
    let state = AppState::new(Arc::new(gateway), config.environment.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, environment = %config.environment, "gatelink server listening");

    axum::serve(listener, build_router(state)).await.context("serving")?;
    Ok(())
}

/// Built-in catalog mirroring the standard gate-entry service layout.
///
/// Deployments with environment-specific paths override this with a TOML
/// seed file via `GATELINK_CATALOG_PATH`.
fn default_catalog() -> StaticCatalog {
    const SRV: &str = "/sap/opu/odata/sap/ZGATE_ENTRY_SRV";

    let mut catalog = StaticCatalog::new();
    for environment in [Environment::Dev, Environment::Qa, Environment::Prod] {
        catalog = catalog
            .with_endpoint(
                environment,
                "sap-get-gateentry",
                format!("{}/GateEntrySet", SRV),
                EndpointMethod::Get,
            )
            .with_endpoint(
                environment,
                "sap-get-po",
                format!("{}/POSet", SRV),
                EndpointMethod::Get,
            )
            .with_endpoint(
                environment,
                "sap-post-po",
                format!("{}/POSet", SRV),
                EndpointMethod::Post,
            )
            .with_endpoint(
                environment,
                "sap-cancel",
                format!("{}/CancelSet", SRV),
                EndpointMethod::Post,
            );
    }
    catalog
}
