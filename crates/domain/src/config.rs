//! Configuration structures
//!
//! Populated by the infra config loader (environment variables first, file
//! fallback). The structures themselves carry no loading logic.

use serde::{Deserialize, Serialize};

/// Connection settings for the remote SAP gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the gateway, e.g. `https://sap.example.com:8443`
    pub base_url: String,
    /// Tenant/client identifier sent as the `sap-client` header
    pub client: String,
    /// Service account user for the Basic credential
    pub username: String,
    /// Service account password for the Basic credential
    pub password: String,
    /// Accept self-signed gateway certificates. Off unless explicitly enabled.
    #[serde(default)]
    pub allow_invalid_certs: bool,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Raw environment label (`dev`, `qa`, `prod`, or an alias). Governs both
    /// the endpoint catalog lookup key and which gateway credential set is
    /// active.
    pub environment: String,
    pub gateway: GatewayConfig,
    /// Listen address for the JSON API server
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Optional path to a TOML endpoint catalog seed file
    #[serde(default)]
    pub catalog_path: Option<String>,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}
