//! Configuration loader
//!
//! Loads application configuration from environment variables.
//!
//! ## Environment Variables
//! - `GATELINK_ENV`: Deployment environment label (`dev`, `qa`, `prod`);
//!   defaults to `dev` when unset. Governs the endpoint catalog lookup key
//!   and which gateway credential set is active.
//! - `SAP_BASE_URL`: Base URL of the SAP gateway (required)
//! - `SAP_CLIENT`: Tenant/client identifier header value (required)
//! - `SAP_USERNAME`: Service account user (required)
//! - `SAP_PASSWORD`: Service account password (required)
//! - `GATELINK_ALLOW_INVALID_CERTS`: Accept self-signed gateway certificates
//!   (default: false)
//! - `GATELINK_TIMEOUT_SECS`: Per-request timeout (default: 30)
//! - `GATELINK_BIND_ADDR`: API listen address (default: `127.0.0.1:8080`)
//! - `GATELINK_CATALOG_PATH`: Optional TOML endpoint catalog seed file

use gatelink_domain::{Config, GatelinkError, GatewayConfig, Result};

/// Load configuration
///
/// # Errors
/// Returns `GatelinkError::Config` if a required variable is missing or a
/// numeric variable fails to parse.
pub fn load() -> Result<Config> {
    let config = load_from_env()?;
    tracing::info!(environment = %config.environment, "configuration loaded from environment");
    Ok(config)
}

/// Load configuration from environment variables
///
/// See the module documentation for the complete variable list.
pub fn load_from_env() -> Result<Config> {
    let environment = std::env::var("GATELINK_ENV").unwrap_or_else(|_| "dev".to_string());

    let base_url = env_var("SAP_BASE_URL")?;
    let client = env_var("SAP_CLIENT")?;
    let username = env_var("SAP_USERNAME")?;
    let password = env_var("SAP_PASSWORD")?;
    let allow_invalid_certs = env_bool("GATELINK_ALLOW_INVALID_CERTS", false);
    let timeout_secs = match std::env::var("GATELINK_TIMEOUT_SECS") {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| GatelinkError::Config(format!("Invalid timeout: {}", e)))?,
        Err(_) => 30,
    };

    let bind_addr =
        std::env::var("GATELINK_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let catalog_path = std::env::var("GATELINK_CATALOG_PATH").ok();

    Ok(Config {
        environment,
        gateway: GatewayConfig {
            base_url,
            client,
            username,
            password,
            allow_invalid_certs,
            timeout_secs,
        },
        bind_addr,
        catalog_path,
    })
}

/// Get required environment variable
///
/// # Errors
/// Returns `GatelinkError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        GatelinkError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const GATEWAY_VARS: [&str; 4] =
        ["SAP_BASE_URL", "SAP_CLIENT", "SAP_USERNAME", "SAP_PASSWORD"];

    fn set_gateway_vars() {
        std::env::set_var("SAP_BASE_URL", "https://sap.example.com:8443");
        std::env::set_var("SAP_CLIENT", "100");
        std::env::set_var("SAP_USERNAME", "svc_gatelink");
        std::env::set_var("SAP_PASSWORD", "secret");
    }

    fn clear_all_vars() {
        for key in GATEWAY_VARS {
            std::env::remove_var(key);
        }
        for key in [
            "GATELINK_ENV",
            "GATELINK_ALLOW_INVALID_CERTS",
            "GATELINK_TIMEOUT_SECS",
            "GATELINK_BIND_ADDR",
            "GATELINK_CATALOG_PATH",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("TEST_GATELINK_BOOL", "yes");
        assert!(env_bool("TEST_GATELINK_BOOL", false));

        std::env::set_var("TEST_GATELINK_BOOL", "off");
        assert!(!env_bool("TEST_GATELINK_BOOL", true));

        std::env::remove_var("TEST_GATELINK_BOOL");
        assert!(env_bool("TEST_GATELINK_BOOL", true));
        assert!(!env_bool("TEST_GATELINK_BOOL", false));
    }

    #[test]
    fn loads_with_defaults_when_optional_vars_absent() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_all_vars();
        set_gateway_vars();

        let config = load_from_env().expect("config should load");

        assert_eq!(config.environment, "dev");
        assert_eq!(config.gateway.base_url, "https://sap.example.com:8443");
        assert_eq!(config.gateway.client, "100");
        assert_eq!(config.gateway.timeout_secs, 30);
        assert!(!config.gateway.allow_invalid_certs);
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert!(config.catalog_path.is_none());

        clear_all_vars();
    }

    #[test]
    fn loads_explicit_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_all_vars();
        set_gateway_vars();
        std::env::set_var("GATELINK_ENV", "production");
        std::env::set_var("GATELINK_ALLOW_INVALID_CERTS", "true");
        std::env::set_var("GATELINK_TIMEOUT_SECS", "10");
        std::env::set_var("GATELINK_BIND_ADDR", "0.0.0.0:9000");
        std::env::set_var("GATELINK_CATALOG_PATH", "/etc/gatelink/catalog.toml");

        let config = load_from_env().expect("config should load");

        assert_eq!(config.environment, "production");
        assert!(config.gateway.allow_invalid_certs);
        assert_eq!(config.gateway.timeout_secs, 10);
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.catalog_path.as_deref(), Some("/etc/gatelink/catalog.toml"));

        clear_all_vars();
    }

    #[test]
    fn fails_when_gateway_vars_missing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_all_vars();

        let result = load_from_env();
        assert!(result.is_err(), "should fail without SAP_* variables");
        assert!(matches!(result.unwrap_err(), GatelinkError::Config(_)));
    }

    #[test]
    fn fails_on_invalid_timeout() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_all_vars();
        set_gateway_vars();
        std::env::set_var("GATELINK_TIMEOUT_SECS", "soon");

        let result = load_from_env();
        assert!(matches!(result.unwrap_err(), GatelinkError::Config(_)));

        clear_all_vars();
    }
}
