//! Endpoint resolution against the external catalog
//!
//! The catalog maps `(environment, logical operation name)` to the physical
//! service path and the HTTP method the endpoint expects. The resolver adds
//! environment alias handling on top of the raw lookup and classifies
//! misses as configuration-integrity failures.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use gatelink_core::EndpointCatalog;
use gatelink_domain::{
    EndpointMethod, EndpointRecord, Environment, ErrorOutcome, GatelinkError, GatewayErrorKind,
    GatewayResult, Result,
};
use serde::Deserialize;
use tracing::{error, warn};

/// Resolves logical operation names to environment-specific endpoints
pub struct EndpointResolver {
    catalog: Arc<dyn EndpointCatalog>,
}

impl EndpointResolver {
    pub fn new(catalog: Arc<dyn EndpointCatalog>) -> Self {
        Self { catalog }
    }

    /// Map a raw environment label to a canonical catalog key.
    ///
    /// Unrecognized labels fall back to `dev` rather than failing so that
    /// non-production testing is never blocked; the fallback is logged
    /// loudly because it usually means a deployment misconfiguration.
    pub fn normalize_environment(label: &str) -> Environment {
        match Environment::parse_label(label) {
            Some(environment) => environment,
            None => {
                warn!(label, "unrecognized environment label, falling back to dev");
                Environment::Dev
            }
        }
    }

    /// Look up the endpoint for a logical operation.
    pub async fn resolve(&self, label: &str, logical_name: &str) -> GatewayResult<EndpointRecord> {
        let environment = Self::normalize_environment(label);

        match self.catalog.lookup(environment, logical_name).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                error!(%environment, logical_name, "endpoint missing from catalog");
                Err(ErrorOutcome::new(
                    GatewayErrorKind::EndpointNotFound,
                    format!(
                        "Endpoint \"{}\" not found for env \"{}\"",
                        logical_name, environment
                    ),
                ))
            }
            Err(err) => {
                error!(%environment, logical_name, error = %err, "endpoint catalog lookup failed");
                Err(ErrorOutcome::new(
                    GatewayErrorKind::UnknownError,
                    format!("Endpoint catalog lookup failed: {}", err),
                ))
            }
        }
    }
}

/// Fail before any remote call when the catalog method disagrees with the
/// operation's expected method.
pub fn require_method(record: &EndpointRecord, expected: EndpointMethod) -> GatewayResult<()> {
    if record.method == expected {
        Ok(())
    } else {
        error!(
            logical_name = %record.logical_name,
            configured = %record.method,
            expected = %expected,
            "endpoint method mismatch"
        );
        Err(ErrorOutcome::new(GatewayErrorKind::MethodMismatch, "Endpoint method mismatch"))
    }
}

/// In-memory [`EndpointCatalog`] seeded from code or a TOML file
///
/// Stands in for the external catalog store; `(environment, logical_name)`
/// pairs are unique by construction.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    records: HashMap<(Environment, String), EndpointRecord>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    endpoints: Vec<EndpointRecord>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an endpoint, replacing any previous record for the same pair.
    #[must_use]
    pub fn with_endpoint(
        mut self,
        environment: Environment,
        logical_name: impl Into<String>,
        path: impl Into<String>,
        method: EndpointMethod,
    ) -> Self {
        let logical_name = logical_name.into();
        self.records.insert(
            (environment, logical_name.clone()),
            EndpointRecord { environment, logical_name, path: path.into(), method },
        );
        self
    }

    /// Parse a catalog from TOML, rejecting duplicate
    /// `(environment, logical_name)` pairs.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(contents)
            .map_err(|e| GatelinkError::Config(format!("Invalid catalog TOML: {}", e)))?;

        let mut records = HashMap::new();
        for record in file.endpoints {
            let key = (record.environment, record.logical_name.clone());
            if records.insert(key, record.clone()).is_some() {
                return Err(GatelinkError::Config(format!(
                    "Duplicate catalog entry for ({}, {})",
                    record.environment, record.logical_name
                )));
            }
        }

        Ok(Self { records })
    }

    /// Load a catalog seed file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GatelinkError::Config(format!(
                "Failed to read catalog file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl EndpointCatalog for StaticCatalog {
    async fn lookup(
        &self,
        environment: Environment,
        logical_name: &str,
    ) -> Result<Option<EndpointRecord>> {
        Ok(self.records.get(&(environment, logical_name.to_string())).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver_with(catalog: StaticCatalog) -> EndpointResolver {
        EndpointResolver::new(Arc::new(catalog))
    }

    fn sample_catalog() -> StaticCatalog {
        StaticCatalog::new()
            .with_endpoint(
                Environment::Dev,
                "sap-get-gateentry",
                "/sap/opu/odata/sap/ZGATE_ENTRY_SRV/GateEntrySet",
                EndpointMethod::Get,
            )
            .with_endpoint(
                Environment::Prod,
                "sap-get-gateentry",
                "/sap/opu/odata/sap/ZGATE_ENTRY_SRV/GateEntrySet",
                EndpointMethod::Get,
            )
    }

    #[tokio::test]
    async fn resolves_known_pairs() {
        let resolver = resolver_with(sample_catalog());
        let record = resolver.resolve("dev", "sap-get-gateentry").await.expect("resolves");

        assert_eq!(record.environment, Environment::Dev);
        assert_eq!(record.method, EndpointMethod::Get);
    }

    #[tokio::test]
    async fn unknown_pair_fails_with_endpoint_not_found() {
        let resolver = resolver_with(sample_catalog());
        let err = resolver.resolve("dev", "sap-post-po").await.expect_err("should miss");

        assert_eq!(err.kind, GatewayErrorKind::EndpointNotFound);
        assert!(err.message.contains("sap-post-po"));
        assert_eq!(err.http_status, 404);
    }

    #[tokio::test]
    async fn production_alias_resolves_against_prod_entries() {
        let resolver = resolver_with(sample_catalog());
        let record =
            resolver.resolve("production", "sap-get-gateentry").await.expect("resolves");

        assert_eq!(record.environment, Environment::Prod);
    }

    #[tokio::test]
    async fn unrecognized_label_falls_back_to_dev() {
        let resolver = resolver_with(sample_catalog());
        let record = resolver.resolve("staging", "sap-get-gateentry").await.expect("resolves");

        assert_eq!(record.environment, Environment::Dev);
    }

    #[test]
    fn method_mismatch_is_a_config_error() {
        let record = EndpointRecord {
            environment: Environment::Dev,
            logical_name: "sap-post-po".to_string(),
            path: "/x".to_string(),
            method: EndpointMethod::Get,
        };

        let err = require_method(&record, EndpointMethod::Post).expect_err("should mismatch");
        assert_eq!(err.kind, GatewayErrorKind::MethodMismatch);
        assert!(err.kind.is_config_error());
    }

    #[test]
    fn catalog_parses_from_toml() {
        let toml = r#"
            [[endpoints]]
            environment = "qa"
            logical_name = "sap-cancel"
            path = "/sap/opu/odata/sap/ZGATE_ENTRY_SRV/CancelSet"
            method = "POST"
        "#;

        let catalog = StaticCatalog::from_toml_str(toml).expect("parses");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn catalog_loads_from_seed_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"
                [[endpoints]]
                environment = "dev"
                logical_name = "sap-get-po"
                path = "/sap/opu/odata/sap/ZGATE_ENTRY_SRV/POSet"
                method = "GET"
            "#
        )
        .expect("write seed");

        let catalog = StaticCatalog::from_file(file.path()).expect("loads");
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn missing_seed_file_is_a_config_error() {
        let err = StaticCatalog::from_file("/nonexistent/catalog.toml")
            .expect_err("missing file should fail");
        assert!(matches!(err, GatelinkError::Config(_)));
    }

    #[test]
    fn duplicate_toml_entries_are_rejected() {
        let toml = r#"
            [[endpoints]]
            environment = "qa"
            logical_name = "sap-cancel"
            path = "/a"
            method = "POST"

            [[endpoints]]
            environment = "qa"
            logical_name = "sap-cancel"
            path = "/b"
            method = "POST"
        "#;

        let err = StaticCatalog::from_toml_str(toml).expect_err("duplicates should fail");
        assert!(matches!(err, GatelinkError::Config(_)));
    }
}
