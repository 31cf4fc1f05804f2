//! Gateway integration port interfaces

use async_trait::async_trait;
use gatelink_domain::{
    CancelOutcome, CancelRequest, ConnectionStatus, CreateOutcome, CreateRequest, DocumentDetail,
    EndpointRecord, Environment, FilterCriteria, GatewayResult, NormalizedRecord, Result,
};

/// Lookup contract for the external endpoint catalog
///
/// The catalog maps `(environment, logical_name)` to the physical service
/// path and expected method. Storage is somebody else's problem; this port
/// only models the lookup. `Ok(None)` means the pair is unknown — the
/// resolver turns that into a classified `EndpointNotFound`, never a panic.
#[async_trait]
pub trait EndpointCatalog: Send + Sync {
    async fn lookup(
        &self,
        environment: Environment,
        logical_name: &str,
    ) -> Result<Option<EndpointRecord>>;
}

/// Operation facade exposed to the orchestrating web layer
///
/// One method per logical console operation. Inputs arrive already
/// validated; every failure comes back as a classified
/// [`gatelink_domain::ErrorOutcome`] — callers never see a raw transport
/// error. The `environment` argument is the raw label from configuration;
/// alias normalization happens inside the facade.
#[async_trait]
pub trait ErpGateway: Send + Sync {
    /// Fetch gate entries matching the given criteria (remote GET + `$filter`)
    async fn fetch_entries(
        &self,
        environment: &str,
        criteria: &FilterCriteria,
    ) -> GatewayResult<Vec<NormalizedRecord>>;

    /// Fetch a single purchase order with its item sub-collection expanded
    async fn fetch_document(
        &self,
        environment: &str,
        document_id: &str,
    ) -> GatewayResult<DocumentDetail>;

    /// Post (or check) a gate entry for a purchase order; CSRF-guarded
    async fn post_document(
        &self,
        environment: &str,
        document_id: &str,
        request: &CreateRequest,
    ) -> GatewayResult<CreateOutcome>;

    /// Cancel an existing gate entry; CSRF-guarded
    async fn cancel_entry(
        &self,
        environment: &str,
        request: &CancelRequest,
    ) -> GatewayResult<CancelOutcome>;

    /// Probe gateway reachability (used by the health endpoint)
    async fn check_connection(&self) -> ConnectionStatus;
}
