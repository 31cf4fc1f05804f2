//! Operation facade for the SAP gateway
//!
//! One method per logical console operation. Each call walks the same
//! states: resolve the endpoint, check the configured method, obtain the
//! service credential, run the anti-forgery handshake (mutating operations
//! only), execute the remote call, then normalize the response or classify
//! the failure. A failure at any state short-circuits; nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Timelike, Utc};
use gatelink_common::time::{Clock, SystemClock};
use gatelink_core::{EndpointCatalog, ErpGateway};
use gatelink_domain::{
    CancelOutcome, CancelRequest, ConnectionStatus, CreateOutcome, CreateRequest, DocumentDetail,
    EndpointMethod, ErrorOutcome, FilterCriteria, GatewayConfig, GatewayErrorKind, GatewayResult,
    NormalizedRecord, Result,
};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::gateway::auth::CredentialManager;
use crate::gateway::catalog::{require_method, EndpointResolver};
use crate::gateway::csrf;
use crate::gateway::errors::{classify_response, classify_transport, extract_confirmation};
use crate::gateway::filter::build_filter;
use crate::gateway::normalize::{flatten_document, normalize_record, Envelope};
use crate::http::HttpClient;

/// OData service root used for the anti-forgery handshake
const SERVICE_ROOT: &str = "/sap/opu/odata/sap/ZGATE_ENTRY_SRV/";
/// Lightweight reachability probe exposed by every SAP gateway
const PING_PATH: &str = "/sap/public/ping";

/// Logical operation names as keyed in the endpoint catalog
const OP_GET_GATE_ENTRIES: &str = "sap-get-gateentry";
const OP_GET_PO: &str = "sap-get-po";
const OP_POST_PO: &str = "sap-post-po";
const OP_CANCEL: &str = "sap-cancel";

/// Default quantity when the console posts an item without one
const DEFAULT_ITEM_QUANTITY: &str = "0.000";

/// Gateway operation facade
///
/// Owns the credential manager and the HTTP client; the endpoint catalog
/// and the clock are injected so tests can substitute fakes.
pub struct GatewayClient {
    config: GatewayConfig,
    http: HttpClient,
    resolver: EndpointResolver,
    credentials: CredentialManager,
    clock: Arc<dyn Clock>,
}

impl GatewayClient {
    /// Create a facade backed by the system clock.
    pub fn new(config: GatewayConfig, catalog: Arc<dyn EndpointCatalog>) -> Result<Self> {
        Self::with_clock(config, catalog, Arc::new(SystemClock))
    }

    /// Create a facade with an injected clock (used by tests).
    pub fn with_clock(
        config: GatewayConfig,
        catalog: Arc<dyn EndpointCatalog>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .accept_invalid_certs(config.allow_invalid_certs)
            .build()?;
        let credentials = CredentialManager::new(
            config.username.clone(),
            config.password.clone(),
            clock.clone(),
        );

        Ok(Self {
            http,
            resolver: EndpointResolver::new(catalog),
            credentials,
            clock,
            config,
        })
    }

    /// Fetch gate entries matching the criteria.
    pub async fn fetch_entries(
        &self,
        environment: &str,
        criteria: &FilterCriteria,
    ) -> GatewayResult<Vec<NormalizedRecord>> {
        let record = self.resolver.resolve(environment, OP_GET_GATE_ENTRIES).await?;
        require_method(&record, EndpointMethod::Get)?;

        let filter = build_filter(criteria);
        let mut query: Vec<(String, String)> = Vec::new();
        if !filter.is_empty() {
            query.push(("$filter".to_string(), filter));
        }

        let body = self.get_json(&self.url(&record.path), &query).await?;
        let records: Vec<NormalizedRecord> =
            Envelope::from_value(body).records().into_iter().map(normalize_record).collect();

        info!(count = records.len(), "fetched gate entries");
        Ok(records)
    }

    /// Fetch a single purchase order with its items expanded.
    pub async fn fetch_document(
        &self,
        environment: &str,
        document_id: &str,
    ) -> GatewayResult<DocumentDetail> {
        let record = self.resolver.resolve(environment, OP_GET_PO).await?;
        require_method(&record, EndpointMethod::Get)?;

        let url = format!("{}('{}')", self.url(&record.path), document_id);
        let query = vec![("$expand".to_string(), "TOITEM".to_string())];

        let body = self.get_json(&url, &query).await?;
        let detail = flatten_document(Envelope::from_value(body).entity());

        info!(document_id, items = detail.items.len(), "fetched purchase order");
        Ok(detail)
    }

    /// Post (or check) a gate entry for a purchase order. CSRF-guarded.
    pub async fn post_document(
        &self,
        environment: &str,
        document_id: &str,
        request: &CreateRequest,
    ) -> GatewayResult<CreateOutcome> {
        let record = self.resolver.resolve(environment, OP_POST_PO).await?;
        require_method(&record, EndpointMethod::Post)?;

        let payload = build_post_payload(document_id, request, self.clock.now_utc());
        let body = self
            .send_mutation(&record.path, &payload, "application/atom+xml")
            .await?;

        let remote_message = extract_confirmation(&body);
        let message = remote_message.clone().unwrap_or_else(|| {
            if request.fcode == "CHECK" {
                "Checked successfully to SAP".to_string()
            } else {
                "Posted successfully to SAP".to_string()
            }
        });

        info!(document_id, fcode = %request.fcode, "gate entry posted");
        Ok(CreateOutcome {
            success: true,
            message,
            remote_message,
            fcode: request.fcode.clone(),
        })
    }

    /// Cancel an existing gate entry. CSRF-guarded.
    pub async fn cancel_entry(
        &self,
        environment: &str,
        request: &CancelRequest,
    ) -> GatewayResult<CancelOutcome> {
        let record = self.resolver.resolve(environment, OP_CANCEL).await?;
        require_method(&record, EndpointMethod::Post)?;

        let payload = json!({
            "GateentryNo": request.gate_entry_no,
            "Cancel": "X",
            "CancReason": request.canc_reason,
        });
        let _body = self.send_mutation(&record.path, &payload, "application/json").await?;

        info!(gate_entry_no = %request.gate_entry_no, "gate entry cancelled");
        Ok(CancelOutcome {
            success: true,
            message: format!("Gate Entry {} cancelled successfully", request.gate_entry_no),
        })
    }

    /// Probe gateway reachability.
    pub async fn check_connection(&self) -> ConnectionStatus {
        let request = self
            .http
            .request(Method::GET, self.url(PING_PATH))
            .header("Authorization", self.credentials.valid_token())
            .header("Accept", "application/json")
            .header("sap-client", &self.config.client);

        match self.http.send(request).await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    ConnectionStatus {
                        success: true,
                        status: status.as_u16(),
                        message: "SAP base URL is reachable.".to_string(),
                    }
                } else {
                    ConnectionStatus {
                        success: false,
                        status: status.as_u16(),
                        message: format!("SAP responded with status {}", status.as_u16()),
                    }
                }
            }
            Err(err) => {
                let outcome = classify_transport(&err);
                warn!(kind = %outcome.kind, "gateway unreachable");
                ConnectionStatus {
                    success: false,
                    status: outcome.http_status,
                    message: outcome.message,
                }
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Authenticated GET returning the parsed JSON body.
    async fn get_json(&self, url: &str, query: &[(String, String)]) -> GatewayResult<Value> {
        let request = self
            .http
            .request(Method::GET, url)
            .header("Authorization", self.credentials.valid_token())
            .header("Accept", "application/json")
            .header("sap-client", &self.config.client)
            .query(query);

        let response = self.http.send(request).await.map_err(|err| classify_transport(&err))?;
        let status = response.status();
        let body = response.text().await.map_err(|err| classify_transport(&err))?;

        if !status.is_success() {
            return Err(classify_response(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|err| {
            ErrorOutcome::new(
                GatewayErrorKind::UnknownError,
                format!("Failed to parse gateway response: {}", err),
            )
            .with_status(status.as_u16())
            .with_detail(body)
        })
    }

    /// Run the anti-forgery handshake and execute one mutating call.
    ///
    /// The fresh session is used for exactly this call and dropped; it is
    /// never shared across concurrent writes.
    async fn send_mutation(
        &self,
        path: &str,
        payload: &Value,
        accept: &str,
    ) -> GatewayResult<String> {
        let authorization = self.credentials.valid_token();
        let session = csrf::fetch_csrf_session(
            &self.http,
            &self.config.base_url,
            SERVICE_ROOT,
            &authorization,
            &self.config.client,
        )
        .await?;

        let request = self
            .http
            .request(Method::POST, self.url(path))
            .header("Authorization", authorization)
            .header("Content-Type", "application/json")
            .header("Accept", accept)
            .header("x-csrf-token", session.token)
            .header("Cookie", session.cookie_header)
            .header("sap-client", &self.config.client)
            .json(payload);

        let response = self.http.send(request).await.map_err(|err| classify_transport(&err))?;
        let status = response.status();
        let body = response.text().await.map_err(|err| classify_transport(&err))?;

        if !status.is_success() {
            return Err(classify_response(status.as_u16(), &body));
        }

        Ok(body)
    }
}

/// Build the gateway payload for a create/check call.
///
/// `SysTime` carries the posting wall clock time in the gateway's duration
/// format; the vehicle entry time defaults to it when the console sent
/// none.
fn build_post_payload(document_id: &str, request: &CreateRequest, now: DateTime<Utc>) -> Value {
    let sys_time = format!("PT{:02}H{:02}M{:02}S", now.hour(), now.minute(), now.second());
    let veh_intime = request
        .vehicle_in_time
        .clone()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| sys_time.clone());

    let items: Vec<Value> = request
        .items
        .iter()
        .map(|item| {
            json!({
                "Ebeln": document_id,
                "Ebelp": item.ebelp,
                "Matnr": item.matnr,
                "Maktx": item.maktx,
                "Menge": item
                    .menge
                    .clone()
                    .filter(|value| !value.is_empty())
                    .unwrap_or_else(|| DEFAULT_ITEM_QUANTITY.to_string()),
            })
        })
        .collect();

    json!({
        "Ebeln": document_id,
        "Lifnr": request.supplier_code,
        "SysTime": sys_time,
        "Name1": request.supplier_desc,
        "VehIntime": veh_intime,
        "VehicleNo": request.vehicle_no.clone().unwrap_or_default(),
        "InvNo": request.supplier_invoice.clone().unwrap_or_default(),
        "LrNo": request.lr_no.clone().unwrap_or_default(),
        "Fcode": request.fcode,
        "TOITEM": { "results": items },
    })
}

#[async_trait]
impl ErpGateway for GatewayClient {
    async fn fetch_entries(
        &self,
        environment: &str,
        criteria: &FilterCriteria,
    ) -> GatewayResult<Vec<NormalizedRecord>> {
        GatewayClient::fetch_entries(self, environment, criteria).await
    }

    async fn fetch_document(
        &self,
        environment: &str,
        document_id: &str,
    ) -> GatewayResult<DocumentDetail> {
        GatewayClient::fetch_document(self, environment, document_id).await
    }

    async fn post_document(
        &self,
        environment: &str,
        document_id: &str,
        request: &CreateRequest,
    ) -> GatewayResult<CreateOutcome> {
        GatewayClient::post_document(self, environment, document_id, request).await
    }

    async fn cancel_entry(
        &self,
        environment: &str,
        request: &CancelRequest,
    ) -> GatewayResult<CancelOutcome> {
        GatewayClient::cancel_entry(self, environment, request).await
    }

    async fn check_connection(&self) -> ConnectionStatus {
        GatewayClient::check_connection(self).await
    }
}
