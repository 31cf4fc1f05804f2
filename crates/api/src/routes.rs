//! Route handlers for the operations console
//!
//! One handler per logical gateway operation plus a health probe. Bodies
//! and path parameters arrive pre-validated by the console's form layer;
//! the only check repeated here is the cancel operation's required fields,
//! which guards the CSRF round trip against obviously empty requests.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use gatelink_domain::{
    CancelOutcome, CancelRequest, CreateOutcome, CreateRequest, DocumentDetail, FilterCriteria,
    NormalizedRecord,
};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the console-facing router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/gate-entries/search", post(search_gate_entries))
        .route("/api/gate-entries/cancel", post(cancel_gate_entry))
        .route(
            "/api/purchase-orders/{po}",
            get(get_purchase_order).post(post_purchase_order),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    environment: String,
    gateway: gatelink_domain::ConnectionStatus,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let gateway = state.gateway.check_connection().await;
    Json(HealthResponse {
        status: if gateway.success { "ok" } else { "degraded" },
        environment: state.environment.clone(),
        gateway,
    })
}

async fn search_gate_entries(
    State(state): State<AppState>,
    Json(criteria): Json<FilterCriteria>,
) -> Result<Json<Vec<NormalizedRecord>>, ApiError> {
    let records = state.gateway.fetch_entries(&state.environment, &criteria).await?;
    Ok(Json(records))
}

async fn get_purchase_order(
    State(state): State<AppState>,
    Path(po): Path<String>,
) -> Result<Json<DocumentDetail>, ApiError> {
    let detail = state.gateway.fetch_document(&state.environment, &po).await?;
    Ok(Json(detail))
}

async fn post_purchase_order(
    State(state): State<AppState>,
    Path(po): Path<String>,
    Json(request): Json<CreateRequest>,
) -> Result<Json<CreateOutcome>, ApiError> {
    let outcome = state.gateway.post_document(&state.environment, &po, &request).await?;
    Ok(Json(outcome))
}

async fn cancel_gate_entry(
    State(state): State<AppState>,
    Json(request): Json<CancelRequest>,
) -> Result<Json<CancelOutcome>, ApiError> {
    if request.gate_entry_no.trim().is_empty() || request.canc_reason.trim().is_empty() {
        return Err(ApiError::Invalid(
            "Gate Entry No and Cancel Reason are required".to_string(),
        ));
    }

    let outcome = state.gateway.cancel_entry(&state.environment, &request).await?;
    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use gatelink_core::ErpGateway;
    use gatelink_domain::{
        ConnectionStatus, DocumentHeader, ErrorOutcome, GatewayErrorKind, GatewayResult,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    /// Canned gateway: successful fixtures everywhere, except a classified
    /// business error for purchase order `4599999999`.
    struct MockGateway;

    #[async_trait]
    impl ErpGateway for MockGateway {
        async fn fetch_entries(
            &self,
            _environment: &str,
            criteria: &FilterCriteria,
        ) -> GatewayResult<Vec<NormalizedRecord>> {
            let mut record = NormalizedRecord::new();
            record.insert("Ebeln".to_string(), json!("4500001234"));
            record.insert(
                "Partner".to_string(),
                json!(criteria.partner_from.clone().unwrap_or_default()),
            );
            Ok(vec![record])
        }

        async fn fetch_document(
            &self,
            _environment: &str,
            document_id: &str,
        ) -> GatewayResult<DocumentDetail> {
            if document_id == "4599999999" {
                return Err(ErrorOutcome::new(
                    GatewayErrorKind::BusinessError,
                    "Document does not exist",
                )
                .with_status(404));
            }

            Ok(DocumentDetail {
                header: DocumentHeader {
                    lifnr: "0001".to_string(),
                    name1: "Acme".to_string(),
                    ..DocumentHeader::default()
                },
                items: vec![json!({"Ebelp": "10", "Matnr": "M1"})],
            })
        }

        async fn post_document(
            &self,
            _environment: &str,
            _document_id: &str,
            request: &CreateRequest,
        ) -> GatewayResult<CreateOutcome> {
            Ok(CreateOutcome {
                success: true,
                message: "Posted successfully to SAP".to_string(),
                remote_message: None,
                fcode: request.fcode.clone(),
            })
        }

        async fn cancel_entry(
            &self,
            _environment: &str,
            request: &CancelRequest,
        ) -> GatewayResult<CancelOutcome> {
            Ok(CancelOutcome {
                success: true,
                message: format!("Gate Entry {} cancelled successfully", request.gate_entry_no),
            })
        }

        async fn check_connection(&self) -> ConnectionStatus {
            ConnectionStatus { success: true, status: 200, message: "reachable".to_string() }
        }
    }

    fn test_app() -> Router {
        build_router(AppState::new(Arc::new(MockGateway), "qa"))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn search_returns_normalized_records() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/gate-entries/search")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"partnerFrom":"5"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body[0]["Ebeln"], "4500001234");
        assert_eq!(body[0]["Partner"], "5");
    }

    #[tokio::test]
    async fn get_purchase_order_returns_header_and_items() {
        let app = test_app();
        let request = Request::builder()
            .method("GET")
            .uri("/api/purchase-orders/4500001234")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["header"]["Lifnr"], "0001");
        assert_eq!(body["header"]["Name1"], "Acme");
        assert_eq!(body["items"][0]["Ebelp"], "10");
    }

    #[tokio::test]
    async fn gateway_failure_mirrors_status_and_kind() {
        let app = test_app();
        let request = Request::builder()
            .method("GET")
            .uri("/api/purchase-orders/4599999999")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Document does not exist");
        assert_eq!(body["kind"], "BusinessError");
    }

    #[tokio::test]
    async fn post_purchase_order_returns_outcome() {
        let app = test_app();
        let payload = json!({
            "supplierCode": "0001",
            "supplierDesc": "Acme",
            "fcode": "POST",
            "items": [{"Ebelp": "10", "Matnr": "M1", "Maktx": "Steel coil"}]
        });
        let request = Request::builder()
            .method("POST")
            .uri("/api/purchase-orders/4500001234")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["fcode"], "POST");
    }

    #[tokio::test]
    async fn cancel_requires_entry_number_and_reason() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/gate-entries/cancel")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"GateentryNo":"","CancReason":"dup"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Gate Entry No and Cancel Reason are required");
    }

    #[tokio::test]
    async fn cancel_succeeds_with_complete_request() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/gate-entries/cancel")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"GateentryNo":"5000000042","CancReason":"dup"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Gate Entry 5000000042 cancelled successfully");
    }

    #[tokio::test]
    async fn health_reports_gateway_probe() {
        let app = test_app();
        let request =
            Request::builder().method("GET").uri("/health").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["environment"], "qa");
        assert_eq!(body["gateway"]["success"], true);
    }
}
