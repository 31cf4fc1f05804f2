//! API error type
//!
//! Maps classified gateway outcomes to HTTP responses, mirroring the remote
//! HTTP status where one was observed. The response body always carries an
//! `error` message plus the machine-readable `kind` for gateway failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gatelink_domain::ErrorOutcome;
use serde_json::json;
use tracing::{error, warn};

/// Errors a route handler can surface
#[derive(Debug)]
pub enum ApiError {
    /// Classified gateway failure
    Gateway(ErrorOutcome),
    /// Request rejected before any gateway work
    Invalid(String),
}

impl From<ErrorOutcome> for ApiError {
    fn from(outcome: ErrorOutcome) -> Self {
        Self::Gateway(outcome)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Gateway(outcome) => {
                // Catalog/code drift is operationally louder than remote or
                // user failures.
                if outcome.kind.is_config_error() {
                    error!(kind = %outcome.kind, message = %outcome.message, "gateway configuration failure");
                } else {
                    warn!(kind = %outcome.kind, message = %outcome.message, "gateway operation failed");
                }

                let status = StatusCode::from_u16(outcome.http_status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let body = json!({
                    "error": outcome.message,
                    "kind": outcome.kind,
                });
                (status, Json(body)).into_response()
            }
            Self::Invalid(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}
