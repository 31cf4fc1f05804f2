//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Gatelink
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum GatelinkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Gatelink operations
pub type Result<T> = std::result::Result<T, GatelinkError>;

/// Classification of a failed gateway operation
///
/// Every failure that crosses the operation facade boundary is reduced to
/// one of these kinds. `EndpointNotFound` and `MethodMismatch` indicate a
/// catalog/code mismatch rather than user or remote-system behavior and are
/// logged at a higher severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayErrorKind {
    EndpointNotFound,
    MethodMismatch,
    ConnectionRefused,
    Timeout,
    BusinessError,
    UnknownError,
}

impl GatewayErrorKind {
    /// Returns true when the failure points at catalog/configuration drift
    /// instead of a remote or user problem.
    pub fn is_config_error(self) -> bool {
        matches!(self, Self::EndpointNotFound | Self::MethodMismatch)
    }

    /// Default HTTP status mirrored to the caller when the remote call
    /// produced none.
    pub fn default_http_status(self) -> u16 {
        match self {
            Self::EndpointNotFound => 404,
            Self::MethodMismatch => 400,
            Self::ConnectionRefused | Self::Timeout => 502,
            Self::BusinessError | Self::UnknownError => 500,
        }
    }
}

impl std::fmt::Display for GatewayErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::EndpointNotFound => "endpoint not found",
            Self::MethodMismatch => "endpoint method mismatch",
            Self::ConnectionRefused => "connection refused",
            Self::Timeout => "timeout",
            Self::BusinessError => "business error",
            Self::UnknownError => "unknown error",
        };
        write!(f, "{}", label)
    }
}

/// Structured failure returned by every gateway operation
///
/// `http_status` mirrors the remote call's status where one was received and
/// falls back to the kind's default otherwise. `raw_detail` carries the
/// unparsed remote payload for diagnostics; it is never shown verbatim to
/// console users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutcome {
    pub kind: GatewayErrorKind,
    pub message: String,
    pub http_status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_detail: Option<String>,
}

impl ErrorOutcome {
    /// Create an outcome with the kind's default HTTP status.
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), http_status: kind.default_http_status(), raw_detail: None }
    }

    /// Override the mirrored HTTP status (used when the remote call produced
    /// a real status code).
    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = status;
        self
    }

    /// Attach the raw remote payload for diagnostics.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.raw_detail = Some(detail.into());
        self
    }
}

impl std::fmt::Display for ErrorOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.kind, self.http_status, self.message)
    }
}

impl std::error::Error for ErrorOutcome {}

/// Result type for gateway operations that fail with a classified outcome
pub type GatewayResult<T> = std::result::Result<T, ErrorOutcome>;
