//! Deployment environments for the gateway integration

use serde::{Deserialize, Serialize};

/// Canonical deployment environment keys
///
/// Endpoint catalog entries are keyed by one of these three values. Console
/// callers may hand over looser labels (`"production"`); alias handling lives
/// with the endpoint resolver so that the fallback can be logged there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Qa,
    Prod,
}

impl Environment {
    /// Parse a label strictly, accepting the known aliases only.
    ///
    /// Returns `None` for anything unrecognized; the caller decides whether
    /// to fail or fall back.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Some(Self::Dev),
            "qa" => Some(Self::Qa),
            "prod" | "production" => Some(Self::Prod),
            _ => None,
        }
    }

    /// Canonical catalog key for this environment
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Qa => "qa",
            Self::Prod => "prod",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
