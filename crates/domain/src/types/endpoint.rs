//! Endpoint catalog records

use serde::{Deserialize, Serialize};

use crate::types::environment::Environment;

/// HTTP methods the endpoint catalog may declare
///
/// The gateway integration supports exactly the operation shapes the console
/// needs, so the catalog never holds anything beyond GET and POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EndpointMethod {
    Get,
    Post,
}

impl EndpointMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl std::fmt::Display for EndpointMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EndpointMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            other => Err(format!("unsupported endpoint method: {}", other)),
        }
    }
}

/// One entry of the endpoint catalog
///
/// Maps a logical operation name to the environment-specific service path.
/// Immutable once read; `(environment, logical_name)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub environment: Environment,
    pub logical_name: String,
    /// Absolute path below the gateway base URL
    pub path: String,
    pub method: EndpointMethod,
}
