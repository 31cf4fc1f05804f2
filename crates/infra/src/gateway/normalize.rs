//! Response normalization for gateway payloads
//!
//! The gateway wraps business data in a protocol envelope (`d`, `results`)
//! and serializes dates and durations in its own formats. Everything the
//! console sees goes through this module first: the envelope is resolved
//! once into a tagged union, protocol metadata is dropped, and field values
//! are reformatted.

use gatelink_domain::{DocumentDetail, DocumentHeader, NormalizedRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Envelope metadata key dropped from every record
const METADATA_KEY: &str = "__metadata";
/// Sub-collection property carrying purchase-order items
const ITEMS_PROPERTY: &str = "TOITEM";

#[allow(clippy::unwrap_used)] // literal pattern, always compiles
static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").unwrap());

/// The three envelope shapes the gateway produces
///
/// Resolved exactly once at the response boundary instead of shape-sniffing
/// at every call site.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `{ "d": { "results": [...] } }`
    Collection(Vec<Value>),
    /// `{ "d": { ... } }`
    Single(Value),
    /// Anything without a `d` wrapper
    Bare(Value),
}

impl Envelope {
    /// Classify a raw gateway body.
    pub fn from_value(mut value: Value) -> Self {
        let Some(inner) = value.get_mut("d").map(Value::take) else {
            return Self::Bare(value);
        };

        match inner {
            Value::Object(mut map) => match map.get_mut("results").map(Value::take) {
                Some(Value::Array(items)) => Self::Collection(items),
                _ => Self::Single(Value::Object(map)),
            },
            other => Self::Single(other),
        }
    }

    /// Collection records, empty for the other shapes.
    pub fn records(self) -> Vec<Value> {
        match self {
            Self::Collection(items) => items,
            Self::Single(_) | Self::Bare(_) => Vec::new(),
        }
    }

    /// The single business entity carried by this envelope.
    pub fn entity(self) -> Value {
        match self {
            Self::Collection(items) => Value::Array(items),
            Self::Single(value) | Self::Bare(value) => value,
        }
    }
}

/// Convert a gateway date serial (`/Date(<millis>)/`) to `DD-MM-YYYY` (UTC).
///
/// Values that do not carry a parseable serial pass through unchanged.
pub fn format_gateway_date(raw: &str) -> String {
    let Some(rest) = raw.strip_prefix("/Date(") else {
        return raw.to_string();
    };

    let digits: String =
        rest.chars().take_while(|c| c.is_ascii_digit() || *c == '-').collect();
    let Ok(millis) = digits.parse::<i64>() else {
        return raw.to_string();
    };

    match chrono::DateTime::from_timestamp_millis(millis) {
        Some(instant) => instant.format("%d-%m-%Y").to_string(),
        None => raw.to_string(),
    }
}

/// Convert an ISO-8601-style gateway duration (`PT02H05M09S`) to `HH:MM:SS`.
///
/// Non-matching values pass through unchanged.
pub fn format_gateway_duration(raw: &str) -> String {
    let Some(captures) = DURATION_RE.captures(raw) else {
        return raw.to_string();
    };

    let part = |index: usize| -> String {
        let digits = captures.get(index).map_or("0", |m| m.as_str());
        format!("{:0>2}", digits)
    };

    format!("{}:{}:{}", part(1), part(2), part(3))
}

/// Strip protocol metadata and reformat field values on one record.
///
/// Non-object records normalize to an empty map; the gateway only ever
/// returns objects inside `results`.
pub fn normalize_record(value: Value) -> NormalizedRecord {
    let Value::Object(map) = value else {
        return NormalizedRecord::new();
    };

    map.into_iter()
        .filter(|(key, _)| key != METADATA_KEY)
        .map(|(key, value)| {
            let value = match value {
                Value::String(text) if text.starts_with("/Date(") => {
                    Value::String(format_gateway_date(&text))
                }
                Value::String(text) if text.starts_with("PT") => {
                    Value::String(format_gateway_duration(&text))
                }
                other => other,
            };
            (key, value)
        })
        .collect()
}

/// Flatten a single purchase-order entity into the console's
/// `{header, items}` shape.
///
/// The header is rebuilt from an explicit allow-list (missing fields default
/// to empty strings); items come from the expanded `TOITEM.results`
/// sub-collection.
pub fn flatten_document(entity: Value) -> DocumentDetail {
    let header: DocumentHeader =
        serde_json::from_value(entity.clone()).unwrap_or_default();

    let items = match entity.get(ITEMS_PROPERTY).and_then(|toitem| toitem.get("results")) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    };

    DocumentDetail { header, items }
}
