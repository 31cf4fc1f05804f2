//! Error classification for failed gateway calls
//!
//! The gateway reports failures in two structurally different shapes: a
//! structured JSON body (`error.message.value`) and an XML body (plain or
//! namespace-prefixed). Both funnel through [`classify_response`]; transport
//! failures that never produced a response go through
//! [`classify_transport`]. The same XML machinery also extracts the
//! confirmation message a successful create/cancel returns in its Atom body.

use gatelink_domain::{ErrorOutcome, GatewayErrorKind};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::Value;

/// Classify a transport-level failure (no response received).
pub fn classify_transport(err: &reqwest::Error) -> ErrorOutcome {
    if err.is_connect() {
        ErrorOutcome::new(
            GatewayErrorKind::ConnectionRefused,
            "Cannot connect to SAP server. Connection refused.",
        )
        .with_detail(err.to_string())
    } else if err.is_timeout() {
        ErrorOutcome::new(
            GatewayErrorKind::Timeout,
            "SAP request timed out. Server not responding.",
        )
        .with_detail(err.to_string())
    } else {
        ErrorOutcome::new(GatewayErrorKind::UnknownError, err.to_string())
    }
}

/// Classify a non-success response body.
///
/// Decision order: XML error markers, structured JSON
/// (`error.message.value`), plain `message` field, raw text body, generic
/// fallback. The returned outcome mirrors the remote HTTP status.
pub fn classify_response(status: u16, body: &str) -> ErrorOutcome {
    let trimmed = body.trim();

    if trimmed.contains("<error") || trimmed.contains("<message") {
        return ErrorOutcome::new(GatewayErrorKind::BusinessError, extract_error_message(trimmed))
            .with_status(status)
            .with_detail(trimmed.to_string());
    }

    if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
        if let Some(value) =
            json.pointer("/error/message/value").and_then(Value::as_str)
        {
            return ErrorOutcome::new(GatewayErrorKind::BusinessError, value)
                .with_status(status)
                .with_detail(trimmed.to_string());
        }

        if let Some(message) = json.get("message").and_then(Value::as_str) {
            return ErrorOutcome::new(GatewayErrorKind::BusinessError, message)
                .with_status(status)
                .with_detail(trimmed.to_string());
        }

        return ErrorOutcome::new(
            GatewayErrorKind::UnknownError,
            format!("SAP request failed with status {}", status),
        )
        .with_status(status)
        .with_detail(trimmed.to_string());
    }

    if !trimmed.is_empty() {
        return ErrorOutcome::new(GatewayErrorKind::BusinessError, trimmed)
            .with_status(status);
    }

    ErrorOutcome::new(
        GatewayErrorKind::UnknownError,
        format!("SAP request failed with status {}", status),
    )
    .with_status(status)
}

/// Extract the human-readable message from a gateway XML error body.
///
/// Prefers `error/innererror/errordetails/errordetail/message`, falls back
/// to `error/message`. Namespace prefixes are ignored throughout. Returns
/// "SAP error occurred" when the structure doesn't match and
/// "Failed to parse SAP error message" when parsing itself fails.
pub fn extract_error_message(xml: &str) -> String {
    match scan_error_paths(xml) {
        Ok((detail, message)) => detail
            .or(message)
            .unwrap_or_else(|| "SAP error occurred".to_string()),
        Err(_) => "Failed to parse SAP error message".to_string(),
    }
}

/// Extract the confirmation message from a successful create/cancel Atom
/// response (`entry/content/properties/Message`, namespace-agnostic).
///
/// Absence is not an error: returns `None` for non-XML bodies, parse
/// failures, and entries without a message property.
pub fn extract_confirmation(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => {
                stack.push(String::from_utf8_lossy(element.local_name().as_ref()).into_owned());
            }
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Text(text)) => {
                if path_ends_with(&stack, &["properties", "Message"])
                    && stack.iter().any(|name| name == "entry")
                {
                    let value = text.unescape().ok()?.trim().to_string();
                    if !value.is_empty() {
                        return Some(value);
                    }
                }
            }
            Ok(Event::Eof) => return None,
            Ok(_) => {}
            Err(_) => return None,
        }
    }
}

/// Marker for XML bodies the reader could not walk to completion
struct XmlScanError;

/// Walk the XML once, capturing the first detail-path and first
/// error/message texts.
fn scan_error_paths(
    xml: &str,
) -> std::result::Result<(Option<String>, Option<String>), XmlScanError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut detail: Option<String> = None;
    let mut message: Option<String> = None;

    loop {
        match reader.read_event().map_err(|_| XmlScanError)? {
            Event::Start(element) => {
                stack.push(String::from_utf8_lossy(element.local_name().as_ref()).into_owned());
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(text) => {
                let value = text.unescape().map_err(|_| XmlScanError)?.trim().to_string();
                if value.is_empty() {
                    continue;
                }

                if detail.is_none()
                    && path_ends_with(
                        &stack,
                        &["error", "innererror", "errordetails", "errordetail", "message"],
                    )
                {
                    detail = Some(value);
                } else if message.is_none() && path_ends_with(&stack, &["error", "message"]) {
                    message = Some(value);
                }
            }
            // Unclosed tags at end of input are a parse failure, not a miss
            Event::Eof if !stack.is_empty() => return Err(XmlScanError),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok((detail, message))
}

fn path_ends_with(stack: &[String], suffix: &[&str]) -> bool {
    stack.len() >= suffix.len()
        && stack[stack.len() - suffix.len()..]
            .iter()
            .zip(suffix)
            .all(|(name, expected)| name == expected)
}
