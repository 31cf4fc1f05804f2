//! Wire shapes exchanged with the operations console and the SAP gateway
//!
//! Field names follow the console's JSON contract: search criteria and
//! outcomes are camelCase, while anything that travels to or from the SAP
//! service keeps the gateway's own PascalCase field names (`Ebeln`, `Lifnr`,
//! ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A business record after envelope stripping and field formatting
pub type NormalizedRecord = serde_json::Map<String, Value>;

/// Optional search criteria for the gate-entry list operation
///
/// Every field is independently optional. A `from` bound with no matching
/// `to` collapses to an equality filter; an absent (or empty) `from`
/// suppresses the clause regardless of `to`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub document_from: Option<String>,
    pub document_to: Option<String>,
    pub partner_from: Option<String>,
    pub partner_to: Option<String>,
    pub invoice_from: Option<String>,
    pub invoice_to: Option<String>,
    pub plant: Option<String>,
}

impl FilterCriteria {
    /// True when no clause would be produced from these criteria
    pub fn is_empty(&self) -> bool {
        fn blank(field: &Option<String>) -> bool {
            field.as_deref().map_or(true, |value| value.trim().is_empty())
        }

        blank(&self.date_from)
            && blank(&self.document_from)
            && blank(&self.partner_from)
            && blank(&self.invoice_from)
            && blank(&self.plant)
    }
}

/// Flattened purchase-order header exposed to the console
///
/// Built from an explicit allow-list of gateway fields; anything the remote
/// record does not carry defaults to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHeader {
    #[serde(rename = "Lifnr", default)]
    pub lifnr: String,
    #[serde(rename = "Name1", default)]
    pub name1: String,
    #[serde(rename = "Ebeln", default)]
    pub ebeln: String,
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "SysTime", default)]
    pub sys_time: String,
    #[serde(rename = "VehIntime", default)]
    pub veh_intime: String,
    #[serde(rename = "VehicleNo", default)]
    pub vehicle_no: String,
    #[serde(rename = "InvNo", default)]
    pub inv_no: String,
    #[serde(rename = "LrNo", default)]
    pub lr_no: String,
    #[serde(rename = "Fcode", default)]
    pub fcode: String,
}

/// Single purchase order with its expanded item sub-collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentDetail {
    pub header: DocumentHeader,
    pub items: Vec<Value>,
}

/// One purchase-order line item selected for posting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentItem {
    #[serde(rename = "Ebelp")]
    pub ebelp: String,
    #[serde(rename = "Matnr")]
    pub matnr: String,
    #[serde(rename = "Maktx", default)]
    pub maktx: String,
    /// Quantity; the gateway expects `"0.000"` when the console sends none
    #[serde(rename = "Menge", default)]
    pub menge: Option<String>,
}

/// Console request to post (or check) a gate entry for a purchase order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateRequest {
    pub supplier_code: String,
    pub supplier_desc: String,
    pub vehicle_no: Option<String>,
    pub supplier_invoice: Option<String>,
    pub lr_no: Option<String>,
    /// Vehicle entry time as `PThhHmmMssS`; defaults to the posting time
    pub vehicle_in_time: Option<String>,
    /// Gateway function code: `CHECK` validates, `POST` books
    pub fcode: String,
    pub items: Vec<DocumentItem>,
}

/// Console request to cancel an existing gate entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    #[serde(rename = "GateentryNo", default)]
    pub gate_entry_no: String,
    #[serde(rename = "CancReason", default)]
    pub canc_reason: String,
}

/// Result of a create/check call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutcome {
    pub success: bool,
    pub message: String,
    /// Confirmation text extracted from the gateway's XML response body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_message: Option<String>,
    pub fcode: String,
}

/// Result of a cancel call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOutcome {
    pub success: bool,
    pub message: String,
}

/// Result of the gateway reachability probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub success: bool,
    pub status: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_deserialize_from_console_shape() {
        let json = r#"{
            "dateFrom": "2024-01-01",
            "dateTo": "2024-01-31",
            "partnerFrom": "5"
        }"#;

        let criteria: FilterCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.date_from.as_deref(), Some("2024-01-01"));
        assert_eq!(criteria.partner_from.as_deref(), Some("5"));
        assert!(criteria.partner_to.is_none());
        assert!(!criteria.is_empty());
    }

    #[test]
    fn criteria_with_only_to_bounds_count_as_empty() {
        let criteria = FilterCriteria {
            date_to: Some("2024-01-31".to_string()),
            partner_to: Some("9".to_string()),
            ..FilterCriteria::default()
        };
        assert!(criteria.is_empty());
    }

    #[test]
    fn criteria_with_blank_strings_count_as_empty() {
        let criteria = FilterCriteria {
            date_from: Some(String::new()),
            plant: Some("  ".to_string()),
            ..FilterCriteria::default()
        };
        assert!(criteria.is_empty());
    }

    #[test]
    fn header_defaults_missing_fields_to_empty_strings() {
        let header: DocumentHeader =
            serde_json::from_str(r#"{"Lifnr":"0001","Name1":"Acme"}"#).unwrap();
        assert_eq!(header.lifnr, "0001");
        assert_eq!(header.name1, "Acme");
        assert_eq!(header.ebeln, "");
        assert_eq!(header.fcode, "");
    }

    #[test]
    fn cancel_request_uses_gateway_field_names() {
        let request: CancelRequest =
            serde_json::from_str(r#"{"GateentryNo":"GE100","CancReason":"duplicate"}"#).unwrap();
        assert_eq!(request.gate_entry_no, "GE100");
        assert_eq!(request.canc_reason, "duplicate");
    }

    #[test]
    fn create_outcome_serializes_camel_case() {
        let outcome = CreateOutcome {
            success: true,
            message: "Posted successfully to SAP".to_string(),
            remote_message: None,
            fcode: "POST".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("remoteMessage").is_none());
    }
}
