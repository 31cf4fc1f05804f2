//! OData `$filter` expression builder
//!
//! Translates the console's structured search criteria into the gateway's
//! boolean filter grammar. Clause order is fixed (date, document number,
//! partner, invoice, plant) so identical criteria always produce identical
//! expressions.
//!
//! Inputs are already constrained to the expected character classes by the
//! caller; beyond zero-padding the fixed-width codes, no sanitization
//! happens here.

use gatelink_domain::FilterCriteria;

/// Width of the partner (vendor) code field on the gateway
const PARTNER_CODE_WIDTH: usize = 10;
/// Width of the plant code field on the gateway
const PLANT_CODE_WIDTH: usize = 4;

/// Build the OData `$filter` expression for the given criteria.
///
/// Returns an empty string when no clause applies. Each present clause is
/// parenthesized; clauses are joined with `and`.
pub fn build_filter(criteria: &FilterCriteria) -> String {
    let mut clauses: Vec<String> = Vec::new();

    if let Some(date_from) = present(&criteria.date_from) {
        match present(&criteria.date_to) {
            Some(date_to) => clauses.push(format!(
                "(SysDate ge datetime'{}T00:00:00' and SysDate le datetime'{}T23:59:59')",
                date_from, date_to
            )),
            None => {
                clauses.push(format!("(SysDate eq datetime'{}T00:00:00')", date_from));
            }
        }
    }

    if let Some(doc_from) = present(&criteria.document_from) {
        let doc_to = present(&criteria.document_to).unwrap_or(doc_from);
        clauses.push(range_clause("Ebeln", doc_from, doc_to));
    }

    if let Some(partner_from) = present(&criteria.partner_from) {
        let from = pad_code(partner_from, PARTNER_CODE_WIDTH);
        let to = pad_code(
            present(&criteria.partner_to).unwrap_or(partner_from),
            PARTNER_CODE_WIDTH,
        );
        clauses.push(range_clause("Lifnr", &from, &to));
    }

    if let Some(invoice_from) = present(&criteria.invoice_from) {
        let invoice_to = present(&criteria.invoice_to).unwrap_or(invoice_from);
        clauses.push(range_clause("InvNo", invoice_from, invoice_to));
    }

    if let Some(plant) = present(&criteria.plant) {
        clauses.push(format!("(Werks eq '{}')", pad_code(plant, PLANT_CODE_WIDTH)));
    }

    clauses.join(" and ")
}

/// Equality when both bounds agree, closed `ge`/`le` range otherwise
fn range_clause(field: &str, from: &str, to: &str) -> String {
    if from == to {
        format!("({} eq '{}')", field, from)
    } else {
        format!("({} ge '{}' and {} le '{}')", field, from, field, to)
    }
}

/// Left-pad fixed-width gateway codes with zeroes
fn pad_code(code: &str, width: usize) -> String {
    if code.len() >= width {
        code.to_string()
    } else {
        format!("{}{}", "0".repeat(width - code.len()), code)
    }
}

/// Treat empty and whitespace-only values as absent
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|value| !value.is_empty())
}
