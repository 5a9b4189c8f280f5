//! Field-name translation between client-side (camelCase) and backend
//! (snake_case) naming for the loan application form.
//!
//! The table is bidirectional; any field absent from it passes through
//! unchanged in both directions, so new backend fields do not break
//! redisplay of stored records.

use serde_json::{Map, Value};

/// Client field name -> backend field name.
pub const LOAN_FORM_FIELD_MAP: &[(&str, &str)] = &[
    ("entName", "ent_name"),
    ("uscc", "uscc"),
    ("companyEmail", "company_email"),
    ("companyAddress", "company_address"),
    ("repayAccountBank", "repay_account_bank"),
    ("repayAccountNo", "repay_account_no"),
    ("loanAmount", "loan_amount"),
    ("loanTerm", "loan_term"),
    ("loanPurpose", "loan_purpose"),
    ("propProofType", "prop_proof_type"),
    ("industryCategory", "industry_category"),
];

/// Map a client field name to its backend name; unmapped keys pass through.
pub fn to_backend_key(key: &str) -> &str {
    LOAN_FORM_FIELD_MAP
        .iter()
        .find(|(client, _)| *client == key)
        .map(|(_, backend)| *backend)
        .unwrap_or(key)
}

/// Map a backend field name back to its client name; unmapped keys pass
/// through.
pub fn to_client_key(key: &str) -> &str {
    LOAN_FORM_FIELD_MAP
        .iter()
        .find(|(_, backend)| *backend == key)
        .map(|(client, _)| *client)
        .unwrap_or(key)
}

/// Rename every key of a client-shaped JSON object to backend naming.
/// Applied when serializing a form for submission.
pub fn convert_to_backend(client_data: &Map<String, Value>) -> Map<String, Value> {
    client_data
        .iter()
        .map(|(key, value)| (to_backend_key(key).to_string(), value.clone()))
        .collect()
}

/// Rename every key of a backend-shaped JSON object to client naming.
/// Applied when deserializing a stored record for redisplay.
pub fn convert_to_client(backend_data: &Map<String, Value>) -> Map<String, Value> {
    backend_data
        .iter()
        .map(|(key, value)| (to_client_key(key).to_string(), value.clone()))
        .collect()
}
