use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::fields::convert_to_backend;

/// The enterprise loan application form as the client edits it. Serialized
/// with camelCase keys (the client-side naming); the field mapper translates
/// to backend names at the submission boundary.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanForm {
    pub ent_name: String,
    /// Unified social credit code, 18 alphanumeric characters.
    pub uscc: String,
    pub company_email: String,
    #[serde(default)]
    pub company_address: Option<String>,
    pub repay_account_bank: String,
    /// Repayment account number, 19 digits.
    pub repay_account_no: String,
    pub loan_amount: f64,
    /// Term in years, kept as the option value string ("0.5", "1", ... "30").
    pub loan_term: String,
    /// One of "credit", "mortgage", "tax".
    pub loan_purpose: String,
    pub prop_proof_type: String,
    #[serde(default)]
    pub industry_category: Option<String>,
}

impl LoanForm {
    /// Client-side validation, mirroring the backend's schema and business
    /// rules so bad input never reaches the network.
    pub fn validate(&self) -> Result<(), ClientError> {
        let mut errors: Vec<String> = Vec::new();

        if self.ent_name.trim().is_empty() {
            errors.push("enterprise name is required".to_string());
        }
        let uscc = self.uscc.trim();
        if uscc.len() != 18 || !uscc.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.push("unified social credit code must be 18 alphanumeric characters".to_string());
        }
        if !is_plausible_email(self.company_email.trim()) {
            errors.push("company email is not a valid address".to_string());
        }
        if self.repay_account_bank.trim().is_empty() {
            errors.push("repayment account bank is required".to_string());
        }
        let account_no = self.repay_account_no.trim();
        if account_no.len() != 19 || !account_no.chars().all(|c| c.is_ascii_digit()) {
            errors.push("repayment account number must be 19 digits".to_string());
        }
        if self.loan_amount <= 0.0 {
            errors.push("loan amount must be greater than 0".to_string());
        }
        if self.loan_term.trim().is_empty() {
            errors.push("loan term is required".to_string());
        }
        if self.loan_purpose.trim().is_empty() {
            errors.push("loan purpose is required".to_string());
        }
        if self.prop_proof_type.trim().is_empty() {
            errors.push("property proof type is required".to_string());
        }

        // Cross-field rules tying the term to the purpose.
        if let Ok(term_years) = self.loan_term.trim().parse::<f64>() {
            if self.loan_purpose == "credit" && term_years > 5.0 {
                errors.push("credit loans are limited to a 5 year term".to_string());
            }
            if self.loan_purpose == "tax" && term_years > 2.0 {
                errors.push("tax loans are limited to a 2 year term".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ClientError::Validation(errors.join("; ")))
        }
    }

    /// The form as a flat backend-named map, ready to become multipart text
    /// parts.
    pub fn backend_fields(&self) -> Map<String, Value> {
        let value = serde_json::to_value(self).unwrap_or(Value::Null);
        match value {
            Value::Object(map) => convert_to_backend(&map),
            _ => Map::new(),
        }
    }
}

fn is_plausible_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

/// The property proof document the user attached to the form.
#[derive(Debug, Clone)]
pub struct PropertyProof {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Where the backend put an uploaded document.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FileInfo {
    pub file_path: Option<String>,
    pub file_name: Option<String>,
}

/// One period of derived financial data, as charted on the confirm page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FinancialEntry {
    pub period: String,
    pub profit: i64,
    #[serde(default)]
    pub yoy: Option<String>,
    #[serde(default)]
    pub qoq: Option<String>,
}

/// What `/loan/apply` hands back: the echoed (validated) form data, the
/// uploaded file info, and the financial preview. Nothing is persisted yet.
#[derive(Deserialize, Debug, Clone)]
pub struct ReviewData {
    pub loan_data: Value,
    pub file_info: FileInfo,
    #[serde(default)]
    pub financial_data: Vec<FinancialEntry>,
}

/// The persisted application record returned by `/loan/confirm`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoanApplication {
    pub id: i64,
    pub ent_name: String,
    pub uscc: String,
    pub company_email: String,
    #[serde(default)]
    pub company_address: Option<String>,
    pub repay_account_bank: String,
    pub repay_account_no: String,
    pub loan_amount: f64,
    pub loan_term: String,
    pub loan_purpose: String,
    pub prop_proof_type: String,
    #[serde(default)]
    pub prop_proof_docs: Option<String>,
    #[serde(default)]
    pub prop_proof_docs_name: Option<String>,
    #[serde(default)]
    pub industry_category: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
