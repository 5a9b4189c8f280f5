//! The two-phase loan submission endpoints: validate-and-upload (preview,
//! nothing persisted) and confirm (persisted application record).

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::error::ClientError;
use crate::http::Pipeline;
use crate::models::{FileInfo, LoanApplication, LoanForm, PropertyProof, ReviewData};

pub struct LoanApi {
    pipeline: Arc<Pipeline>,
}

impl LoanApi {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        LoanApi { pipeline }
    }

    /// Phase one: validate the form and upload the proof document. The
    /// backend echoes the validated data and derives the financial preview;
    /// nothing is persisted yet.
    pub async fn validate_and_upload(
        &self,
        form: &LoanForm,
        proof: &PropertyProof,
    ) -> Result<ReviewData, ClientError> {
        form.validate()?;
        if proof.file_name.trim().is_empty() || proof.bytes.is_empty() {
            return Err(ClientError::Validation(
                "a property proof document must be attached".to_string(),
            ));
        }

        let part = Part::bytes(proof.bytes.clone()).file_name(proof.file_name.clone());
        let multipart = form_fields(form).part("prop_proof_docs", part);
        self.pipeline.post_multipart("/loan/apply", multipart).await
    }

    /// Phase two: confirm the reviewed application. The proof document was
    /// already uploaded in phase one, so only its stored location travels
    /// along.
    pub async fn confirm_loan(
        &self,
        form: &LoanForm,
        file_info: &FileInfo,
    ) -> Result<LoanApplication, ClientError> {
        form.validate()?;
        let (Some(file_path), Some(file_name)) = (&file_info.file_path, &file_info.file_name)
        else {
            return Err(ClientError::Validation(
                "the proof document has not been uploaded yet".to_string(),
            ));
        };

        let multipart = form_fields(form)
            .text("prop_proof_docs", file_path.clone())
            .text("prop_proof_docs_name", file_name.clone());
        self.pipeline.post_multipart("/loan/confirm", multipart).await
    }
}

/// The form as multipart text parts under backend field names. Optional
/// fields that were never filled in are simply omitted.
fn form_fields(form: &LoanForm) -> Form {
    let mut multipart = Form::new();
    for (key, value) in form.backend_fields() {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            other => other.to_string(),
        };
        multipart = multipart.text(key, text);
    }
    multipart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::forms::FormCache;
    use crate::session::SessionManager;
    use crate::shell::RecordingShell;
    use crate::store::memory_store::MemoryStore;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn api_for(server_url: &str) -> LoanApi {
        let shell = Arc::new(RecordingShell::new());
        let session = Arc::new(SessionManager::new(
            Arc::new(MemoryStore::new()),
            Arc::new(FormCache::new()),
            shell.clone(),
        ));
        let config = ApiConfig {
            base_url: server_url.to_string(),
            timeout_seconds: 5,
        };
        let pipeline = Arc::new(Pipeline::new(&config, session, shell).unwrap());
        LoanApi::new(pipeline)
    }

    fn valid_form() -> LoanForm {
        LoanForm {
            ent_name: "Acme Manufacturing".to_string(),
            uscc: "91330100MA27XW2H5X".to_string(),
            company_email: "finance@acme.example".to_string(),
            company_address: None,
            repay_account_bank: "chinaBank".to_string(),
            repay_account_no: "6222021234567890123".to_string(),
            loan_amount: 500_000.0,
            loan_term: "3".to_string(),
            loan_purpose: "mortgage".to_string(),
            prop_proof_type: "estateCertificate".to_string(),
            industry_category: None,
        }
    }

    fn proof() -> PropertyProof {
        PropertyProof {
            file_name: "deed.pdf".to_string(),
            bytes: b"%PDF-1.4 ...".to_vec(),
        }
    }

    /// The multipart body carries backend field names and the file part.
    #[tokio::test]
    async fn test_validate_and_upload_sends_backend_named_parts() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/loan/apply")
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data.*".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("name=\"ent_name\"".to_string()),
                Matcher::Regex("Acme Manufacturing".to_string()),
                Matcher::Regex("name=\"repay_account_no\"".to_string()),
                Matcher::Regex("name=\"prop_proof_docs\"".to_string()),
                Matcher::Regex("filename=\"deed.pdf\"".to_string()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "code": 0,
                    "msg": "validated",
                    "data": {
                        "loan_data": {"ent_name": "Acme Manufacturing"},
                        "file_info": {"file_path": "uploads/1_deed.pdf", "file_name": "deed.pdf"},
                        "financial_data": [
                            {"period": "2025Q4", "profit": 1200, "yoy": "+10%", "qoq": "-2%"}
                        ]
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let api = api_for(&server.url());
        let review = api.validate_and_upload(&valid_form(), &proof()).await.unwrap();
        m.assert_async().await;
        assert_eq!(review.file_info.file_name.as_deref(), Some("deed.pdf"));
        assert_eq!(review.financial_data.len(), 1);
        assert_eq!(review.financial_data[0].profit, 1200);
    }

    /// Local validation stops a bad form before any request is made.
    #[tokio::test]
    async fn test_invalid_form_never_reaches_the_network() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/loan/apply")
            .expect(0)
            .create_async()
            .await;

        let api = api_for(&server.url());
        let mut form = valid_form();
        form.uscc = "nope".to_string();
        let err = api.validate_and_upload(&form, &proof()).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        m.assert_async().await;
    }

    /// A missing attachment is a local validation error too.
    #[tokio::test]
    async fn test_missing_attachment_is_rejected_locally() {
        let api = api_for("http://127.0.0.1:9");
        let empty = PropertyProof {
            file_name: String::new(),
            bytes: Vec::new(),
        };
        let err = api
            .validate_and_upload(&valid_form(), &empty)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    /// Confirm sends the stored file location instead of re-uploading.
    #[tokio::test]
    async fn test_confirm_sends_uploaded_file_location() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/loan/confirm")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("name=\"prop_proof_docs\"".to_string()),
                Matcher::Regex("uploads/1_deed.pdf".to_string()),
                Matcher::Regex("name=\"prop_proof_docs_name\"".to_string()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "code": 0,
                    "msg": "saved",
                    "data": {
                        "id": 31,
                        "ent_name": "Acme Manufacturing",
                        "uscc": "91330100MA27XW2H5X",
                        "company_email": "finance@acme.example",
                        "repay_account_bank": "chinaBank",
                        "repay_account_no": "6222021234567890123",
                        "loan_amount": 500000.0,
                        "loan_term": "3",
                        "loan_purpose": "mortgage",
                        "prop_proof_type": "estateCertificate",
                        "prop_proof_docs": "uploads/1_deed.pdf",
                        "prop_proof_docs_name": "deed.pdf",
                        "created_at": "2026-08-30 10:00:00"
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let api = api_for(&server.url());
        let file_info = FileInfo {
            file_path: Some("uploads/1_deed.pdf".to_string()),
            file_name: Some("deed.pdf".to_string()),
        };
        let record = api.confirm_loan(&valid_form(), &file_info).await.unwrap();
        m.assert_async().await;
        assert_eq!(record.id, 31);
        assert_eq!(record.prop_proof_docs_name.as_deref(), Some("deed.pdf"));
    }

    /// Confirming before phase one uploaded anything fails locally.
    #[tokio::test]
    async fn test_confirm_requires_uploaded_file_info() {
        let api = api_for("http://127.0.0.1:9");
        let err = api
            .confirm_loan(&valid_form(), &FileInfo::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }
}
