use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;

/// Success code in the backend envelope.
pub const CODE_OK: i64 = 0;
/// Generic business failure.
pub const CODE_ERROR: i64 = 10001;
/// Server-side validation failure.
pub const CODE_VALIDATION: i64 = 10002;
/// Credential invalid or expired. Reserved: the pipeline treats this as a
/// session-invalidated event.
pub const CODE_AUTH: i64 = 10003;
/// Resource does not exist.
pub const CODE_NOT_FOUND: i64 = 10004;
/// File upload/handling failure.
pub const CODE_FILE: i64 = 10005;
/// Unhandled server error.
pub const CODE_SERVER: i64 = 10006;

/// The uniform shape of every backend reply, regardless of transport status.
///
/// The backend answers HTTP 200 even for business failures; `code` is the
/// real outcome. `code == 0` signals success and any nonzero code a
/// business-level failure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ResponseEnvelope {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl ResponseEnvelope {
    pub fn is_success(&self) -> bool {
        self.code == CODE_OK
    }

    /// Deserialize the `data` payload into the caller's type.
    pub fn into_data<T: serde::de::DeserializeOwned>(self) -> Result<T, ClientError> {
        serde_json::from_value(self.data)
            .map_err(|e| ClientError::Network(format!("malformed response payload: {}", e)))
    }
}
