//! The authentication endpoints: login, logout, and the token validity
//! probe.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::http::Pipeline;
use crate::models::{UserProfile, UserType};

/// The login form. Validated locally before any network I/O.
#[derive(Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

impl LoginRequest {
    /// The backend's own rules, enforced client-side: a non-blank username
    /// and an exactly 8 character password.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.user_name.trim().is_empty() {
            return Err(ClientError::Validation("username is required".to_string()));
        }
        if self.password.chars().count() != 8 {
            return Err(ClientError::Validation(
                "password must be exactly 8 characters".to_string(),
            ));
        }
        Ok(())
    }
}

/// Payload of a successful login.
#[derive(Deserialize, Debug, Clone)]
pub struct LoginData {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: UserProfile,
}

/// Payload of a logout acknowledgement.
#[derive(Deserialize, Debug, Clone)]
pub struct LogoutData {
    #[serde(default)]
    pub username: Option<String>,
}

/// Payload of the token validity probe. No state changes server-side.
#[derive(Deserialize, Debug, Clone)]
pub struct TokenProbe {
    pub user_id: i64,
    pub username: String,
    pub user_type: UserType,
}

/// Thin surface over the `/auth/*` endpoints; all transport concerns live
/// in the pipeline.
pub struct AuthApi {
    pipeline: Arc<Pipeline>,
}

impl AuthApi {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        AuthApi { pipeline }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginData, ClientError> {
        self.pipeline.post_json("/auth/login", request).await
    }

    pub async fn logout(&self) -> Result<LogoutData, ClientError> {
        self.pipeline.post("/auth/logout").await
    }

    /// Probe whether the held credential is still accepted.
    pub async fn test_token(&self) -> Result<TokenProbe, ClientError> {
        self.pipeline.get("/auth/test").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_name: &str, password: &str) -> LoginRequest {
        LoginRequest {
            user_name: user_name.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_credentials_pass() {
        assert!(request("acme", "12345678").validate().is_ok());
    }

    #[test]
    fn test_blank_username_is_rejected() {
        assert!(request("   ", "12345678").validate().is_err());
    }

    #[test]
    fn test_password_must_be_exactly_eight_characters() {
        assert!(request("acme", "1234567").validate().is_err());
        assert!(request("acme", "123456789").validate().is_err());
        assert!(request("acme", "abcd1234").validate().is_ok());
    }
}
