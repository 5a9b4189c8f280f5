//! The request pipeline wrapped around every backend call: attaches the
//! bearer credential at send time, unwraps the uniform response envelope on
//! receive, and funnels credential invalidation back into the session
//! holder.

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::ClientError;
use crate::models::envelope::{ResponseEnvelope, CODE_AUTH};
use crate::routes::Route;
use crate::session::SessionManager;
use crate::shell::{Severity, Shell};

/// How long the invalidation notice stays readable before the user is sent
/// back to the login page. Slightly longer than the notice display time;
/// not a correctness requirement.
pub const SESSION_REDIRECT_DELAY: Duration = Duration::from_millis(2200);

/// Generic notice for calls that never produced a response.
pub const NOTICE_NETWORK_FAILURE: &str =
    "Network connection failed, please check your connection and try again";
/// Generic notice for 5xx replies.
pub const NOTICE_SERVER_ERROR: &str = "Server error, please try again later";
/// Generic notice for 404 replies.
pub const NOTICE_NOT_FOUND: &str = "The requested resource does not exist";

/// One pipeline serves the whole client. It holds no per-call state beyond
/// reading the current session snapshot at send time, so any number of
/// calls may be in flight concurrently; an invalidation triggered by one of
/// them only clears the shared session, which is idempotent.
pub struct Pipeline {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionManager>,
    shell: Arc<dyn Shell>,
}

impl Pipeline {
    pub fn new(
        config: &ApiConfig,
        session: Arc<SessionManager>,
        shell: Arc<dyn Shell>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build http client: {}", e)))?;

        Ok(Pipeline {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            shell,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.http.get(self.url(path))).await
    }

    /// POST with no body (e.g. logout).
    pub async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.http.post(self.url(path))).await
    }

    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ClientError> {
        self.execute(self.http.post(self.url(path)).json(body)).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ClientError> {
        self.execute(self.http.post(self.url(path)).multipart(form))
            .await
    }

    /// The single before-send / after-receive path every call goes through.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let session = self.session.snapshot().await;
        let request = if session.is_logged_in() {
            request.bearer_auth(session.token())
        } else {
            request
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                // No response at all: exactly one generic notice, here.
                warn!(error = %e, "request failed without a response");
                self.shell.notify(Severity::Error, NOTICE_NETWORK_FAILURE);
                return Err(ClientError::Network(e.to_string()));
            }
        };

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "response received");

        if !status.is_success() {
            if status.is_server_error() {
                self.shell.notify(Severity::Error, NOTICE_SERVER_ERROR);
            } else if status == StatusCode::NOT_FOUND {
                self.shell.notify(Severity::Error, NOTICE_NOT_FOUND);
            }
            let msg = response.text().await.unwrap_or_default();
            return Err(ClientError::Http {
                status: status.as_u16(),
                msg,
            });
        }

        let envelope: ResponseEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) => {
                self.shell.notify(Severity::Error, NOTICE_NETWORK_FAILURE);
                return Err(ClientError::Network(format!("unreadable response: {}", e)));
            }
        };

        if envelope.is_success() {
            return envelope.into_data();
        }

        if envelope.code == CODE_AUTH {
            // Credential invalid or expired: clear the session everywhere,
            // tell the user once, and send them back to login after the
            // notice has had time to be read.
            warn!(msg = %envelope.msg, "credential rejected; invalidating session");
            self.session.invalidate().await;
            self.shell.notify(Severity::Error, &envelope.msg);
            self.shell
                .schedule_redirect(Route::Login, SESSION_REDIRECT_DELAY);
            return Err(ClientError::Auth(envelope.msg));
        }

        // Other business errors are context-specific; display is left to
        // the caller.
        Err(ClientError::Business {
            code: envelope.code,
            msg: envelope.msg,
        })
    }
}
