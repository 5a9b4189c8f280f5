//! The session state holder: owns the client's belief about who is logged
//! in, mirrors it to durable storage, and runs the login/logout flows.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::api::auth::{AuthApi, LoginRequest};
use crate::error::ClientError;
use crate::forms::FormCache;
use crate::models::{PersistedSession, Session};
use crate::routes::{home_for_role, Route};
use crate::shell::{Severity, Shell};
use crate::store::SessionStore;

/// Exclusive owner of the `Session`. Durable storage is a passive mirror;
/// every mutation goes through here so the token/profile invariant holds at
/// all times.
pub struct SessionManager {
    current: RwLock<Session>,
    store: Arc<dyn SessionStore>,
    forms: Arc<FormCache>,
    shell: Arc<dyn Shell>,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn SessionStore>,
        forms: Arc<FormCache>,
        shell: Arc<dyn Shell>,
    ) -> Self {
        SessionManager {
            current: RwLock::new(Session::empty()),
            store,
            forms,
            shell,
        }
    }

    /// The current session, by value. The pipeline reads this once per call
    /// at send time.
    pub async fn snapshot(&self) -> Session {
        self.current.read().await.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.current.read().await.is_logged_in()
    }

    /// Hydrate the session from durable storage on cold start.
    ///
    /// Absent data yields an empty session, never an error. Malformed or
    /// half-present data (a token without a profile, or undecodable JSON)
    /// forces a hard reset: the mirror is cleared and an empty session
    /// returned.
    pub async fn restore(&self) -> Session {
        let restored = match self.store.load().await {
            Ok(Some(persisted)) => match persisted.into_session() {
                Some(session) => session,
                None => {
                    warn!("stored session violates the token/profile invariant; resetting");
                    self.clear_mirror().await;
                    Session::empty()
                }
            },
            Ok(None) => Session::empty(),
            Err(e) => {
                warn!(error = %e, "failed to read stored session; resetting");
                self.clear_mirror().await;
                Session::empty()
            }
        };

        *self.current.write().await = restored.clone();
        if restored.is_logged_in() {
            info!(user = restored.profile().map(|p| p.user_name.as_str()).unwrap_or(""), "session restored");
        }
        restored
    }

    /// Log in against the backend. On success the whole session is replaced
    /// atomically, mirrored to storage, the stale form cache is dropped, and
    /// the user is sent to their role's home page.
    ///
    /// On failure the prior session is untouched. Business rejections are
    /// shown here (once); network and auth failures were already shown by
    /// the pipeline and only propagate.
    pub async fn login(
        &self,
        api: &AuthApi,
        request: &LoginRequest,
    ) -> Result<Session, ClientError> {
        request.validate()?;

        match api.login(request).await {
            Ok(data) => {
                let session = Session::authenticated(data.access_token, data.user)
                    .ok_or_else(|| {
                        ClientError::Network("login response carried no token".to_string())
                    })?;

                *self.current.write().await = session.clone();
                if let Err(e) = self.store.save(&PersistedSession::of(&session)).await {
                    warn!(error = %e, "failed to mirror session to storage");
                }
                // A fresh login must never see form state from a prior one.
                self.forms.clear();

                self.shell.notify(Severity::Success, "Logged in successfully");
                self.shell.navigate(home_for_role(session.user_type()));
                Ok(session)
            }
            Err(e) => {
                if !e.is_network() && !e.is_auth() {
                    self.shell.notify(Severity::Error, &e.to_string());
                }
                Err(e)
            }
        }
    }

    /// Log out. The remote call is best-effort; whatever happens, the local
    /// session, mirror and form cache are cleared and the user lands on the
    /// login page. Never fails visibly; invoking it twice is the same as
    /// once.
    pub async fn logout(&self, api: &AuthApi) {
        if self.is_logged_in().await {
            if let Err(e) = api.logout().await {
                warn!(error = %e, "remote logout failed; clearing local session anyway");
            }
        }

        self.invalidate().await;
        self.shell.notify(Severity::Success, "Logged out");
        self.shell.navigate(Route::Login);
    }

    /// Clear the session, its durable mirror and the form cache. Idempotent;
    /// also invoked by the request pipeline when the backend reports the
    /// credential invalid.
    pub async fn invalidate(&self) {
        *self.current.write().await = Session::empty();
        self.clear_mirror().await;
        self.forms.clear();
    }

    async fn clear_mirror(&self) {
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "failed to clear stored session");
        }
    }
}
