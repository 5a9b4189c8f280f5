//! Shared application state.
//!
//! Everything a page or embedding surface needs to drive the client:
//! configuration, the session holder, the API surfaces, the form cache and
//! the shell.

use std::sync::Arc;

use crate::api::{AuthApi, LoanApi};
use crate::config::ConfigV1;
use crate::forms::FormCache;
use crate::session::SessionManager;
use crate::shell::Shell;

/// Application state handed to whatever embeds the client.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Exclusive owner of the authentication session.
    pub session: Arc<SessionManager>,
    /// Authentication endpoints.
    pub auth: Arc<AuthApi>,
    /// Loan submission endpoints.
    pub loans: Arc<LoanApi>,
    /// In-progress application + financial preview, session-scoped.
    pub forms: Arc<FormCache>,
    /// Notice/navigation surface.
    pub shell: Arc<dyn Shell>,
}
