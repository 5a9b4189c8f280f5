//! Client bootstrap: builds the store, session holder, pipeline and API
//! surfaces, restores the previous session, and decides where the user
//! should land.

use std::sync::Arc;

use tracing::info;

use crate::api::{AuthApi, LoanApi};
use crate::config::ConfigV1;
use crate::error::ClientError;
use crate::forms::FormCache;
use crate::http::Pipeline;
use crate::routes::{decide, Route, RouteDecision};
use crate::session::SessionManager;
use crate::shell::Shell;
use crate::state::AppState;
use crate::store::create_store;

/// Wire up the whole client against the given shell.
pub async fn build_state(
    config: Arc<ConfigV1>,
    shell: Arc<dyn Shell>,
) -> Result<AppState, ClientError> {
    let store = create_store(&config.storage).await;
    let forms = Arc::new(FormCache::new());
    let session = Arc::new(SessionManager::new(store, forms.clone(), shell.clone()));
    let pipeline = Arc::new(Pipeline::new(&config.api, session.clone(), shell.clone())?);

    Ok(AppState {
        config,
        session,
        auth: Arc::new(AuthApi::new(pipeline.clone())),
        loans: Arc::new(LoanApi::new(pipeline)),
        forms,
        shell,
    })
}

/// Cold-start sequence: restore the stored session, probe the restored
/// credential against the backend (an expired one funnels through the
/// normal invalidation path), and report where the gate sends the user.
pub async fn bootstrap(
    config: Arc<ConfigV1>,
    shell: Arc<dyn Shell>,
) -> Result<(AppState, Route), ClientError> {
    let state = build_state(config, shell).await?;

    let session = state.session.restore().await;
    if session.is_logged_in() {
        match state.auth.test_token().await {
            Ok(probe) => info!(user = %probe.username, "stored credential is still valid"),
            // The pipeline already invalidated the session and notified on
            // an auth rejection; anything else leaves the session in place
            // for a later retry.
            Err(e) => info!(error = %e, "stored credential probe failed"),
        }
    }

    let landing = match decide(&state.session.snapshot().await, Route::EnterpriseInput) {
        RouteDecision::Allow => Route::EnterpriseInput,
        RouteDecision::Redirect { to, .. } => to,
    };
    info!(path = landing.path(), "landing route decided");

    Ok((state, landing))
}
