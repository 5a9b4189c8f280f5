use std::sync::Arc;

use loanflow::config::{ApiConfig, ConfigV1, LoggingConfig, StorageConfig};
use loanflow::shell::RecordingShell;
use loanflow::startup::build_state;
use loanflow::state::AppState;

/// A config pointed at a mock backend, with persistence disabled so tests
/// never touch the filesystem.
pub fn test_config(base_url: &str) -> ConfigV1 {
    ConfigV1 {
        api: ApiConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 5,
        },
        storage: StorageConfig {
            enabled: false,
            backend: None,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "console".to_string(),
        },
    }
}

/// Build the full client against a mock backend, keeping hold of the
/// recording shell for effect assertions.
pub async fn build_app(base_url: &str) -> (AppState, Arc<RecordingShell>) {
    let shell = Arc::new(RecordingShell::new());
    let state = build_state(Arc::new(test_config(base_url)), shell.clone())
        .await
        .expect("failed to build app state");
    (state, shell)
}

/// The canonical successful login envelope for an enterprise user.
pub fn login_success_body(token: &str) -> String {
    serde_json::json!({
        "code": 0,
        "msg": "login ok",
        "data": {
            "access_token": token,
            "token_type": "Bearer",
            "user": {
                "id": 12,
                "user_name": "acme",
                "user_type": "ENTERPRISE",
                "created_at": "2026-01-05 09:00:00"
            }
        }
    })
    .to_string()
}
