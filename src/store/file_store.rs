use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use super::SessionStore;
use crate::models::PersistedSession;

/// Config for the file-backed session store.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct FileStoreConfig {
    /// Where the session JSON lives, e.g. "~/.local/state/loanflow/session.json".
    pub path: PathBuf,
}

/// Durable session storage as a single JSON file. The write goes to a
/// temporary sibling first and is renamed into place, so a crash mid-write
/// never leaves a half-updated mirror behind.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(config: &FileStoreConfig) -> Self {
        FileStore {
            path: config.path.clone(),
        }
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn load(&self) -> Result<Option<PersistedSession>, String> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(format!("failed to read {}: {}", self.path.display(), e)),
        };
        let session: PersistedSession = serde_json::from_str(&raw)
            .map_err(|e| format!("corrupt session file {}: {}", self.path.display(), e))?;
        Ok(Some(session))
    }

    async fn save(&self, session: &PersistedSession) -> Result<(), String> {
        let body = serde_json::to_string_pretty(session)
            .map_err(|e| format!("failed to encode session: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("failed to create {}: {}", parent.display(), e))?;
        }

        let tmp = self.path.with_extension(format!("tmp.{}", Uuid::new_v4()));
        fs::write(&tmp, body)
            .await
            .map_err(|e| format!("failed to write {}: {}", tmp.display(), e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| format!("failed to move session file into place: {}", e))?;

        debug!(path = %self.path.display(), "session mirrored to disk");
        Ok(())
    }

    async fn clear(&self) -> Result<(), String> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("failed to remove {}: {}", self.path.display(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Session, UserProfile, UserType};

    fn temp_store() -> FileStore {
        let path = std::env::temp_dir().join(format!("loanflow-test-{}.json", Uuid::new_v4()));
        FileStore::new(&FileStoreConfig { path })
    }

    fn persisted() -> PersistedSession {
        let session = Session::authenticated(
            "tok",
            UserProfile {
                id: 9,
                user_name: "acme".to_string(),
                user_type: UserType::Individual,
                created_at: None,
                updated_at: None,
            },
        )
        .unwrap();
        PersistedSession::of(&session)
    }

    #[tokio::test]
    async fn test_missing_file_loads_as_none() {
        let store = temp_store();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = temp_store();
        store.save(&persisted()).await.unwrap();

        let loaded = store.load().await.unwrap().expect("expected a session");
        assert_eq!(loaded.token, "tok");
        assert_eq!(
            loaded.profile.as_ref().map(|p| p.user_type),
            Some(UserType::Individual)
        );

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        // Clearing again must still succeed.
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let store = temp_store();
        fs::write(&store.path, "not json").await.unwrap();
        assert!(store.load().await.is_err());
        store.clear().await.unwrap();
    }
}
