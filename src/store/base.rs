use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::file_store::FileStore;
use super::memory_store::MemoryStore;
use crate::config::{StorageBackend, StorageConfig};
use crate::models::PersistedSession;

/// The SessionStore trait abstracts the durable mirror of the session
/// (load, save, clear). Storage is a cache of the live session, never its
/// source of truth, so every error here is meant to be logged and swallowed
/// by the caller.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<PersistedSession>, String>;
    async fn save(&self, session: &PersistedSession) -> Result<(), String>;
    async fn clear(&self) -> Result<(), String>;
    fn is_durable(&self) -> bool {
        // Real backends survive a restart; the in-memory fallback reports
        // false so restore paths can log better messages.
        true
    }
}

/// Creates a concrete store implementation based on the StorageConfig.
/// If `storage.enabled = false`, returns the in-memory store. Otherwise,
/// picks the configured backend.
pub async fn create_store(config: &StorageConfig) -> Arc<dyn SessionStore> {
    if !config.enabled {
        info!("Session storage is disabled. Using MemoryStore.");
        return Arc::new(MemoryStore::new());
    }

    match &config.backend {
        Some(StorageBackend::File(file_config)) => {
            info!(path = %file_config.path.display(), "Using file-backed session store.");
            Arc::new(FileStore::new(file_config))
        }
        None => {
            tracing::error!("Storage is enabled, but no backend config is provided!");
            std::process::exit(1);
        }
    }
}
