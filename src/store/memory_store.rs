use std::sync::Mutex;

use async_trait::async_trait;

use super::SessionStore;
use crate::models::PersistedSession;

/// An in-process store. Used when persistence is disabled and in tests;
/// nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<PersistedSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self) -> Result<Option<PersistedSession>, String> {
        Ok(self.slot.lock().unwrap().clone())
    }

    async fn save(&self, session: &PersistedSession) -> Result<(), String> {
        *self.slot.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), String> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }
}
