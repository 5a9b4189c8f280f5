use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::store::file_store::FileStoreConfig;

/// A wrapper for the session-storage configuration:
/// - enabled: if false, nothing survives a restart (MemoryStore).
/// - backend: the actual storage backend (file, etc.).
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct StorageConfig {
    pub enabled: bool,
    #[serde(flatten)]
    pub backend: Option<StorageBackend>,
}

/// The available storage backends, differentiated via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
#[serde(tag = "type")]
pub enum StorageBackend {
    #[serde(rename = "file")]
    File(FileStoreConfig),
}
