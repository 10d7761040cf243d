//! Form state and its persistence capability.
//!
//! The reference UI kept its three form fields in browser local storage under
//! a fixed key. Server-side that becomes an explicit value object plus an
//! injected store, so the fields and the persistence mechanism are
//! independently testable.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Storage key carried over from the reference UI's local-storage schema.
pub const FORM_STATE_KEY: &str = "AI_RESUME_OPTIMIZER_FORM_DATA";

/// The three application-target fields a returning user finds pre-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub job_description: String,
    /// Stamped by the server on save; absent in states written by older clients.
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl FormState {
    /// Decodes a stored value, tolerating partial or older field sets.
    pub fn from_stored(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw)
            .map_err(|e| AppError::Store(format!("Stored form state is corrupt: {e}")))
    }

    pub fn to_stored(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Store(format!("Failed to encode form state: {e}")))
    }
}

/// Key-value persistence seam. Implement this to swap the backing store
/// without touching handlers. Carried in `AppState` as `Arc<dyn PersistenceStore>`.
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn save(&self, key: &str, value: &str) -> Result<(), AppError>;
}

/// File-backed store: one JSON file per key under the configured directory.
/// Keys are fixed constants, never user input, so they double as file names.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl PersistenceStore for FileStore {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Store(format!("Failed to read '{key}': {e}"))),
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Store(format!("Failed to create state dir: {e}")))?;
        tokio::fs::write(self.path_for(key), value)
            .await
            .map_err(|e| AppError::Store(format!("Failed to write '{key}': {e}")))
    }
}

/// In-memory store for tests and ephemeral deployments.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl PersistenceStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self
            .entries
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
