//! Load/save boundary for the progress document.
//!
//! Loading never fails on content: a missing record gives a fresh document,
//! unparsable JSON is logged and replaced by defaults, and everything else
//! goes through the structural migration.

use super::config::AppConfig;
use super::database::{Database, DatabaseError};
use super::migration::migrate;
use crate::progress::completion::reset_progress;
use crate::progress::types::SCHEMA_VERSION;
use crate::progress::ProgressDocument;
use chrono::NaiveDate;
use std::path::Path;
use thiserror::Error;

/// Record key used when none is configured.
pub const DEFAULT_RECORD_KEY: &str = "ai-quest-progress";

/// Persistent store for one learner's progress.
pub struct ProgressStore {
    db: Database,
    key: String,
    persistent: bool,
}

impl ProgressStore {
    /// Open the store described by `config`.
    ///
    /// If the database file cannot be opened, progress is kept in memory for
    /// this session only.
    pub fn open(config: &AppConfig) -> Result<Self, StoreError> {
        let path = config.database_path();
        match Self::open_at(&path, &config.storage.record_key) {
            Ok(store) => Ok(store),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not open progress database, progress will not be saved"
                );
                Self::in_memory(&config.storage.record_key)
            }
        }
    }

    /// Open a file-backed store.
    pub fn open_at(path: &Path, key: &str) -> Result<Self, StoreError> {
        let db = Database::open(path)?;
        tracing::debug!(path = %path.display(), "Progress database opened");
        Ok(Self {
            db,
            key: key.to_string(),
            persistent: true,
        })
    }

    /// Open a store that lives only as long as the process.
    pub fn in_memory(key: &str) -> Result<Self, StoreError> {
        Ok(Self {
            db: Database::open_in_memory()?,
            key: key.to_string(),
            persistent: false,
        })
    }

    /// Whether saved progress survives the process.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Name of the record this store reads and writes.
    pub fn record_key(&self) -> &str {
        &self.key
    }

    /// Load the stored document, migrated to the current shape.
    pub fn load(&self, today: NaiveDate) -> Result<ProgressDocument, StoreError> {
        let Some(body) = self.db.get_document(&self.key)? else {
            tracing::debug!(key = %self.key, "No stored progress, starting fresh");
            return Ok(ProgressDocument::new(today));
        };

        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(raw) => Ok(migrate(&raw, today)),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Stored progress is corrupt, using defaults");
                Ok(ProgressDocument::new(today))
            }
        }
    }

    /// Persist `doc`, replacing whatever was stored.
    pub fn save(&self, doc: &ProgressDocument) -> Result<(), StoreError> {
        let mut value =
            serde_json::to_value(doc).map_err(|e| StoreError::Serialization(e.to_string()))?;
        value["schemaVersion"] = serde_json::Value::from(SCHEMA_VERSION);
        let body =
            serde_json::to_string(&value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.db.put_document(&self.key, &body)?;
        Ok(())
    }

    /// Drop the stored record and return a fresh document.
    pub fn reset(&self, today: NaiveDate) -> Result<ProgressDocument, StoreError> {
        let removed = self.db.delete_document(&self.key)?;
        tracing::info!(key = %self.key, removed, "Progress reset");
        Ok(reset_progress(today))
    }

    /// Raw stored body, if any.
    pub fn raw(&self) -> Result<Option<String>, StoreError> {
        Ok(self.db.get_document(&self.key)?)
    }

    /// Overwrite the stored body verbatim.
    pub fn write_raw(&self, body: &str) -> Result<(), StoreError> {
        self.db.put_document(&self.key, body)?;
        Ok(())
    }
}

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
