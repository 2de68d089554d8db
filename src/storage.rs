//! Well Store
//!
//! Persists imported wells to Sled DB so the CLI can run analyses across
//! invocations. Keys are the well names (UTF-8, so iteration is sorted by
//! name); values are JSON-serialized [`StoredWell`] records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::WellError;
use crate::types::{Well, WellImport};

/// Error type for storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored well is invalid: {0}")]
    InvalidWell(#[from] WellError),
}

/// Bookkeeping stored next to each well
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellMetadata {
    pub name: String,
    pub stored_at: DateTime<Utc>,
}

/// On-disk record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredWell {
    pub metadata: WellMetadata,
    pub well: WellImport,
}

/// Sled-backed collection of wells
#[derive(Clone)]
pub struct WellStore {
    db: Arc<sled::Db>,
}

impl WellStore {
    /// Open or create the store at the specified path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path.as_ref())?;
        info!(path = %path.as_ref().display(), wells = db.len(), "Opened well store");
        Ok(Self { db: Arc::new(db) })
    }

    /// Store a well, replacing any well with the same name.
    pub fn put(&self, well: &Well) -> Result<(), StorageError> {
        let record = StoredWell {
            metadata: WellMetadata {
                name: well.name().to_string(),
                stored_at: Utc::now(),
            },
            well: well.to_import(),
        };
        let value = serde_json::to_vec(&record)?;
        let previous = self.db.insert(well.name().as_bytes(), value)?;
        self.db.flush()?;
        debug!(well = %well.name(), replaced = previous.is_some(), "Stored well");
        Ok(())
    }

    /// Load a well by name.
    pub fn get(&self, name: &str) -> Result<Option<Well>, StorageError> {
        match self.get_record(name)? {
            Some(record) => Ok(Some(Well::from_import(record.well)?)),
            None => Ok(None),
        }
    }

    /// Load the raw record including metadata.
    pub fn get_record(&self, name: &str) -> Result<Option<StoredWell>, StorageError> {
        match self.db.get(name.as_bytes())? {
            Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
            None => Ok(None),
        }
    }

    /// All stored well names, sorted
    pub fn list_names(&self) -> Vec<String> {
        self.db
            .iter()
            .keys()
            .filter_map(|key| match key {
                Ok(k) => String::from_utf8(k.to_vec()).ok(),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable key");
                    None
                }
            })
            .collect()
    }

    /// All wells that load cleanly; broken records are logged and skipped.
    pub fn load_all(&self) -> Vec<Well> {
        self.list_names()
            .into_iter()
            .filter_map(|name| match self.get(&name) {
                Ok(well) => well,
                Err(e) => {
                    warn!(well = %name, error = %e, "Skipping unreadable well");
                    None
                }
            })
            .collect()
    }

    /// Remove a well. Returns whether it existed.
    pub fn remove(&self, name: &str) -> Result<bool, StorageError> {
        let existed = self.db.remove(name.as_bytes())?.is_some();
        if existed {
            self.db.flush()?;
        }
        Ok(existed)
    }

    pub fn count(&self) -> usize {
        self.db.len()
    }

    /// Clear all wells (use with caution!)
    pub fn clear(&self) -> Result<(), StorageError> {
        self.db.clear()?;
        self.db.flush()?;
        Ok(())
    }
}
