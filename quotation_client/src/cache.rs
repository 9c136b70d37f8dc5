//! Persistent snapshot of the last known quotation list.
//!
//! One JSON file holds the whole list; every save replaces it wholesale
//! and every load reads it back in full. There is no partial update at
//! this layer: `append` is a read-modify-write of the entire file, which
//! is not safe under concurrent writers. A single-writer client is the
//! assumed deployment.
use std::fs;
use std::path::PathBuf;

use log::debug;

use quotation_common::{QuotationError, QuotationRecord, Result};

/// File-backed store of the last fetched quotation list.
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    /// Creates a cache over the given file path.
    pub fn new(path: PathBuf) -> Self {
        SnapshotCache { path }
    }

    /// Default snapshot location under the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|base| base.join("quotation_client").join("snapshot.json"))
    }

    /// Replaces the stored snapshot with `records`.
    pub fn save(&self, records: &[QuotationRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QuotationError::Storage(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }
        let json = serde_json::to_string(records)?;
        fs::write(&self.path, json).map_err(|e| {
            QuotationError::Storage(format!("failed to write {}: {}", self.path.display(), e))
        })?;
        debug!(
            "Persisted {} quotations to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Reads the stored snapshot. A snapshot that was never written is an
    /// empty list; an unreadable or corrupt file is an error for the
    /// caller to degrade on.
    pub fn load(&self) -> Result<Vec<QuotationRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path).map_err(|e| {
            QuotationError::Storage(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Appends one record by rewriting the whole snapshot.
    pub fn append(&self, record: QuotationRecord) -> Result<()> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)
    }
}
