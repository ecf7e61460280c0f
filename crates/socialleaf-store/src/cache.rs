use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use socialleaf_core::snapshot::{InstagramSnapshot, YoutubeSnapshot};

use crate::connections::write_json_atomic;
use crate::error::StoreError;

const CACHE_FILE: &str = "socialleaf_cached_data.json";

/// The persisted snapshot cache: whatever was last fetched, plus when.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheEnvelope {
    #[serde(default)]
    pub youtube: Option<YoutubeSnapshot>,
    #[serde(default)]
    pub instagram: Option<InstagramSnapshot>,
    /// Write time, epoch milliseconds.
    pub timestamp: i64,
}

/// File-backed snapshot cache with a fixed freshness window.
///
/// Callers pass `now` explicitly so the staleness boundary is testable
/// without clock control.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
    ttl_ms: i64,
}

impl SnapshotCache {
    #[must_use]
    pub fn new(data_dir: &Path, ttl_ms: i64) -> Self {
        Self {
            path: data_dir.join(CACHE_FILE),
            ttl_ms,
        }
    }

    /// Returns the envelope only while it is still inside the freshness
    /// window (`now - timestamp < ttl`). Missing, corrupt, and stale files
    /// all read as a cache miss; corruption is logged.
    #[must_use]
    pub fn load_fresh(&self, now_ms: i64) -> Option<CacheEnvelope> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read snapshot cache");
                return None;
            }
        };
        let envelope: CacheEnvelope = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to parse snapshot cache");
                return None;
            }
        };
        if now_ms - envelope.timestamp < self.ttl_ms {
            Some(envelope)
        } else {
            None
        }
    }

    /// Persists the envelope atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be written.
    pub fn store(&self, envelope: &CacheEnvelope) -> Result<(), StoreError> {
        write_json_atomic(&self.path, envelope)
    }

    /// Removes the persisted envelope. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for any failure other than the file already
    /// being absent.
    pub fn invalidate(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}
