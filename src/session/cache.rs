//! Persisted transaction-count slot.
//!
//! A single named slot holding the last known ledger count as a string,
//! read at startup as a fallback display value before any live fetch
//! completes.

use std::fs;
use std::io;
use std::path::PathBuf;

/// File-backed count slot. A `None` path disables persistence.
#[derive(Debug, Clone)]
pub struct CountCache {
    path: Option<PathBuf>,
}

impl CountCache {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// A cache that never persists; loads always miss.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// Read the slot. Any failure (missing file, unparseable content) is a
    /// miss; the caller falls back to live data.
    pub fn load(&self) -> Option<u64> {
        let path = self.path.as_ref()?;
        match fs::read_to_string(path) {
            Ok(content) => match content.trim().parse() {
                Ok(count) => {
                    tracing::debug!(count, "Loaded cached transaction count");
                    Some(count)
                }
                Err(_) => {
                    tracing::warn!(path = %path.display(), "Ignoring unparseable count slot");
                    None
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read count slot");
                None
            }
        }
    }

    /// Overwrite the slot with the latest count.
    pub fn store(&self, count: u64) -> io::Result<()> {
        if let Some(path) = &self.path {
            fs::write(path, count.to_string())?;
            tracing::debug!(count, "Persisted transaction count");
        }
        Ok(())
    }
}
