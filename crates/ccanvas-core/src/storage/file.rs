//! File-based storage with a single fallback location.

use super::{PersistedDocument, Storage, StorageError, StorageResult};
use crate::config::DEFAULT_OUTPUT;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the document to a JSON file.
///
/// When the primary path cannot be written, the write is retried once at the
/// fallback path. A failure there is returned to the caller.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    fallback: Option<PathBuf>,
}

impl FileStorage {
    /// Storage at `path`, falling back to `coordinates.json` in the current directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fallback: Some(PathBuf::from(DEFAULT_OUTPUT)),
        }
    }

    /// Replace the fallback location.
    pub fn with_fallback(mut self, fallback: impl Into<PathBuf>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Disable the fallback retry.
    pub fn without_fallback(mut self) -> Self {
        self.fallback = None;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fallback(&self) -> Option<&Path> {
        self.fallback.as_deref()
    }
}

impl Storage for FileStorage {
    fn save(&self, document: &PersistedDocument) -> StorageResult<()> {
        let json = document
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let err = match write_file(&self.path, &json) {
            Ok(()) => {
                log::info!("Saved coordinates to {}", self.path.display());
                return Ok(());
            }
            Err(e) => e,
        };

        let Some(fallback) = self.fallback.as_deref().filter(|f| *f != self.path) else {
            return Err(err);
        };

        log::warn!("{}. Saving to {} instead", err, fallback.display());
        write_file(fallback, &json)?;
        log::info!("Saved coordinates to {}", fallback.display());
        Ok(())
    }
}

/// Write the already serialized document straight to `path`.
fn write_file(path: &Path, contents: &str) -> StorageResult<()> {
    fs::write(path, contents)
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
}
