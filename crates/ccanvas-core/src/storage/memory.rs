//! In-memory storage implementation.

use super::{PersistedDocument, Storage, StorageError, StorageResult};
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
///
/// Every successful save is kept, so callers can count writes.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    writes: RwLock<Vec<PersistedDocument>>,
    fail_writes: bool,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose every save fails with an IO error.
    pub fn failing() -> Self {
        Self {
            writes: RwLock::default(),
            fail_writes: true,
        }
    }

    /// Number of successful saves.
    pub fn write_count(&self) -> usize {
        self.writes.read().map(|w| w.len()).unwrap_or(0)
    }

    /// The most recently saved document.
    pub fn last(&self) -> Option<PersistedDocument> {
        self.writes.read().ok().and_then(|w| w.last().cloned())
    }
}

impl Storage for MemoryStorage {
    fn save(&self, document: &PersistedDocument) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Io("Memory storage is read-only".to_string()));
        }
        let mut writes = self
            .writes
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        writes.push(document.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Line;

    #[test]
    fn test_counts_writes() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.write_count(), 0);
        assert!(storage.last().is_none());

        let doc = PersistedDocument::from_lines([&Line::new()]);
        storage.save(&doc).unwrap();
        storage.save(&doc).unwrap();

        assert_eq!(storage.write_count(), 2);
        assert_eq!(storage.last(), Some(doc));
    }

    #[test]
    fn test_failing_storage() {
        let storage = MemoryStorage::failing();
        assert!(storage.save(&PersistedDocument::new()).is_err());
        assert_eq!(storage.write_count(), 0);
    }
}
