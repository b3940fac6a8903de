//! Persistence of captured lines as a flat JSON document.

mod document;
mod file;
mod loader;
mod memory;

pub use document::{LineRecord, PersistedDocument};
pub use file::FileStorage;
pub use loader::{
    load_document, validate_coordinates_document, validate_file, FileSchema, LoadError,
    SchemaError, COORDINATES_SCHEMA,
};
pub use memory::MemoryStorage;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Destination for a session's document.
///
/// A save either writes the whole document or reports an error; it never
/// touches the session that produced the document.
pub trait Storage {
    /// Persist a document.
    fn save(&self, document: &PersistedDocument) -> StorageResult<()>;
}
