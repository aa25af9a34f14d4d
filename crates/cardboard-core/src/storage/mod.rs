//! Storage abstraction for persistence.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::snapshot::BoardSnapshot;
use thiserror::Error;

/// Default slot name the board is saved under.
pub const DEFAULT_STORAGE_KEY: &str = "canvasState";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Board not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for board storage backends.
///
/// A backend is a set of named slots, each holding one serialized
/// [`BoardSnapshot`]. Saving overwrites a slot wholesale.
pub trait Storage: Send + Sync {
    /// Save a snapshot into a slot.
    fn save(&self, key: &str, snapshot: &BoardSnapshot) -> StorageResult<()>;

    /// Load the snapshot held in a slot.
    fn load(&self, key: &str) -> StorageResult<BoardSnapshot>;

    /// Delete a slot.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all slot names.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a slot exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}
