//! Board operation errors.

use crate::card::CardId;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors returned by board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Card not found: {0}")]
    NotFound(CardId),
    #[error("No connection at index {0}")]
    ConnectionNotFound(usize),
    #[error("Card {0} is not a task")]
    NotATask(CardId),
    #[error("Nothing to undo or redo")]
    EmptyHistory,
    #[error("No saved board in slot {0}")]
    PersistenceMiss(String),
    #[error("Saved board is malformed: {0}")]
    MalformedPersistedState(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
