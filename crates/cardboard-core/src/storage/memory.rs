//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use crate::snapshot::BoardSnapshot;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
///
/// Slots hold serialized JSON, so a save/load cycle goes through the same
/// encoding as the file backend.
#[derive(Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put raw text into a slot, bypassing serialization.
    pub fn insert_raw(&self, key: &str, raw: impl Into<String>) -> StorageResult<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        slots.insert(key.to_string(), raw.into());
        Ok(())
    }

    /// Read the raw text of a slot.
    pub fn raw(&self, key: &str) -> StorageResult<Option<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(slots.get(key).cloned())
    }
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, snapshot: &BoardSnapshot) -> StorageResult<()> {
        let json = snapshot
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.insert_raw(key, json)
    }

    fn load(&self, key: &str) -> StorageResult<BoardSnapshot> {
        let json = self
            .raw(key)?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        BoardSnapshot::from_json(&json).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        slots.remove(key);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(slots.keys().cloned().collect())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let slots = self
            .slots
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(slots.contains_key(key))
    }
}
