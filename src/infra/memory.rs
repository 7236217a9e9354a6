use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::usecase::ports::storage::{SlotStorage, StorageError};

/// Process-local slot storage. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    slots: Mutex<BTreeMap<String, String>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>, StorageError> {
        self.slots
            .lock()
            .map_err(|_| StorageError::Message("slot storage lock poisoned".to_string()))
    }
}

impl SlotStorage for MemorySlotStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.slots()?.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.slots()?.keys().cloned().collect())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.slots()?.clear();
        Ok(())
    }
}
