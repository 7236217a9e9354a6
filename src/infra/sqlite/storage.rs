use std::path::PathBuf;

use tracing::debug;

use crate::infra::sqlite::queries::{clear_slots, delete_slot, list_slot_keys, read_slot, write_slot};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::storage::{SlotStorage, StorageError};

/// Slot storage in a single SQLite file, one row per slot.
pub struct SqliteSlotStorage {
    pub db_path: PathBuf,
}

impl SqliteSlotStorage {
    /// Creates the database file and schema if needed.
    pub fn open(db_path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let db_path = db_path.into();
        init_db(&db_path)?;
        debug!(path = %db_path.display(), "opened slot storage");
        Ok(Self { db_path })
    }
}

fn to_storage_error(err: anyhow::Error) -> StorageError {
    StorageError::Message(format!("{err:#}"))
}

impl SlotStorage for SqliteSlotStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        read_slot(&self.db_path, key).map_err(to_storage_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        write_slot(&self.db_path, key, value).map_err(to_storage_error)
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        delete_slot(&self.db_path, key).map_err(to_storage_error)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        list_slot_keys(&self.db_path).map_err(to_storage_error)
    }

    fn clear(&self) -> Result<(), StorageError> {
        clear_slots(&self.db_path).map_err(to_storage_error)
    }
}
