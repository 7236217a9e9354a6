use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::domain::entities::record::Entity;
use crate::error::{CrmError, Result};
use crate::usecase::ports::storage::SlotStorage;

pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

static LAST_ID_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Millisecond timestamp id, bumped past the previous one so ids handed out by
/// this process never repeat. Ids from other processes may still collide.
pub fn timestamp_id() -> String {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ID_MILLIS.load(Ordering::Relaxed);
    loop {
        let next = if now > last { now } else { last + 1 };
        match LAST_ID_MILLIS.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next.to_string(),
            Err(current) => last = current,
        }
    }
}

pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Reads one slot as a JSON value. Absent or blank slots are `None`.
pub(crate) fn read_json<T: DeserializeOwned>(storage: &dyn SlotStorage, key: &str) -> Result<Option<T>> {
    let Some(blob) = storage.get(key)? else {
        return Ok(None);
    };
    if blob.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&blob).map(Some).map_err(|source| {
        warn!(key, error = %source, "stored slot is corrupt");
        CrmError::Corrupt {
            key: key.to_string(),
            source,
        }
    })
}

pub(crate) fn write_json<T: Serialize + ?Sized>(storage: &dyn SlotStorage, key: &str, value: &T) -> Result<()> {
    let blob = serde_json::to_string(value).map_err(|source| CrmError::Serialize {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &blob)?;
    Ok(())
}

/// Overwrites the fields named in `patch` on `existing`. `id` is never
/// patched. Values of the wrong shape are rejected.
pub(crate) fn merge_patch<T: Serialize + DeserializeOwned>(existing: &T, patch: Map<String, Value>) -> Result<T> {
    let mut value = serde_json::to_value(existing).map_err(CrmError::InvalidRecord)?;
    if let Value::Object(fields) = &mut value {
        for (field, field_value) in patch {
            if field == "id" {
                continue;
            }
            fields.insert(field, field_value);
        }
    }
    serde_json::from_value(value).map_err(CrmError::InvalidRecord)
}

/// CRUD over one entity collection persisted as a single JSON array.
///
/// Every mutation reads the whole collection, changes it, and writes it back
/// in one storage call. Reads always return a fresh copy, so callers cannot
/// change stored data without going through the store.
pub struct RecordStore<T: Entity> {
    storage: Arc<dyn SlotStorage>,
    key: String,
    seed: fn() -> Vec<T>,
    ids: IdGenerator,
    clock: Clock,
}

impl<T: Entity> RecordStore<T> {
    pub fn new(storage: Arc<dyn SlotStorage>, key: impl Into<String>, seed: fn() -> Vec<T>) -> Self {
        Self {
            storage,
            key: key.into(),
            seed,
            ids: Arc::new(timestamp_id),
            clock: system_clock(),
        }
    }

    /// Store under the entity kind's own slot key.
    pub fn for_entity(storage: Arc<dyn SlotStorage>, seed: fn() -> Vec<T>) -> Self {
        Self::new(storage, T::KIND.slot_key(), seed)
    }

    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get_all(&self) -> Result<Vec<T>> {
        Ok(read_json(self.storage.as_ref(), &self.key)?.unwrap_or_default())
    }

    pub fn get(&self, id: &str) -> Result<Option<T>> {
        Ok(self.get_all()?.into_iter().find(|record| record.id() == id))
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.get_all()?.len())
    }

    /// Assigns an id and creation stamp when missing, appends, and persists.
    pub fn add(&self, record: T) -> Result<T> {
        let record = self.prepare_new(record);
        record.validate()?;

        let mut records = self.get_all()?;
        records.push(record.clone());
        self.write(&records)?;
        debug!(key = %self.key, id = record.id(), "added record");
        Ok(record)
    }

    /// Like [`add`](Self::add) for several records, with a single write.
    pub fn add_many(&self, new_records: Vec<T>) -> Result<Vec<T>> {
        let prepared: Vec<T> = new_records
            .into_iter()
            .map(|record| self.prepare_new(record))
            .collect();
        for record in &prepared {
            record.validate()?;
        }
        if prepared.is_empty() {
            return Ok(prepared);
        }

        let mut records = self.get_all()?;
        records.extend(prepared.iter().cloned());
        self.write(&records)?;
        debug!(key = %self.key, count = prepared.len(), "added records");
        Ok(prepared)
    }

    /// Shallow-merges `patch` onto the record with `id` and stamps
    /// `updatedAt`. Returns `None` and writes nothing when `id` is unknown.
    pub fn update(&self, id: &str, patch: Map<String, Value>) -> Result<Option<T>> {
        self.apply(id, |existing| merge_patch(&existing, patch))
    }

    /// Typed counterpart of [`update`](Self::update).
    pub fn modify<F>(&self, id: &str, change: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut T),
    {
        self.apply(id, |mut existing| {
            change(&mut existing);
            Ok(existing)
        })
    }

    fn apply<F>(&self, id: &str, change: F) -> Result<Option<T>>
    where
        F: FnOnce(T) -> Result<T>,
    {
        let mut records = self.get_all()?;
        let Some(position) = records.iter().position(|record| record.id() == id) else {
            debug!(key = %self.key, id, "update skipped, record not found");
            return Ok(None);
        };

        let mut updated = change(records[position].clone())?;
        updated.set_id(id.to_string());
        updated.set_updated_at((self.clock)());
        updated.validate()?;

        records[position] = updated.clone();
        self.write(&records)?;
        debug!(key = %self.key, id, "updated record");
        Ok(Some(updated))
    }

    /// Removes the first record with `id`. Returns whether one was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.get_all()?;
        let before = records.len();
        if let Some(position) = records.iter().position(|record| record.id() == id) {
            records.remove(position);
        }
        if records.len() == before {
            debug!(key = %self.key, id, "delete skipped, record not found");
            return Ok(false);
        }

        self.write(&records)?;
        debug!(key = %self.key, id, "deleted record");
        Ok(true)
    }

    /// Replaces the whole collection.
    pub fn save(&self, records: &[T]) -> Result<()> {
        for record in records {
            record.validate()?;
        }
        self.write(records)
    }

    /// Seeds the collection when it is empty. Returns whether it seeded.
    pub fn init(&self) -> Result<bool> {
        if !self.get_all()?.is_empty() {
            return Ok(false);
        }
        let seeded: Vec<T> = (self.seed)()
            .into_iter()
            .map(|record| self.prepare_new(record))
            .collect();
        if seeded.is_empty() {
            return Ok(false);
        }

        self.save(&seeded)?;
        info!(key = %self.key, count = seeded.len(), "seeded collection");
        Ok(true)
    }

    /// Drops the slot entirely. Also the recovery path for a corrupt slot.
    pub fn clear(&self) -> Result<()> {
        if self.storage.remove(&self.key)? {
            info!(key = %self.key, "cleared collection");
        }
        Ok(())
    }

    fn prepare_new(&self, mut record: T) -> T {
        if record.id().is_empty() {
            record.set_id((self.ids)());
        }
        if record.created_at().is_none() {
            record.set_created_at((self.clock)());
        }
        record
    }

    fn write(&self, records: &[T]) -> Result<()> {
        write_json(self.storage.as_ref(), &self.key, records)
    }
}
