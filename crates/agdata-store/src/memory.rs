use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use agdata_types::{Record, RecordId};

use crate::error::{StoreError, StoreResult};
use crate::traits::RecordStore;

#[derive(Default)]
struct Inner {
    records: BTreeMap<RecordId, Record>,
    last_id: i64,
}

impl Inner {
    fn name_taken(&self, name: &str, except: Option<RecordId>) -> bool {
        self.records
            .values()
            .any(|r| r.name == name && Some(r.id) != except)
    }
}

/// In-memory, `BTreeMap`-based record store.
///
/// Intended for tests and embedding. Mirrors the SQLite backend: unique
/// names, monotonically increasing ids that are never reused, ascending-id
/// listing. Data is lost when the store is dropped.
pub struct InMemoryRecordStore {
    inner: RwLock<Inner>,
}

impl InMemoryRecordStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.read().map(|inner| inner.records.len()).unwrap_or(0)
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn add(&self, record: &Record) -> StoreResult<RecordId> {
        record.validate()?;
        let mut inner = self.write()?;
        if inner.name_taken(&record.name, None) {
            return Err(StoreError::ConstraintViolation(format!(
                "error inserting record: name already stored: {}",
                record.name
            )));
        }
        inner.last_id += 1;
        let id = RecordId::new(inner.last_id);
        inner.records.insert(id, record.clone().with_id(id));
        Ok(id)
    }

    fn update(&self, record: &Record) -> StoreResult<bool> {
        record.validate()?;
        let mut inner = self.write()?;
        if !inner.records.contains_key(&record.id) {
            return Err(StoreError::NotFound(record.id));
        }
        if inner.name_taken(&record.name, Some(record.id)) {
            return Err(StoreError::ConstraintViolation(format!(
                "error updating record: name already stored: {}",
                record.name
            )));
        }
        inner.records.insert(record.id, record.clone());
        Ok(true)
    }

    fn delete(&self, name: &str) -> StoreResult<bool> {
        let mut inner = self.write()?;
        let id = inner
            .records
            .values()
            .find(|r| r.name == name)
            .map(|r| r.id);
        Ok(id.and_then(|id| inner.records.remove(&id)).is_some())
    }

    fn get(&self, name: &str) -> StoreResult<Option<Record>> {
        let inner = self.read()?;
        Ok(inner.records.values().find(|r| r.name == name).cloned())
    }

    fn get_by_id(&self, id: RecordId) -> StoreResult<Option<Record>> {
        let inner = self.read()?;
        Ok(inner.records.get(&id).cloned())
    }

    fn get_all(&self) -> StoreResult<Vec<Record>> {
        let inner = self.read()?;
        Ok(inner.records.values().cloned().collect())
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        let inner = self.read()?;
        Ok(inner.records.values().any(|r| r.name == name))
    }

    fn count(&self) -> StoreResult<u64> {
        Ok(self.read()?.records.len() as u64)
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("record_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract;
    use proptest::prelude::*;

    #[test]
    fn satisfies_store_contract() {
        contract::run_all(InMemoryRecordStore::new);
    }

    #[test]
    fn len_tracks_records() {
        let store = InMemoryRecordStore::new();
        assert!(store.is_empty());
        store.add(&Record::new("a", "1")).unwrap();
        store.add(&Record::new("b", "2")).unwrap();
        assert_eq!(store.len(), 2);
        store.delete("a").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_with_same_name_succeeds() {
        let store = InMemoryRecordStore::new();
        let id = store.add(&Record::new("John", "123 Main St")).unwrap();
        let moved = Record::new("John", "456 Oak Ave").with_id(id);
        assert!(store.update(&moved).unwrap());
        assert_eq!(store.get("John").unwrap().unwrap().address, "456 Oak Ave");
    }

    #[test]
    fn debug_shows_count() {
        let store = InMemoryRecordStore::new();
        store.add(&Record::new("a", "1")).unwrap();
        assert_eq!(
            format!("{store:?}"),
            "InMemoryRecordStore { record_count: 1 }"
        );
    }

    proptest! {
        #[test]
        fn names_stay_unique(names in proptest::collection::vec("[a-c]{1,2}", 1..24)) {
            let store = InMemoryRecordStore::new();
            for name in &names {
                let _ = store.add(&Record::new(name.clone(), "addr"));
            }
            let mut stored: Vec<String> =
                store.get_all().unwrap().into_iter().map(|r| r.name).collect();
            let total = stored.len();
            stored.sort();
            stored.dedup();
            prop_assert_eq!(stored.len(), total);

            let mut distinct = names.clone();
            distinct.sort();
            distinct.dedup();
            prop_assert_eq!(total, distinct.len());
        }
    }
}
