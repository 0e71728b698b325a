use agdata_types::{Record, RecordId};

use crate::error::StoreResult;

/// Persistent storage of [`Record`]s.
///
/// All implementations must satisfy these invariants:
/// - Names are unique. A write that would duplicate a name fails with
///   `ConstraintViolation` and leaves existing records untouched.
/// - Ids are assigned on insert, never change, and are never reused.
/// - Only names with a non-whitespace character are persisted.
/// - Every operation is self-contained: no state spans two calls.
pub trait RecordStore: Send + Sync {
    /// Persist a new record and return the id assigned to it.
    ///
    /// Any id carried by `record` is ignored. The store does not pre-check
    /// the name; the uniqueness constraint decides.
    fn add(&self, record: &Record) -> StoreResult<RecordId>;

    /// Overwrite the name and address of the record with `record.id`.
    ///
    /// Returns `Err(NotFound)` if no such id exists, otherwise whether a row
    /// was modified.
    fn update(&self, record: &Record) -> StoreResult<bool>;

    /// Delete the record with this exact name. Returns `true` if one existed.
    fn delete(&self, name: &str) -> StoreResult<bool>;

    /// Look up a record by exact name.
    fn get(&self, name: &str) -> StoreResult<Option<Record>>;

    /// Look up a record by id.
    fn get_by_id(&self, id: RecordId) -> StoreResult<Option<Record>>;

    /// All records, in ascending id order.
    fn get_all(&self) -> StoreResult<Vec<Record>>;

    /// Check whether a record with this exact name exists.
    fn exists(&self, name: &str) -> StoreResult<bool>;

    /// Number of stored records.
    fn count(&self) -> StoreResult<u64> {
        Ok(self.get_all()?.len() as u64)
    }
}
