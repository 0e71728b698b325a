use std::sync::Arc;

use agdata_store::{RecordStore, StoreResult};
use agdata_types::{is_blank, Record, RecordId, TypeError};

use crate::error::{ServiceError, ServiceResult, NAME_EXISTS};

/// Request-level logic over a [`RecordStore`].
///
/// Validates input, branches on existence, and classifies outcomes. Each
/// call is independent; the existence pre-checks are not atomic with the
/// mutation that follows, so the store's unique index remains the final
/// word on duplicate names.
///
/// Store calls run on tokio's blocking pool.
#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    async fn run<T, F>(&self, op: F) -> ServiceResult<T>
    where
        F: FnOnce(&dyn RecordStore) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| ServiceError::Internal(format!("store task failed: {e}")))?
            .map_err(ServiceError::from)
    }

    async fn exists(&self, name: &str) -> ServiceResult<bool> {
        let name = name.to_owned();
        self.run(move |store| store.exists(&name)).await
    }

    /// Create a record, returning the id the store assigned.
    pub async fn create(&self, record: Record) -> ServiceResult<RecordId> {
        tracing::debug!(name = %record.name, "create record");
        if is_blank(&record.name) {
            tracing::warn!("create rejected: blank name");
            return Err(ServiceError::Validation(TypeError::BlankName.to_string()));
        }
        if self.exists(&record.name).await? {
            tracing::warn!(name = %record.name, "create rejected: name exists");
            return Err(ServiceError::Conflict(NAME_EXISTS.to_owned()));
        }
        let name = record.name.clone();
        let id = self.run(move |store| store.add(&record)).await?;
        tracing::info!(%id, %name, "record created");
        Ok(id)
    }

    /// Every stored record.
    pub async fn list(&self) -> ServiceResult<Vec<Record>> {
        self.run(|store| store.get_all()).await
    }

    pub async fn get(&self, name: &str) -> ServiceResult<Record> {
        let owned = name.to_owned();
        self.run(move |store| store.get(&owned))
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Replace the name and address of an existing record.
    ///
    /// The record must exist under `record.name`. An unassigned id is
    /// resolved from the record stored under that name.
    pub async fn update(&self, mut record: Record) -> ServiceResult<()> {
        tracing::debug!(id = %record.id, name = %record.name, "update record");
        if !self.exists(&record.name).await? {
            tracing::warn!(name = %record.name, "update rejected: not found");
            return Err(ServiceError::NotFound);
        }
        if !record.id.is_assigned() {
            record.id = self.get(&record.name).await?.id;
        }
        let id = record.id;
        if self.run(move |store| store.update(&record)).await? {
            tracing::info!(%id, "record updated");
            Ok(())
        } else {
            Err(ServiceError::Failed("update modified no record"))
        }
    }

    pub async fn delete(&self, name: &str) -> ServiceResult<()> {
        tracing::debug!(name, "delete record");
        if !self.exists(name).await? {
            tracing::warn!(name, "delete rejected: not found");
            return Err(ServiceError::NotFound);
        }
        let owned = name.to_owned();
        if self.run(move |store| store.delete(&owned)).await? {
            tracing::info!(name, "record deleted");
            Ok(())
        } else {
            Err(ServiceError::Failed("delete removed no record"))
        }
    }
}

impl std::fmt::Debug for RecordService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordService").finish_non_exhaustive()
    }
}
