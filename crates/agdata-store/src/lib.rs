//! Record storage for the AgData record API.
//!
//! The store exclusively owns persisted [`Record`](agdata_types::Record)
//! state. Callers hold transient copies only.
//!
//! # Storage Backends
//!
//! All backends implement the [`RecordStore`] trait:
//!
//! - [`SqliteRecordStore`] -- durable `Records` table, one connection per operation
//! - [`InMemoryRecordStore`] -- `BTreeMap`-based store for tests and embedding
//!
//! # Rules
//!
//! 1. No two records share a name. The storage layer enforces this; callers
//!    may pre-check but the store never relies on it.
//! 2. Ids are assigned by the store on insert and never reused or changed.
//! 3. Lookups for missing rows return `None`. Only `update` fails on a
//!    missing target.
//! 4. Every storage failure is propagated, never retried.

pub mod config;
pub mod error;
pub mod memory;
pub mod sqlite;
pub mod traits;

pub use config::{JournalMode, SqliteStoreConfig};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryRecordStore;
pub use sqlite::SqliteRecordStore;
pub use traits::RecordStore;
