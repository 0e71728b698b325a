//! Foundation types for the AgData record API.
//!
//! Every other AgData crate depends on `agdata-types`.
//!
//! # Key Types
//!
//! - [`Record`] — the persisted entity (id, name, address)
//! - [`RecordId`] — store-assigned integer identifier
//! - [`RecordPayload`] — lenient inbound JSON body for create/update
//! - [`validate_name`] — the non-blank name rule

pub mod error;
pub mod name;
pub mod record;

pub use error::TypeError;
pub use name::{is_blank, validate_name};
pub use record::{Record, RecordId, RecordPayload};
