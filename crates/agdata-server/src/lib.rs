//! HTTP server for the AgData record API.
//!
//! Exposes CRUD over `/api/record` on top of any
//! [`RecordStore`](agdata_store::RecordStore), mapping service outcomes to
//! HTTP statuses: validation and conflict failures are 400 with a message,
//! missing records are 404, storage outages are 500.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod service;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult, ServiceError, ServiceResult, NAME_EXISTS};
pub use handler::HealthResponse;
pub use server::AgDataServer;
pub use service::RecordService;
