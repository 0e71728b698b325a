use agdata_types::{Record, RecordPayload};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;
use crate::service::RecordService;

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "agdata-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn bind_record(payload: Result<Json<RecordPayload>, JsonRejection>) -> Result<Record, ApiError> {
    match payload {
        Ok(Json(payload)) => Ok(Record::from(payload)),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "rejected request body");
            Err(ApiError::bad_request(rejection.body_text()))
        }
    }
}

/// `POST /api/record`
pub async fn create_record(
    State(service): State<RecordService>,
    payload: Result<Json<RecordPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let record = bind_record(payload)?;
    service.create(record).await?;
    Ok(StatusCode::OK)
}

/// `GET /api/record`
pub async fn list_records(
    State(service): State<RecordService>,
) -> Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(service.list().await?))
}

/// `GET /api/record/{name}`
pub async fn get_record(
    State(service): State<RecordService>,
    Path(name): Path<String>,
) -> Result<Json<Record>, ApiError> {
    Ok(Json(service.get(&name).await?))
}

/// `PUT /api/record/{name}`
///
/// The body names the record to update; the path name fills in a body that
/// omits it.
pub async fn update_record(
    State(service): State<RecordService>,
    Path(name): Path<String>,
    payload: Result<Json<RecordPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let mut record = bind_record(payload)?;
    if record.name.is_empty() {
        record.name = name;
    }
    service.update(record).await?;
    Ok(StatusCode::OK)
}

/// `DELETE /api/record/{name}`
pub async fn delete_record(
    State(service): State<RecordService>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete(&name).await?;
    Ok(StatusCode::OK)
}
