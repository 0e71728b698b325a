use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::service::RecordService;

/// HTTP endpoint paths.
pub mod endpoints {
    pub const HEALTH: &str = "/v1/health";
    pub const INFO: &str = "/v1/info";
    pub const RECORDS: &str = "/api/record";
    pub const RECORD: &str = "/api/record/:name";
}

/// Build the axum router with all record endpoints.
pub fn build_router(service: RecordService) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(handler::health_handler))
        .route(endpoints::INFO, get(handler::info_handler))
        .route(
            endpoints::RECORDS,
            get(handler::list_records).post(handler::create_record),
        )
        .route(
            endpoints::RECORD,
            get(handler::get_record)
                .put(handler::update_record)
                .delete(handler::delete_record),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
