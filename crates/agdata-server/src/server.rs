use std::sync::Arc;

use agdata_store::{RecordStore, SqliteRecordStore};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::service::RecordService;

/// AgData record API server.
pub struct AgDataServer {
    config: ServerConfig,
    service: RecordService,
}

impl AgDataServer {
    /// Build a server over an already opened store.
    pub fn new(config: ServerConfig, store: Arc<dyn RecordStore>) -> Self {
        Self {
            config,
            service: RecordService::new(store),
        }
    }

    /// Open the SQLite database named by `config` and build a server over it.
    pub fn open(config: ServerConfig) -> ServerResult<Self> {
        let store = SqliteRecordStore::open(config.database.clone())?;
        Ok(Self::new(config, Arc::new(store)))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn service(&self) -> &RecordService {
        &self.service
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.service.clone())
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("AgData server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
