//! HTTP server wiring for the trigger and health endpoints.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::blockchain::{ChainClient, CylinderContract};
use crate::config::MinterConfig;
use crate::http::handlers;
use crate::mint::MintOrchestrator;
use crate::store::RestRecordStore;

/// Application state injected into handlers.
///
/// The orchestrator and the health check share the chain client read-only;
/// only the orchestrator holds a store handle.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<MintOrchestrator<CylinderContract, RestRecordStore>>,
    pub client: ChainClient,
    pub contract_address: Address,
    pub network: String,
}

/// HTTP server exposing the trigger and health endpoints.
pub struct MinterServer {
    router: Router,
}

impl MinterServer {
    pub fn new(config: &MinterConfig, state: AppState) -> Self {
        let router = Router::new()
            .route("/cylinders/{id}/created", post(handlers::cylinder_created))
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}
