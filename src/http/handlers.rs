//! Trigger and health handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::blockchain::ChainError;
use crate::http::server::AppState;
use crate::mint::{CylinderRecord, MintError};

/// Health check response body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub network: NetworkInfo,
    pub current_block: u64,
    pub contract_address: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub name: String,
    pub chain_id: String,
}

/// `POST /cylinders/{id}/created`: one mint attempt per creation event.
///
/// At-least-once delivery is the caller's concern; this handler performs
/// exactly one attempt and reports the outcome.
pub async fn cylinder_created(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    Json(record): Json<CylinderRecord>,
) -> Response {
    let invocation_id = Uuid::new_v4();
    let span = tracing::info_span!("mint", %invocation_id, record_id = %record_id);

    let result = state
        .orchestrator
        .process_created(&record_id, &record)
        .instrument(span)
        .await;

    match result {
        Ok(success) => (StatusCode::OK, Json(success)).into_response(),
        Err(err) => {
            let status = error_status(&err);
            (
                status,
                Json(serde_json::json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

/// Map a pipeline error to the HTTP status reported to the trigger caller.
fn error_status(err: &MintError) -> StatusCode {
    match err {
        MintError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MintError::Chain(ChainError::Timeout(_))
        | MintError::Chain(ChainError::ConfirmationTimeout(_)) => StatusCode::GATEWAY_TIMEOUT,
        MintError::Chain(_) | MintError::Resolution(_) => StatusCode::BAD_GATEWAY,
        MintError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `GET /health`: blockchain connectivity check.
///
/// Reads chain id and block height through its own read-only view of the
/// chain client; never touches the record store.
pub async fn health(State(state): State<AppState>) -> Response {
    let chain_id = match state.client.chain_id().await {
        Ok(id) => id,
        Err(e) => return health_error(e),
    };
    let current_block = match state.client.block_number().await {
        Ok(n) => n,
        Err(e) => return health_error(e),
    };

    Json(HealthResponse {
        status: "connected",
        network: NetworkInfo {
            name: state.network.clone(),
            chain_id: chain_id.to_string(),
        },
        current_block,
        contract_address: state.contract_address.to_string(),
    })
    .into_response()
}

fn health_error(err: ChainError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": err.to_string() })),
    )
        .into_response()
}
