//! Handlers for the scan control endpoints.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use lorascan_core::scan::ScanState;
use lorascan_core::types::ModelId;

use crate::error::{AppError, AppResult};
use crate::scanner::{ModelPresence, StartScan};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for the check-model endpoint.
///
/// `modelId` arrives as a raw string so a non-integer value can be
/// answered with a 400 and a message instead of a bare extractor
/// rejection.
#[derive(Debug, Deserialize)]
pub struct CheckModelQuery {
    #[serde(rename = "modelId")]
    pub model_id: Option<String>,
}

/// Request body for the start-scan endpoint.
#[derive(Debug, Deserialize)]
pub struct StartScanRequest {
    #[serde(rename = "modelId")]
    pub model_id: Option<ModelId>,
}

/// Response for the check-model endpoint.
#[derive(Debug, Serialize)]
pub struct CheckModelResponse {
    pub exists: bool,
    pub message: &'static str,
}

/// Response for the start-scan endpoint.
#[derive(Debug, Serialize)]
pub struct StartScanResponse {
    pub message: &'static str,
    pub status: &'static str,
    #[serde(rename = "modelId")]
    pub model_id: Option<ModelId>,
}

/// Response for the clear-status endpoint.
#[derive(Debug, Serialize)]
pub struct ClearStatusResponse {
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/check-model -- is this model already in the store?
pub async fn check_model(
    State(state): State<AppState>,
    Query(query): Query<CheckModelQuery>,
) -> AppResult<Json<CheckModelResponse>> {
    let raw = query
        .model_id
        .ok_or_else(|| AppError::BadRequest("No model ID provided".to_string()))?;
    let model_id: ModelId = raw
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid model ID: {raw}")))?;

    let presence = state.scanner.check_exists(model_id).await?;
    let (exists, message) = match presence {
        ModelPresence::RecentlyScanned => (true, "Model was recently scanned"),
        ModelPresence::InStore => (true, "Model already exists in database"),
        ModelPresence::New => (false, "Model is new"),
    };

    Ok(Json(CheckModelResponse { exists, message }))
}

/// POST /api/start-scan -- admit a background scan for one model.
///
/// If a scan is already in flight no new work is spawned; the response
/// reports the model currently being processed.
pub async fn start_scan(
    State(state): State<AppState>,
    Json(input): Json<StartScanRequest>,
) -> AppResult<Json<StartScanResponse>> {
    let model_id = input
        .model_id
        .ok_or_else(|| AppError::BadRequest("No model ID provided".to_string()))?;

    let response = match state.scanner.start_scan(model_id).await {
        StartScan::Started(id) => StartScanResponse {
            message: "Scan started",
            status: "scanning",
            model_id: Some(id),
        },
        StartScan::AlreadyScanning { current_model } => StartScanResponse {
            message: "Scan already in progress",
            status: "scanning",
            model_id: current_model,
        },
    };

    Ok(Json(response))
}

/// GET /api/scan-status -- snapshot of the status projection.
pub async fn scan_status(State(state): State<AppState>) -> Json<ScanState> {
    Json(state.scanner.status().await)
}

/// POST /api/clear-status -- reset the idle-state fields.
///
/// Scan history and the de-duplication set are preserved.
pub async fn clear_status(State(state): State<AppState>) -> Json<ClearStatusResponse> {
    state.scanner.clear().await;
    Json(ClearStatusResponse {
        message: "Status cleared",
    })
}
