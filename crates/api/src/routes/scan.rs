//! Route definitions for the scan control endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::scan;
use crate::state::AppState;

/// Scan routes mounted at `/api`.
///
/// ```text
/// GET  /check-model   -> check_model
/// POST /start-scan    -> start_scan
/// GET  /scan-status   -> scan_status
/// POST /clear-status  -> clear_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check-model", get(scan::check_model))
        .route("/start-scan", post(scan::start_scan))
        .route("/scan-status", get(scan::scan_status))
        .route("/clear-status", post(scan::clear_status))
}
